//! Filesystem module.
//!
//! Provides:
//! - Media path resolution
//! - Error-absorbing existence checks and file deletion

pub mod paths;

pub use paths::{delete_file, file_exists, is_file, media_image_path};
