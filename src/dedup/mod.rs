//! Deduplication module.
//!
//! Provides:
//! - Pure removal planning over a product gallery
//! - MD5 content hashing for exact-duplicate detection

pub mod engine;
pub mod hash;

pub use engine::{plan, RemovalPlan};
pub use hash::hash_file;
