//! Catalog module.
//!
//! Provides:
//! - Product and gallery entry types
//! - The SQLite-backed product store and candidate selection

pub mod product;
pub mod store;

pub use product::{GalleryEntry, Product, NO_SELECTION};
pub use store::CatalogStore;
