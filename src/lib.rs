//! Catalog Dedup - remove duplicate product images from a catalog.
//!
//! Identifies byte-identical images attached to a product's media gallery
//! and drops every duplicate after the first occurrence, keeping the base
//! image's content represented and never touching entries that carry a
//! named role (swatch, thumbnail, ...). Dry-run by default; applying
//! persists the filtered gallery and can optionally unlink orphaned files.
//!
//! # Example
//!
//! ```no_run
//! use catalog_dedup::{execute, CatalogStore, Config};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let mut store = CatalogStore::open(&config.catalog.database)?;
//!     let stats = execute(&mut store, &config, &[])?;
//!     println!("{} duplicate image(s) found", stats.images_removed);
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod cli;
pub mod config;
pub mod dedup;
pub mod error;
pub mod fs;
pub mod output;
pub mod run;

// Re-exports for convenience
pub use catalog::{CatalogStore, GalleryEntry, Product};
pub use config::Config;
pub use dedup::{plan, RemovalPlan};
pub use error::{Error, Result};
pub use run::{execute, RunStats};
