//! Command-line argument definitions using clap.

use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;

/// Duplicate product image remover CLI.
#[derive(Parser, Debug)]
#[command(
    name = "catalog-dedup",
    version,
    about = "Remove duplicate product images from a catalog",
    long_about = "Removes byte-identical duplicate images from catalog product galleries.\n\n\
                  Keeps one image per distinct content per product; images assigned a named \
                  role (swatch, thumbnail, ...) are never removed. Dry-run by default."
)]
pub struct Args {
    /// Product SKUs to filter on. When omitted, products with two or more
    /// gallery images are discovered automatically.
    pub products: Vec<String>,

    /// Unlink the orphaned duplicate files from media storage.
    #[arg(short, long)]
    pub unlink: bool,

    /// Apply changes. Without this flag nothing is saved or deleted.
    #[arg(long)]
    pub apply: bool,

    /// Path to the catalog SQLite database.
    #[arg(long, env = "CATALOG_DEDUP_DATABASE")]
    pub database: Option<PathBuf>,

    /// Media root directory (product images under catalog/product).
    #[arg(short = 'm', long = "media-root", env = "CATALOG_DEDUP_MEDIA_ROOT")]
    pub media_root: Option<PathBuf>,

    /// Store scope to load and save products at.
    #[arg(long = "store-id")]
    pub store_id: Option<i64>,

    /// Path to configuration file.
    #[arg(short, long, default_value = "catalog-dedup.toml")]
    pub config: PathBuf,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,
}

impl Args {
    /// Merge CLI arguments into an existing config, overriding where specified.
    pub fn merge_into_config(&self, config: &mut Config) {
        if let Some(database) = &self.database {
            config.catalog.database = database.clone();
        }

        if let Some(media_root) = &self.media_root {
            config.media.root = media_root.clone();
        }

        if let Some(store_id) = self.store_id {
            config.catalog.store_id = store_id;
        }

        // Boolean flags only override when set.
        if self.unlink {
            config.options.unlink = true;
        }

        if self.apply {
            config.options.apply = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_overrides_config() {
        let args = Args::parse_from([
            "catalog-dedup",
            "--database",
            "/srv/shop/catalog.db",
            "--store-id",
            "3",
            "--unlink",
            "SKU-1",
            "SKU-2",
        ]);

        let mut config = Config::default();
        args.merge_into_config(&mut config);

        assert_eq!(config.catalog.database, PathBuf::from("/srv/shop/catalog.db"));
        assert_eq!(config.catalog.store_id, 3);
        assert!(config.options.unlink);
        assert!(!config.options.apply);
        assert_eq!(args.products, vec!["SKU-1", "SKU-2"]);
    }

    #[test]
    fn test_defaults_leave_config_untouched() {
        let args = Args::parse_from(["catalog-dedup"]);

        let mut config = Config::default();
        config.catalog.store_id = 5;
        args.merge_into_config(&mut config);

        assert_eq!(config.catalog.store_id, 5);
        assert!(!config.options.apply);
        assert!(args.products.is_empty());
    }
}
