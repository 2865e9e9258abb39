//! Run orchestration: candidate selection, per-product planning, and
//! applying removal plans to the catalog and media storage.

use std::collections::HashMap;
use std::path::Path;

use indicatif::ProgressBar;
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::catalog::{CatalogStore, Product};
use crate::config::Config;
use crate::dedup::{self, hash_file};
use crate::error::Result;
use crate::fs::{delete_file, file_exists, is_file, media_image_path};
use crate::output::create_product_bar;

/// Counters accumulated over one run.
#[derive(Debug, Default)]
pub struct RunStats {
    pub products_scanned: u64,
    pub products_changed: u64,
    pub images_removed: u64,
    pub files_deleted: u64,
    pub save_failures: u64,
    pub product_failures: u64,
    pub dry_run: bool,
}

/// Run deduplication over the given SKUs, or over auto-discovered
/// candidates when the list is empty.
///
/// A failure in one product is reported and counted; the run continues
/// with the next product.
pub fn execute(store: &mut CatalogStore, config: &Config, skus: &[String]) -> Result<RunStats> {
    let dry_run = !config.options.apply;

    let mut stats = RunStats {
        dry_run,
        ..Default::default()
    };

    let targets = if skus.is_empty() {
        store.candidate_skus(config.catalog.store_id)?
    } else {
        skus.to_vec()
    };

    if targets.is_empty() {
        return Ok(stats);
    }

    if dry_run {
        println!("THIS IS A DRY-RUN, NO CHANGES WILL BE MADE!");
    }
    println!("{} products found with 2 images or more.", targets.len());

    let bar = create_product_bar(targets.len() as u64);

    for sku in &targets {
        if let Err(e) = process_product(store, config, sku, &bar, &mut stats) {
            warn!("Skipping product {}: {}", sku, e);
            stats.product_failures += 1;
        }
        stats.products_scanned += 1;
        bar.inc(1);
    }

    bar.finish_and_clear();

    if dry_run {
        println!("THIS WAS A DRY-RUN, NO CHANGES WERE MADE!");
    } else {
        println!("Duplicate images are removed");
    }

    Ok(stats)
}

/// Plan and apply duplicate removal for a single product.
fn process_product(
    store: &mut CatalogStore,
    config: &Config,
    sku: &str,
    bar: &ProgressBar,
    stats: &mut RunStats,
) -> Result<()> {
    let dry_run = !config.options.apply;
    let unlink = config.options.unlink;
    let media_root = &config.media.root;

    let mut product = store.load(sku, config.catalog.store_id)?;
    if product.gallery.is_empty() {
        return Ok(());
    }

    // Hashing is the only I/O-bound step; digests are precomputed in
    // parallel and the engine pass stays sequential over the gallery.
    let digests = precompute_digests(media_root, &product);

    let plan = dedup::plan(
        product.base_image.as_deref(),
        &product.gallery,
        |file| digests.get(file).cloned(),
        |file| file_exists(&media_image_path(media_root, file)),
    );

    for _ in &plan.orphaned {
        bar.println(format!("Removed duplicate image from {}", product.sku));
    }
    stats.images_removed += plan.orphaned.len() as u64;

    if plan.changed {
        stats.products_changed += 1;

        if !dry_run {
            product.gallery = plan.retained.clone();
            if let Err(e) = store.save(&product) {
                bar.println(format!("Could not save product: {}", e));
                stats.save_failures += 1;
            }
        }
    }

    for file_ref in &plan.orphaned {
        let path = media_image_path(media_root, file_ref);
        if !is_file(&path) {
            continue;
        }

        if !dry_run && unlink && plan.changed {
            if let Err(e) = delete_file(&path) {
                debug!("Could not delete {}: {}", path.display(), e);
                continue;
            }
            stats.files_deleted += 1;
        }

        // Reported whenever unlink was requested and the gallery changed,
        // including in dry-run where nothing is actually deleted.
        if unlink && plan.changed {
            bar.println(format!("Deleted file: {}", path.display()));
        }
    }

    Ok(())
}

/// Hash the base image and every gallery file in parallel, keyed by file
/// reference. Missing or unreadable files are left out of the map.
fn precompute_digests(media_root: &Path, product: &Product) -> HashMap<String, String> {
    let mut refs: Vec<&str> = product
        .base_image
        .as_deref()
        .into_iter()
        .chain(product.gallery.iter().map(|entry| entry.file.as_str()))
        .collect();
    refs.sort_unstable();
    refs.dedup();

    refs.into_par_iter()
        .filter_map(|file_ref| {
            let path = media_image_path(media_root, file_ref);
            if !file_exists(&path) {
                return None;
            }
            match hash_file(&path) {
                Ok(hash) => Some((file_ref.to_string(), hash)),
                Err(e) => {
                    debug!("Skipping unreadable file {}: {}", path.display(), e);
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::GalleryEntry;
    use std::path::PathBuf;

    /// Catalog with one product and its media files on disk. Returns the
    /// store and a config pointing at the temp media root.
    fn fixture(
        media_root: &Path,
        base_image: Option<&str>,
        gallery: Vec<GalleryEntry>,
        contents: &[(&str, &[u8])],
    ) -> (CatalogStore, Config) {
        let mut store = CatalogStore::open_in_memory().unwrap();
        store
            .save(&Product {
                sku: "SKU-1".into(),
                store_id: 0,
                base_image: base_image.map(String::from),
                gallery,
            })
            .unwrap();

        for (file_ref, bytes) in contents {
            let path = media_image_path(media_root, file_ref);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(&path, bytes).unwrap();
        }

        let mut config = Config::default();
        config.media.root = PathBuf::from(media_root);
        (store, config)
    }

    fn duplicate_fixture(media_root: &Path) -> (CatalogStore, Config) {
        fixture(
            media_root,
            Some("/a/a.jpg"),
            vec![
                GalleryEntry::new("/a/a.jpg"),
                GalleryEntry::new("/b/b.jpg"),
                GalleryEntry::new("/c/c.jpg"),
            ],
            &[
                ("/a/a.jpg", b"same"),
                ("/b/b.jpg", b"same"),
                ("/c/c.jpg", b"other"),
            ],
        )
    }

    #[test]
    fn test_dry_run_reports_without_modifying() {
        let dir = tempfile::tempdir().unwrap();
        let (mut store, mut config) = duplicate_fixture(dir.path());
        config.options.unlink = true;

        let skus = vec!["SKU-1".to_string()];
        let stats = execute(&mut store, &config, &skus).unwrap();

        assert!(stats.dry_run);
        assert_eq!(stats.products_scanned, 1);
        assert_eq!(stats.products_changed, 1);
        assert_eq!(stats.images_removed, 1);
        assert_eq!(stats.files_deleted, 0);

        // Catalog untouched, file still on disk.
        let product = store.load("SKU-1", 0).unwrap();
        assert_eq!(product.gallery.len(), 3);
        assert!(file_exists(&media_image_path(dir.path(), "/b/b.jpg")));
    }

    #[test]
    fn test_apply_saves_filtered_gallery() {
        let dir = tempfile::tempdir().unwrap();
        let (mut store, mut config) = duplicate_fixture(dir.path());
        config.options.apply = true;

        let skus = vec!["SKU-1".to_string()];
        let stats = execute(&mut store, &config, &skus).unwrap();

        assert_eq!(stats.products_changed, 1);
        let product = store.load("SKU-1", 0).unwrap();
        assert_eq!(
            product.gallery,
            vec![GalleryEntry::new("/a/a.jpg"), GalleryEntry::new("/c/c.jpg")]
        );
        // Unlink not requested: the orphaned file stays on disk.
        assert!(file_exists(&media_image_path(dir.path(), "/b/b.jpg")));
    }

    #[test]
    fn test_apply_with_unlink_deletes_orphans() {
        let dir = tempfile::tempdir().unwrap();
        let (mut store, mut config) = duplicate_fixture(dir.path());
        config.options.apply = true;
        config.options.unlink = true;

        let skus = vec!["SKU-1".to_string()];
        let stats = execute(&mut store, &config, &skus).unwrap();

        assert_eq!(stats.files_deleted, 1);
        assert!(!file_exists(&media_image_path(dir.path(), "/b/b.jpg")));
        assert!(file_exists(&media_image_path(dir.path(), "/a/a.jpg")));
        assert!(file_exists(&media_image_path(dir.path(), "/c/c.jpg")));
    }

    #[test]
    fn test_pinned_duplicate_survives_apply() {
        let dir = tempfile::tempdir().unwrap();
        let (mut store, mut config) = fixture(
            dir.path(),
            Some("/a/a.jpg"),
            vec![
                GalleryEntry::new("/a/a.jpg"),
                GalleryEntry::with_roles("/b/b.jpg", ["swatch"]),
            ],
            &[("/a/a.jpg", b"same"), ("/b/b.jpg", b"same")],
        );
        config.options.apply = true;
        config.options.unlink = true;

        let skus = vec!["SKU-1".to_string()];
        let stats = execute(&mut store, &config, &skus).unwrap();

        assert_eq!(stats.products_changed, 0);
        assert_eq!(stats.images_removed, 0);
        let product = store.load("SKU-1", 0).unwrap();
        assert_eq!(product.gallery.len(), 2);
    }

    #[test]
    fn test_unknown_sku_is_counted_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let (mut store, config) = duplicate_fixture(dir.path());

        let skus = vec!["NOPE".to_string(), "SKU-1".to_string()];
        let stats = execute(&mut store, &config, &skus).unwrap();

        assert_eq!(stats.product_failures, 1);
        assert_eq!(stats.products_scanned, 2);
        assert_eq!(stats.images_removed, 1);
    }

    #[test]
    fn test_auto_discovery_with_no_candidates() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = CatalogStore::open_in_memory().unwrap();
        let mut config = Config::default();
        config.media.root = PathBuf::from(dir.path());

        let stats = execute(&mut store, &config, &[]).unwrap();
        assert_eq!(stats.products_scanned, 0);
        assert_eq!(stats.products_changed, 0);
    }

    #[test]
    fn test_missing_media_files_left_alone() {
        let dir = tempfile::tempdir().unwrap();
        // Gallery references files that are not on disk at all.
        let (mut store, mut config) = fixture(
            dir.path(),
            Some("/a/a.jpg"),
            vec![GalleryEntry::new("/b/b.jpg"), GalleryEntry::new("/c/c.jpg")],
            &[],
        );
        config.options.apply = true;

        let skus = vec!["SKU-1".to_string()];
        let stats = execute(&mut store, &config, &skus).unwrap();

        assert_eq!(stats.products_changed, 0);
        assert_eq!(store.load("SKU-1", 0).unwrap().gallery.len(), 2);
    }
}
