//! Duplicate-removal planning for a single product gallery.
//!
//! The engine is pure: it consumes a base image reference, an ordered
//! gallery, and caller-supplied digest/existence lookups, and produces a
//! [`RemovalPlan`] without touching the filesystem or the catalog. Digest
//! equality is trusted as content equality; hash collisions are not handled.

use std::collections::HashSet;

use crate::catalog::GalleryEntry;

/// Outcome of planning duplicate removal for one gallery.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RemovalPlan {
    /// Surviving entries, in their original gallery order.
    pub retained: Vec<GalleryEntry>,

    /// File references dropped from the gallery and no longer referenced
    /// by any retained entry.
    pub orphaned: Vec<String>,

    /// Whether any entry was removed. Persistence and file deletion
    /// downstream are gated on this.
    pub changed: bool,
}

/// Compute the minimal safe removal plan for a product gallery.
///
/// The base image's digest (when the file is resolvable) seeds the seen set,
/// so gallery entries duplicating the base image are removal candidates even
/// though the base image itself is not a gallery entry. Within the gallery,
/// the first entry producing an unseen digest is retained and only strict
/// repeats are dropped. Entries with a non-empty role set are pinned and
/// always retained.
///
/// `digest` returns `None` for an unreadable file; `exists` reports whether
/// the backing file is present. Both conditions exclude the entry from the
/// comparison set and leave it in the gallery untouched.
pub fn plan<D, E>(
    base_image: Option<&str>,
    gallery: &[GalleryEntry],
    mut digest: D,
    exists: E,
) -> RemovalPlan
where
    D: FnMut(&str) -> Option<String>,
    E: Fn(&str) -> bool,
{
    let mut seen: HashSet<String> = HashSet::new();

    if let Some(base) = base_image {
        if exists(base) {
            if let Some(hash) = digest(base) {
                seen.insert(hash);
            }
        }
    }

    let mut retained = Vec::with_capacity(gallery.len());
    let mut orphaned = Vec::new();

    for entry in gallery {
        // Already represented by the base image, never re-evaluated.
        if Some(entry.file.as_str()) == base_image {
            retained.push(entry.clone());
            continue;
        }

        if !exists(&entry.file) {
            retained.push(entry.clone());
            continue;
        }

        let hash = match digest(&entry.file) {
            Some(hash) => hash,
            // Unreadable mid-scan, same treatment as missing.
            None => {
                retained.push(entry.clone());
                continue;
            }
        };

        if seen.contains(&hash) {
            if entry.is_pinned() {
                retained.push(entry.clone());
            } else {
                orphaned.push(entry.file.clone());
            }
        } else {
            seen.insert(hash);
            retained.push(entry.clone());
        }
    }

    let changed = !orphaned.is_empty();

    RemovalPlan {
        retained,
        orphaned,
        changed,
    }
}
