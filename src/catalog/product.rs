//! Catalog product and gallery entry types.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Sentinel value stored in the catalog when a product has no base image.
pub const NO_SELECTION: &str = "no_selection";

/// One image attached to a product's media gallery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryEntry {
    /// File reference relative to the catalog media folder (e.g. `/a/b/image.jpg`).
    pub file: String,

    /// Named roles assigned to this image (swatch, thumbnail, ...).
    /// An entry with at least one role is pinned and never auto-removed.
    #[serde(default)]
    pub roles: BTreeSet<String>,
}

impl GalleryEntry {
    /// Create an entry with no roles.
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            roles: BTreeSet::new(),
        }
    }

    /// Create an entry with the given roles.
    pub fn with_roles<I, S>(file: impl Into<String>, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            file: file.into(),
            roles: roles.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether this entry carries a named role and is exempt from removal.
    pub fn is_pinned(&self) -> bool {
        !self.roles.is_empty()
    }
}

/// A catalog product record, scoped to a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub sku: String,
    pub store_id: i64,

    /// Base image file reference, `None` when the catalog holds the
    /// `no_selection` sentinel.
    pub base_image: Option<String>,

    /// Ordered media gallery.
    pub gallery: Vec<GalleryEntry>,
}

impl Product {
    /// Base image reference as stored in the catalog.
    pub fn base_image_column(&self) -> &str {
        self.base_image.as_deref().unwrap_or(NO_SELECTION)
    }
}
