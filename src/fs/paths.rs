//! Media path resolution and file operations.

use std::path::{Path, PathBuf};

use crate::error::Result;

/// Subfolder of the media root holding catalog product images.
const PRODUCT_MEDIA_SUBDIR: &str = "catalog/product";

/// Resolve a gallery file reference against the media root.
///
/// File references are stored with a leading slash (e.g. `/a/b/image.jpg`)
/// relative to the product media folder.
pub fn media_image_path(media_root: &Path, file_ref: &str) -> PathBuf {
    media_root
        .join(PRODUCT_MEDIA_SUBDIR)
        .join(file_ref.trim_start_matches('/'))
}

/// Whether the path exists. Lookup failures count as absent.
pub fn file_exists(path: &Path) -> bool {
    path.exists()
}

/// Whether the path is a regular file. Lookup failures count as no.
pub fn is_file(path: &Path) -> bool {
    path.is_file()
}

/// Delete a file from the media storage.
pub fn delete_file(path: &Path) -> Result<()> {
    std::fs::remove_file(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_image_path() {
        let root = Path::new("/var/media");
        assert_eq!(
            media_image_path(root, "/a/b/image.jpg"),
            PathBuf::from("/var/media/catalog/product/a/b/image.jpg")
        );
        // Tolerates refs without the leading slash.
        assert_eq!(
            media_image_path(root, "a/b/image.jpg"),
            PathBuf::from("/var/media/catalog/product/a/b/image.jpg")
        );
    }

    #[test]
    fn test_missing_path_checks() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.jpg");
        assert!(!file_exists(&missing));
        assert!(!is_file(&missing));

        let real = dir.path().join("real.jpg");
        std::fs::write(&real, b"x").unwrap();
        assert!(is_file(&real));
    }

    #[test]
    fn test_delete_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gone.jpg");
        std::fs::write(&path, b"x").unwrap();

        delete_file(&path).unwrap();
        assert!(!file_exists(&path));
        assert!(delete_file(&path).is_err());
    }
}
