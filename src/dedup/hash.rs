//! File content hashing.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use md5::{Digest, Md5};

use crate::error::Result;

/// Compute the MD5 digest of a file's bytes as lowercase hex.
///
/// The digest is used purely as an equality key: two files with the same
/// digest are treated as identical content. Collisions are not handled.
pub fn hash_file(path: &Path) -> Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Md5::new();
    let mut buffer = [0u8; 8192];

    loop {
        let bytes_read = file.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    let result = hasher.finalize();
    Ok(format!("{:x}", result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_hash_file_known_vector() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.jpg");
        let mut file = File::create(&path).unwrap();
        file.write_all(b"hello world").unwrap();

        let hash = hash_file(&path).unwrap();
        assert_eq!(hash, "5eb63bbbe01eeed093cb22bb8f5acdc3");
    }

    #[test]
    fn test_hash_file_missing_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(hash_file(&dir.path().join("nope.jpg")).is_err());
    }

    #[test]
    fn test_identical_content_same_digest() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first.jpg");
        let second = dir.path().join("second.jpg");
        std::fs::write(&first, b"pixels").unwrap();
        std::fs::write(&second, b"pixels").unwrap();

        assert_eq!(hash_file(&first).unwrap(), hash_file(&second).unwrap());
    }
}
