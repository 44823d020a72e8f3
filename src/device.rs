use std::fs;

use rand::RngCore;
use rand::rngs::OsRng;

use crate::config::AppPaths;
use crate::errors::{AlbumError, Result};

const KEY_BYTES: usize = 16;

/// Returns this device's opaque identity key, generating and persisting one
/// on first use. The key is sent with every upload so the remote service can
/// group photos by device; it carries no other meaning.
pub fn load_or_create_user_key(paths: &AppPaths) -> Result<String> {
    if let Ok(existing) = fs::read_to_string(&paths.user_key_file) {
        let trimmed = existing.trim();
        if !trimmed.is_empty() {
            return Ok(trimmed.to_string());
        }
    }

    let mut bytes = [0u8; KEY_BYTES];
    OsRng.fill_bytes(&mut bytes);
    let key: String = bytes.iter().map(|b| format!("{:02x}", b)).collect();

    fs::create_dir_all(&paths.base_dir)
        .map_err(|e| AlbumError::StorageUnavailable(e.to_string()))?;
    fs::write(&paths.user_key_file, &key)
        .map_err(|e| AlbumError::StorageUnavailable(e.to_string()))?;
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_paths() -> (tempfile::TempDir, AppPaths) {
        let dir = tempfile::tempdir().unwrap();
        let paths = AppPaths::from_base(dir.path().join("album"));
        (dir, paths)
    }

    #[test]
    fn test_key_is_lowercase_hex() {
        let (_dir, paths) = test_paths();
        let key = load_or_create_user_key(&paths).unwrap();
        assert_eq!(key.len(), KEY_BYTES * 2);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_key_is_stable_across_calls() {
        let (_dir, paths) = test_paths();
        let first = load_or_create_user_key(&paths).unwrap();
        let second = load_or_create_user_key(&paths).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_key_regenerated_when_file_removed() {
        let (_dir, paths) = test_paths();
        let first = load_or_create_user_key(&paths).unwrap();
        std::fs::remove_file(&paths.user_key_file).unwrap();
        let second = load_or_create_user_key(&paths).unwrap();
        assert_ne!(first, second);
    }
}
