use std::path::PathBuf;

use crate::errors::{AlbumError, Result};

/// Environment variable consulted when no --endpoint flag is given.
pub const ENDPOINT_ENV: &str = "ALBUM_ENDPOINT";

pub struct AppPaths {
    pub base_dir: PathBuf,
    pub db_path: PathBuf,
    pub user_key_file: PathBuf,
}

impl Default for AppPaths {
    fn default() -> Self {
        Self::new()
    }
}

impl AppPaths {
    pub fn new() -> Self {
        let base = dirs::home_dir()
            .expect("Could not determine home directory")
            .join(".album");
        Self::from_base(base)
    }

    pub fn from_base(base: PathBuf) -> Self {
        Self {
            db_path: base.join("album.db"),
            user_key_file: base.join("user_key"),
            base_dir: base,
        }
    }
}

/// Resolves the upload endpoint from the flag, falling back to the
/// ALBUM_ENDPOINT environment variable.
pub fn resolve_endpoint(flag: Option<String>) -> Result<String> {
    if let Some(url) = flag {
        return Ok(url);
    }
    match std::env::var(ENDPOINT_ENV) {
        Ok(url) if !url.is_empty() => Ok(url),
        _ => Err(AlbumError::InvalidInput(format!(
            "no upload endpoint configured (pass --endpoint or set {})",
            ENDPOINT_ENV
        ))),
    }
}
