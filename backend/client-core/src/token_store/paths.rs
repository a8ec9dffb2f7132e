//! Where the persisted credential lives.
//!
//! Lookup order:
//! 1. Explicit directory from configuration
//! 2. OSHIKATSU_DATA_DIR environment variable
//! 3. Platform-specific data directory via `dirs` crate
//! 4. `$HOME/.local/share/oshikatsu` on Linux
//!
//! Returns Result, never silently falls back to a wrong path.

use crate::config::DATA_DIR_ENV;
use crate::error::TokenStoreError;

use common::ErrorLocation;

use std::env;
use std::panic::Location;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

/// Fixed storage key; the credential file is named after it.
pub const TOKEN_STORAGE_KEY: &str = "oshikatsu_token";

const DATA_DIR_NAME: &str = "oshikatsu";

#[derive(Debug, Clone)]
pub struct TokenPaths {
    pub data_dir: PathBuf,
    pub token_file: PathBuf,
    pub source: PathSource,
}

impl TokenPaths {
    pub fn in_dir(data_dir: &Path, source: PathSource) -> Self {
        Self {
            data_dir: data_dir.to_path_buf(),
            token_file: data_dir.join(TOKEN_STORAGE_KEY),
            source,
        }
    }
}

/// How the path was determined (for logging).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathSource {
    Config,
    EnvVar,
    PlatformDefault,
    HomeFallback,
}

impl std::fmt::Display for PathSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathSource::Config => write!(f, "storage.data_dir"),
            PathSource::EnvVar => write!(f, "{DATA_DIR_ENV}"),
            PathSource::PlatformDefault => write!(f, "platform default"),
            PathSource::HomeFallback => write!(f, "home fallback"),
        }
    }
}

/// Detect the token directory.
///
/// # Errors
/// Returns `TokenStoreError::PathDetection` if no directory can be determined.
#[track_caller]
pub fn detect_token_paths(configured: Option<&Path>) -> Result<TokenPaths, TokenStoreError> {
    if let Some(dir) = configured {
        debug!("Using configured token directory: {:?}", dir);
        return Ok(TokenPaths::in_dir(dir, PathSource::Config));
    }

    if let Ok(custom_dir) = env::var(DATA_DIR_ENV) {
        if !custom_dir.is_empty() {
            info!("Using {DATA_DIR_ENV} override: {:?}", custom_dir);
            return Ok(TokenPaths::in_dir(
                Path::new(&custom_dir),
                PathSource::EnvVar,
            ));
        }
    }

    if let Some(data_dir) = dirs::data_local_dir() {
        let dir = data_dir.join(DATA_DIR_NAME);
        debug!("Platform data dir: {:?}", dir);
        return Ok(TokenPaths::in_dir(&dir, PathSource::PlatformDefault));
    }

    if let Ok(home) = env::var("HOME") {
        let dir = PathBuf::from(home).join(".local/share").join(DATA_DIR_NAME);
        warn!("Using home fallback path: {:?}", dir);
        return Ok(TokenPaths::in_dir(&dir, PathSource::HomeFallback));
    }

    Err(TokenStoreError::PathDetection {
        message: format!(
            "Cannot determine data directory. Set {DATA_DIR_ENV} environment variable."
        ),
        location: ErrorLocation::from(Location::caller()),
    })
}
