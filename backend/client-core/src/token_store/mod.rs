//! Persistence of the bearer credential.
//!
//! The HTTP client never touches storage directly; it asks a
//! [`CredentialProvider`]. Storage failures are logged and degrade to
//! "no credential" on read, "not persisted" on write.

pub mod paths;

pub use paths::{PathSource, TOKEN_STORAGE_KEY, TokenPaths, detect_token_paths};

use crate::error::TokenStoreError;

use common::{ErrorLocation, RedactedToken};

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use log::{debug, error, info, warn};

static TEMP_FILE_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Source of the bearer credential attached to outgoing requests.
pub trait CredentialProvider: Send + Sync {
    /// Current credential, or `None` when absent or unreadable.
    fn get(&self) -> Option<RedactedToken>;

    /// Persist a credential. Failures are logged, not returned.
    fn set(&self, token: &str);

    /// Remove the credential. Failures are ignored.
    fn clear(&self);
}

/// Credential kept only for the lifetime of the process.
#[derive(Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<RedactedToken>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        let store = Self::new();
        store.set(token);
        store
    }
}

impl CredentialProvider for MemoryTokenStore {
    fn get(&self) -> Option<RedactedToken> {
        self.token
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn set(&self, token: &str) {
        match RedactedToken::try_new(token) {
            Ok(token) => {
                *self
                    .token
                    .lock()
                    .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(token);
            }
            Err(e) => error!("Failed to store auth token: {}", e),
        }
    }

    fn clear(&self) {
        *self
            .token
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
    }
}

/// Credential persisted as a single file named [`TOKEN_STORAGE_KEY`].
///
/// Survives process restarts until [`CredentialProvider::clear`] or the file is
/// deleted out from under us.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    paths: TokenPaths,
}

impl FileTokenStore {
    pub fn new(paths: TokenPaths) -> Self {
        Self { paths }
    }

    /// Store in `data_dir` regardless of environment.
    pub fn in_dir(data_dir: &Path) -> Self {
        Self::new(TokenPaths::in_dir(data_dir, PathSource::Config))
    }

    /// Resolve the directory from config / env / platform defaults.
    pub fn detect(configured: Option<&Path>) -> Result<Self, TokenStoreError> {
        let paths = detect_token_paths(configured)?;
        info!(
            "Token store at {:?} (source: {})",
            paths.token_file, paths.source
        );
        Ok(Self::new(paths))
    }

    pub fn paths(&self) -> &TokenPaths {
        &self.paths
    }

    fn read(&self) -> Result<Option<RedactedToken>, TokenStoreError> {
        let content = match fs::read_to_string(&self.paths.token_file) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(TokenStoreError::Read {
                    location: ErrorLocation::from(Location::caller()),
                    path: self.paths.token_file.clone(),
                    source: e,
                });
            }
        };

        if content.trim().is_empty() {
            return Ok(None);
        }

        Ok(Some(RedactedToken::try_new(content)?))
    }

    fn write(&self, token: &RedactedToken) -> Result<(), TokenStoreError> {
        let write_error = |path: &Path, source: std::io::Error| TokenStoreError::Write {
            location: ErrorLocation::from(Location::caller()),
            path: path.to_path_buf(),
            source,
        };

        fs::create_dir_all(&self.paths.data_dir)
            .map_err(|e| write_error(&self.paths.data_dir, e))?;

        let temp_path = self.temp_path();
        let written = create_private(&temp_path)
            .and_then(|mut file| {
                file.write_all(token.expose().as_bytes())?;
                file.sync_all()
            })
            .map_err(|e| write_error(&temp_path, e));

        if let Err(e) = written {
            let _ = fs::remove_file(&temp_path);
            return Err(e);
        }

        fs::rename(&temp_path, &self.paths.token_file).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            write_error(&self.paths.token_file, e)
        })?;

        Ok(())
    }

    /// Unique per process and per write, so concurrent writers never share a file.
    fn temp_path(&self) -> PathBuf {
        let sequence = TEMP_FILE_COUNTER.fetch_add(1, Ordering::Relaxed);
        self.paths
            .data_dir
            .join(format!("{TOKEN_STORAGE_KEY}.{}.{sequence}.tmp", process::id()))
    }

    fn remove(&self) -> Result<(), TokenStoreError> {
        match fs::remove_file(&self.paths.token_file) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(TokenStoreError::Remove {
                location: ErrorLocation::from(Location::caller()),
                path: self.paths.token_file.clone(),
                source: e,
            }),
        }
    }
}

impl CredentialProvider for FileTokenStore {
    fn get(&self) -> Option<RedactedToken> {
        match self.read() {
            Ok(token) => token,
            Err(e) => {
                warn!("Failed to read auth token: {}", e);
                None
            }
        }
    }

    fn set(&self, token: &str) {
        let result = RedactedToken::try_new(token)
            .map_err(TokenStoreError::from)
            .and_then(|token| {
                self.write(&token)?;
                Ok(token.len())
            });

        match result {
            Ok(len) => debug!("Stored auth token ({} chars)", len),
            Err(e) => error!("Failed to store auth token: {}", e),
        }
    }

    fn clear(&self) {
        if let Err(e) = self.remove() {
            debug!("Ignoring auth token removal failure: {}", e);
        }
    }
}

/// Create a new file readable only by the owner before any byte is written.
#[cfg(unix)]
fn create_private(path: &Path) -> std::io::Result<File> {
    use std::os::unix::fs::OpenOptionsExt;
    OpenOptions::new()
        .write(true)
        .create_new(true)
        .mode(0o600)
        .open(path)
}

#[cfg(not(unix))]
fn create_private(path: &Path) -> std::io::Result<File> {
    OpenOptions::new().write(true).create_new(true).open(path)
}
