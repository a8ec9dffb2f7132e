use common::{ErrorLocation, RedactError};

use std::path::PathBuf;

use thiserror::Error as ThisError;

/// Failures inside the token store.
///
/// These never reach callers of [`crate::token_store::CredentialProvider`];
/// the provider logs them and degrades to "no credential".
#[derive(Debug, ThisError)]
pub enum TokenStoreError {
    #[error("Token Store Read Error: {path}: {source} {location}")]
    Read {
        location: ErrorLocation,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Token Store Write Error: {path}: {source} {location}")]
    Write {
        location: ErrorLocation,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Token Store Remove Error: {path}: {source} {location}")]
    Remove {
        location: ErrorLocation,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Token Store Path Error: {message} {location}")]
    PathDetection {
        message: String,
        location: ErrorLocation,
    },

    #[error(transparent)]
    Token(#[from] RedactError),
}
