use client_core::error::{ApiError, AuthError, ConfigError, TokenStoreError, WorkflowError};
use common::ErrorLocation;

use std::panic::Location;

use serde::Serialize;
use thiserror::Error;

/// Failures that stop a command before it can render a result.
///
/// Rejections the user can act on (validation, server errors) are rendered
/// by the command itself and are not errors at this level.
#[derive(Debug, Error, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum OshikatsuError {
    /// Error from this App
    #[error("Oshikatsu Error: {message} {location}")]
    Oshikatsu {
        message: String,
        location: ErrorLocation,
    },

    /// Error from client-core (config, credential storage, HTTP client setup)
    #[error("Core Error: {message} {location}")]
    Core {
        message: String,
        location: ErrorLocation,
    },

    /// Writing to the terminal failed
    #[error("Output Error: {message} {location}")]
    Output {
        message: String,
        location: ErrorLocation,
    },
}

impl OshikatsuError {
    #[track_caller]
    pub fn app(message: impl Into<String>) -> Self {
        OshikatsuError::Oshikatsu {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    fn core(error: impl std::fmt::Display) -> Self {
        OshikatsuError::Core {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<ApiError> for OshikatsuError {
    #[track_caller]
    fn from(error: ApiError) -> Self {
        Self::core(error)
    }
}

impl From<AuthError> for OshikatsuError {
    #[track_caller]
    fn from(error: AuthError) -> Self {
        Self::core(error)
    }
}

impl From<ConfigError> for OshikatsuError {
    #[track_caller]
    fn from(error: ConfigError) -> Self {
        Self::core(error)
    }
}

impl From<TokenStoreError> for OshikatsuError {
    #[track_caller]
    fn from(error: TokenStoreError) -> Self {
        Self::core(error)
    }
}

impl From<WorkflowError> for OshikatsuError {
    #[track_caller]
    fn from(error: WorkflowError) -> Self {
        Self::core(error)
    }
}

impl From<std::io::Error> for OshikatsuError {
    #[track_caller]
    fn from(error: std::io::Error) -> Self {
        OshikatsuError::Output {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
