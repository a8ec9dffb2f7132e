//! Bearer credential wrapper with redacted Debug output.

use crate::{ErrorLocation, RedactError};

use std::fmt;
use std::panic::Location;

use serde::ser::Error;
use zeroize::Zeroize;

/// A bearer token that never exposes its value in logs or debug output.
///
/// The token is opaque to the client. It is only ever read back out to build
/// an `Authorization` header or to persist it in the token store.
#[derive(Clone, PartialEq, Eq)]
pub struct RedactedToken {
    inner: String,
}

impl RedactedToken {
    /// Wrap a token, trimming surrounding whitespace.
    ///
    /// # Errors
    /// Returns [`RedactError::EmptyToken`] when nothing is left after trimming.
    #[track_caller]
    pub fn try_new(token: impl Into<String>) -> Result<Self, RedactError> {
        let mut raw = token.into();
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            raw.zeroize();
            return Err(RedactError::EmptyToken {
                message: String::from("bearer token cannot be empty"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let inner = trimmed.to_string();
        raw.zeroize();
        Ok(Self { inner })
    }

    /// Get the actual token value.
    ///
    /// # Security Note
    /// Only call this when building the `Authorization` header or persisting.
    #[inline]
    pub fn expose(&self) -> &str {
        &self.inner
    }

    /// `Bearer <token>` header value.
    pub fn bearer_header_value(&self) -> String {
        format!("Bearer {}", self.inner)
    }

    /// Token length (safe to log).
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl fmt::Debug for RedactedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RedactedToken([REDACTED])")
    }
}

impl fmt::Display for RedactedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED TOKEN]")
    }
}

impl Drop for RedactedToken {
    fn drop(&mut self) {
        self.inner.zeroize();
    }
}

// Prevent accidental serialization
impl serde::Serialize for RedactedToken {
    fn serialize<S>(&self, _serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        Err(S::Error::custom(RedactError::Serialization {
            message: String::from("RedactedToken cannot be serialized - use expose() explicitly"),
            location: ErrorLocation::from(Location::caller()),
        }))
    }
}
