//! Normalized failure of a backend call.
//!
//! Every error a caller can observe from [`crate::api_client::ApiClient`] is an
//! [`ApiError`]. Transport failures, non-2xx responses, and undecodable bodies
//! are all folded into it, each with the status code the UI needs.

use common::{ErrorLocation, HttpStatusCode};
use models::ApiErrorBody;

use std::collections::BTreeMap;
use std::panic::Location;

use thiserror::Error as ThisError;

/// Shown for every failure that never produced a response.
pub const NETWORK_ERROR_MESSAGE: &str = "ネットワークエラーが発生しました";

/// Shown for every request that could not be built.
pub const REQUEST_ERROR_MESSAGE: &str = "リクエストを作成できませんでした";

/// Shown when an error response carries no usable message.
pub const GENERIC_ERROR_MESSAGE: &str = "エラーが発生しました";

/// Shown when an error response body is not JSON and has no reason phrase.
pub const COMMUNICATION_ERROR_MESSAGE: &str = "通信エラーが発生しました";

#[derive(Debug, Clone, ThisError)]
pub enum ApiError {
    /// The request never completed: DNS, refused connection, timeout, abort.
    #[error("Network Error: {message} ({detail}) {location}")]
    Network {
        message: String,
        detail: String,
        location: ErrorLocation,
    },

    /// The request could not be built (bad URL, unserializable payload).
    #[error("Request Error: {message} ({detail}) {location}")]
    Request {
        message: String,
        detail: String,
        location: ErrorLocation,
    },

    /// The server answered outside the 2xx range.
    #[error("Server Error: HTTP {status} - {message} {location}")]
    Server {
        status: HttpStatusCode,
        message: String,
        field_errors: BTreeMap<String, String>,
        location: ErrorLocation,
    },

    /// The server answered 2xx but the body did not match the expected shape.
    #[error("Decode Error: HTTP {status} - {message} {location}")]
    Decode {
        status: HttpStatusCode,
        message: String,
        location: ErrorLocation,
    },
}

impl ApiError {
    #[track_caller]
    pub fn network(detail: impl Into<String>) -> Self {
        ApiError::Network {
            message: String::from(NETWORK_ERROR_MESSAGE),
            detail: detail.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn request(detail: impl Into<String>) -> Self {
        ApiError::Request {
            message: String::from(REQUEST_ERROR_MESSAGE),
            detail: detail.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn server(status: impl Into<HttpStatusCode>, message: impl Into<String>) -> Self {
        ApiError::Server {
            status: status.into(),
            message: message.into(),
            field_errors: BTreeMap::new(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn decode(status: impl Into<HttpStatusCode>, message: impl Into<String>) -> Self {
        ApiError::Decode {
            status: status.into(),
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Pass a backend error body through unchanged, including its own status.
    #[track_caller]
    pub fn from_body(body: ApiErrorBody) -> Self {
        ApiError::Server {
            status: HttpStatusCode(body.status),
            message: body.message,
            field_errors: body.errors.unwrap_or_default(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Status code as the UI sees it; `0` when no response was received.
    pub fn status(&self) -> HttpStatusCode {
        match self {
            ApiError::Network { .. } | ApiError::Request { .. } => {
                HttpStatusCode::NETWORK_FAILURE
            }
            ApiError::Server { status, .. } | ApiError::Decode { status, .. } => *status,
        }
    }

    /// User-facing message, without location or transport detail.
    pub fn message(&self) -> &str {
        match self {
            ApiError::Network { message, .. }
            | ApiError::Request { message, .. }
            | ApiError::Server { message, .. }
            | ApiError::Decode { message, .. } => message,
        }
    }

    /// Per-field messages from a server-side validation failure.
    pub fn field_errors(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            ApiError::Server { field_errors, .. } if !field_errors.is_empty() => {
                Some(field_errors)
            }
            _ => None,
        }
    }

    pub fn is_network_failure(&self) -> bool {
        self.status().is_network_failure()
    }
}
