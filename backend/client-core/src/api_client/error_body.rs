//! Turning a non-2xx response into an [`ApiError`].
//!
//! Decode order:
//! 1. strict decode against the backend error contract → passed through as-is
//! 2. any other JSON → its `message` string (or reason phrase) with the HTTP status
//! 3. not JSON → the HTTP status line

use crate::error::ApiError;
use crate::error::api::{COMMUNICATION_ERROR_MESSAGE, GENERIC_ERROR_MESSAGE};

use models::ApiErrorBody;

use log::warn;
use reqwest::Response;
use serde_json::Value;

pub(crate) async fn parse_error_response(response: Response) -> ApiError {
    let status = response.status();
    let reason = status.canonical_reason();

    match response.bytes().await {
        Ok(body) => normalize_error_body(status.as_u16(), reason, &body),
        Err(e) => {
            warn!("Failed to read error body for HTTP {}: {}", status.as_u16(), e);
            ApiError::server(
                status.as_u16(),
                reason.unwrap_or(COMMUNICATION_ERROR_MESSAGE),
            )
        }
    }
}

/// Normalize an error body. `reason` is the status line's reason phrase, if any.
pub fn normalize_error_body(status: u16, reason: Option<&str>, body: &[u8]) -> ApiError {
    if let Ok(contract) = serde_json::from_slice::<ApiErrorBody>(body) {
        return ApiError::from_body(contract);
    }

    match serde_json::from_slice::<Value>(body) {
        Ok(value) => {
            let message = value
                .get("message")
                .and_then(Value::as_str)
                .filter(|message| !message.is_empty())
                .or(reason.filter(|reason| !reason.is_empty()))
                .unwrap_or(GENERIC_ERROR_MESSAGE);
            ApiError::server(status, message)
        }
        Err(_) => ApiError::server(
            status,
            reason
                .filter(|reason| !reason.is_empty())
                .unwrap_or(COMMUNICATION_ERROR_MESSAGE),
        ),
    }
}
