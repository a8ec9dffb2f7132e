//! Shared building blocks for the Oshikatsu client.
//!
//! Nothing in here knows about HTTP endpoints or forms. It holds the pieces
//! every other crate reaches for when it reports an error or handles a secret.
//!
//! ## Architecture
//!
//! - **common** (this crate): error locations, status codes, redacted secrets
//! - **models**: wire DTOs exchanged with the backend
//! - **client-core**: token store, HTTP client, validation, workflows
//! - **oshikatsu**: terminal front-end wiring everything together

pub mod error;
pub mod http_status;
pub mod redacted_token;

pub use error::error_location::ErrorLocation;
pub use error::redact_error::RedactError;
pub use http_status::HttpStatusCode;
pub use redacted_token::RedactedToken;

#[cfg(test)]
mod tests;
