//! Wire models exchanged with the Oshikatsu backend.
//!
//! Field names follow the backend's camelCase JSON. Models carry no behavior
//! beyond construction checks; the client-core crate operates on them.

pub mod api_error;
pub mod auth;
pub mod error;
pub mod oshi_group;

pub use api_error::ApiErrorBody;
pub use auth::{AuthResponse, AuthUser, LoginRequest, RegisterRequest};
pub use common::ErrorLocation;
pub use error::model_error::ModelError;
pub use oshi_group::builder::OshiGroupRequestBuilder;
pub use oshi_group::{CreateOshiGroupRequest, GroupId, OshiGroup, UpdateOshiGroupRequest};

#[cfg(test)]
mod tests;
