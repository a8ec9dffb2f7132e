//! Typed backend endpoints on top of [`crate::api_client::ApiClient`].
//!
//! Each resource is a trait so workflows can run against a fake in tests.

pub mod auth;
pub mod oshi_group;

pub use auth::AuthApi;
pub use oshi_group::OshiGroupApi;
