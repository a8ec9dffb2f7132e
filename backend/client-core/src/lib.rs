//! Client core for the oshikatsu backend: credential storage, the HTTP
//! client, form validation, and the page workflows built on top of them.

pub mod api;
pub mod api_client;
pub mod config;
pub mod error;
pub mod navigation;
pub mod session;
pub mod token_store;
pub mod validation;
pub mod workflow;

#[cfg(test)]
mod tests;

pub const DEFAULT_API_HOST: &str = "localhost";
pub const DEFAULT_API_PORT: u16 = 8080;
pub const DEFAULT_API_BASE_URL: &str =
    const_format::concatcp!("http://", DEFAULT_API_HOST, ":", DEFAULT_API_PORT);
