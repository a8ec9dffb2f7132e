pub mod api;
pub mod auth;
pub mod config;
pub mod token_store;
pub mod workflow;

pub use api::ApiError;
pub use auth::AuthError;
pub use config::ConfigError;
pub use token_store::TokenStoreError;
pub use workflow::WorkflowError;

