//! Shared fixtures for the HTTP integration tests.

use client_core::api_client::ApiClient;
use client_core::token_store::{CredentialProvider, MemoryTokenStore};

use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;

pub const TEST_TOKEN: &str = "test-token-12345";

/// A port nothing listens on.
pub const REFUSED_BASE_URL: &str = "http://127.0.0.1:1";

pub fn client_with(base_url: &str, credentials: Arc<dyn CredentialProvider>) -> ApiClient {
    ApiClient::new(base_url, Duration::from_secs(5), credentials)
        .expect("Failed to build API client")
}

pub fn signed_in_client(base_url: &str) -> ApiClient {
    client_with(base_url, Arc::new(MemoryTokenStore::with_token(TEST_TOKEN)))
}

pub fn anonymous_client(base_url: &str) -> ApiClient {
    client_with(base_url, Arc::new(MemoryTokenStore::new()))
}

pub fn group_json(id: i64, name: &str, company: Option<&str>) -> Value {
    json!({
        "id": id,
        "userId": 7,
        "groupName": name,
        "company": company,
        "description": null,
        "createdAt": "2024-01-15T10:30:00",
        "updatedAt": "2024-01-15T10:30:00"
    })
}

pub fn auth_json(token: &str) -> Value {
    json!({
        "token": token,
        "type": "Bearer",
        "userId": 7,
        "username": "alice",
        "email": "alice@example.com"
    })
}
