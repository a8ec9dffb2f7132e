//! The single chokepoint for backend calls.
//!
//! Every request goes through [`ApiClient::request`], which attaches the
//! bearer credential, resolves the URL against the configured base, and folds
//! every failure into [`ApiError`]. One call is one round trip: no retries,
//! no caching.

pub mod error_body;
pub mod options;

pub use options::RequestOptions;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::token_store::CredentialProvider;

use error_body::parse_error_response;

use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};
use reqwest::{Client, StatusCode};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderValue};
use serde::de::DeserializeOwned;
use url::Url;

const JSON_CONTENT_TYPE: &str = "application/json";

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    client: Client,
    credentials: Arc<dyn CredentialProvider>,
}

impl ApiClient {
    /// Build a client for `base_url` (no trailing slash needed).
    pub fn new(
        base_url: &str,
        timeout: Duration,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Result<Self, ApiError> {
        Url::parse(base_url)
            .map_err(|e| ApiError::request(format!("Invalid base URL {base_url}: {e}")))?;

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::request(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            credentials,
        })
    }

    pub fn from_config(
        config: &ClientConfig,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Result<Self, ApiError> {
        Self::new(&config.api.base_url, config.timeout(), credentials)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn credentials(&self) -> &Arc<dyn CredentialProvider> {
        &self.credentials
    }

    /// Absolute `http(s)` URLs are used verbatim; anything else is appended to the base URL.
    pub fn resolve_url(&self, path: &str) -> Result<Url, ApiError> {
        if let Ok(url) = Url::parse(path) {
            if matches!(url.scheme(), "http" | "https") {
                return Ok(url);
            }
        }

        let joined = if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        };

        Url::parse(&joined).map_err(|e| ApiError::request(format!("Invalid URL {joined}: {e}")))
    }

    /// Issue one request.
    ///
    /// Returns `Ok(None)` for 2xx responses without a JSON body.
    ///
    /// # Errors
    /// Always [`ApiError`]: status `0` for transport failures, the response
    /// status (or the body's own status) otherwise.
    pub async fn request<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<Option<T>, ApiError> {
        let (_, body) = self.execute(path, options).await?;
        Ok(body)
    }

    /// Like [`Self::request`] for endpoints that always return a body.
    pub async fn request_json<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        let (status, body) = self.execute(path, options).await?;
        body.ok_or_else(|| ApiError::decode(status.as_u16(), "レスポンスが空です"))
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<(StatusCode, Option<T>), ApiError> {
        let RequestOptions {
            method,
            json,
            body,
            skip_auth,
            mut headers,
        } = options;

        if json.is_some() {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
        }

        if !skip_auth {
            if let Some(token) = self.credentials.get() {
                let mut value = HeaderValue::from_str(&token.bearer_header_value())
                    .map_err(|_| ApiError::request("Stored auth token is not a valid header value"))?;
                value.set_sensitive(true);
                headers.insert(AUTHORIZATION, value);
            }
        }

        let url = self.resolve_url(path)?;
        debug!("{} {}", method, url);

        let mut builder = self.client.request(method.clone(), url.clone()).headers(headers);
        if let Some(payload) = json.or(body) {
            builder = builder.body(payload);
        }

        let response = builder.send().await.map_err(|e| {
            warn!("{} {} failed before a response: {}", method, url, e);
            ApiError::network(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let error = parse_error_response(response).await;
            warn!("{} {} -> {}", method, url, error);
            return Err(error);
        }

        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|content_type| content_type.contains(JSON_CONTENT_TYPE));

        if !is_json {
            debug!("{} {} -> {} (no JSON body)", method, url, status.as_u16());
            return Ok((status, None));
        }

        let bytes = response.bytes().await.map_err(|e| {
            warn!("{} {} body read failed: {}", method, url, e);
            ApiError::network(e.to_string())
        })?;

        if bytes.is_empty() {
            return Ok((status, None));
        }

        let decoded = serde_json::from_slice::<T>(&bytes).map_err(|e| {
            ApiError::decode(
                status.as_u16(),
                format!("レスポンスの形式が正しくありません: {e}"),
            )
        })?;

        debug!("{} {} -> {}", method, url, status.as_u16());
        Ok((status, Some(decoded)))
    }
}
