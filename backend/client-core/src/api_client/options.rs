use crate::error::ApiError;

use reqwest::Method;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;

/// Per-call options for [`super::ApiClient::request`].
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    /// Serialized JSON payload. Takes precedence over `body`.
    pub json: Option<Vec<u8>>,
    /// Raw payload, used only when `json` is absent.
    pub body: Option<Vec<u8>>,
    /// Do not attach the bearer credential (login, register).
    pub skip_auth: bool,
    pub headers: HeaderMap,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            json: None,
            body: None,
            skip_auth: false,
            headers: HeaderMap::new(),
        }
    }
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn post() -> Self {
        Self::default().with_method(Method::POST)
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Serialize `payload` as the JSON body.
    #[track_caller]
    pub fn with_json<T: Serialize + ?Sized>(mut self, payload: &T) -> Result<Self, ApiError> {
        let bytes = serde_json::to_vec(payload)
            .map_err(|e| ApiError::request(format!("Failed to serialize request body: {e}")))?;
        self.json = Some(bytes);
        Ok(self)
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn skip_auth(mut self) -> Self {
        self.skip_auth = true;
        self
    }

    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}
