use crate::api_client::{ApiClient, RequestOptions};
use crate::error::ApiError;

use models::{AuthResponse, LoginRequest, RegisterRequest};

use std::future::Future;
use std::sync::Arc;

pub const LOGIN_PATH: &str = "/api/auth/login";
pub const REGISTER_PATH: &str = "/api/auth/register";

/// Authentication endpoints. Both skip the bearer header.
pub trait AuthApi: Send + Sync {
    fn login(
        &self,
        request: &LoginRequest,
    ) -> impl Future<Output = Result<AuthResponse, ApiError>> + Send;

    fn register(
        &self,
        request: &RegisterRequest,
    ) -> impl Future<Output = Result<AuthResponse, ApiError>> + Send;
}

impl AuthApi for ApiClient {
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        let options = RequestOptions::post().with_json(request)?.skip_auth();
        self.request_json(LOGIN_PATH, options).await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        let options = RequestOptions::post().with_json(request)?.skip_auth();
        self.request_json(REGISTER_PATH, options).await
    }
}

impl<T: AuthApi> AuthApi for Arc<T> {
    fn login(
        &self,
        request: &LoginRequest,
    ) -> impl Future<Output = Result<AuthResponse, ApiError>> + Send {
        (**self).login(request)
    }

    fn register(
        &self,
        request: &RegisterRequest,
    ) -> impl Future<Output = Result<AuthResponse, ApiError>> + Send {
        (**self).register(request)
    }
}
