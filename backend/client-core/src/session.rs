//! Login, registration and logout.

use crate::api::AuthApi;
use crate::error::AuthError;
use crate::token_store::CredentialProvider;
use crate::validation::{LoginForm, RegisterForm, validate_form};

use models::{AuthResponse, AuthUser, LoginRequest, RegisterRequest};

use std::sync::Arc;

use log::{debug, info};

/// The signed-in state of one client.
///
/// The token goes to the credential store; the user only lives here.
pub struct AuthSession<A: AuthApi> {
    api: A,
    credentials: Arc<dyn CredentialProvider>,
    user: Option<AuthUser>,
}

impl<A: AuthApi> AuthSession<A> {
    pub fn new(api: A, credentials: Arc<dyn CredentialProvider>) -> Self {
        Self {
            api,
            credentials,
            user: None,
        }
    }

    /// Validate, then `POST /api/auth/login`. Nothing is sent for an invalid form.
    pub async fn login(&mut self, form: &LoginForm) -> Result<&AuthUser, AuthError> {
        let form = validate_form(form).map_err(AuthError::Validation)?;
        let request = LoginRequest::from(form);

        debug!("Logging in as {}", request.username);
        let response = self.api.login(&request).await?;
        Ok(self.accept(response))
    }

    /// Validate, then `POST /api/auth/register`. Nothing is sent for an invalid form.
    pub async fn register(&mut self, form: &RegisterForm) -> Result<&AuthUser, AuthError> {
        let form = validate_form(form).map_err(AuthError::Validation)?;
        let request = RegisterRequest::from(form);

        debug!("Registering {}", request.username);
        let response = self.api.register(&request).await?;
        Ok(self.accept(response))
    }

    pub fn logout(&mut self) {
        self.credentials.clear();
        if let Some(user) = self.user.take() {
            info!("Logged out {}", user.username);
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.credentials.get().is_some()
    }

    pub fn user(&self) -> Option<&AuthUser> {
        self.user.as_ref()
    }

    fn accept(&mut self, response: AuthResponse) -> &AuthUser {
        let (token, user) = response.into_parts();
        self.credentials.set(&token);
        info!("Signed in as {} (user {})", user.username, user.user_id);
        self.user.insert(user)
    }
}
