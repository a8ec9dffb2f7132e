use crate::error::ApiError;
use crate::validation::ValidationErrors;

use common::HttpStatusCode;

use std::collections::BTreeMap;

/// Shown when a submit fails validation without a form-level message.
pub const CHECK_INPUT_MESSAGE: &str = "入力内容を確認してください";

/// A dismissible error scoped to the surface that triggered it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorBanner {
    pub message: String,
    /// `None` for local validation failures, `Some(0)` for network failures.
    pub status: Option<HttpStatusCode>,
}

impl ErrorBanner {
    pub fn from_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
        }
    }

    /// Search-surface banner for a rejected search form.
    pub fn from_validation(errors: &ValidationErrors) -> Self {
        Self::from_message(errors.summary().unwrap_or(CHECK_INPUT_MESSAGE))
    }

    pub fn from_api(error: &ApiError) -> Self {
        Self {
            message: error.message().to_string(),
            status: Some(error.status()),
        }
    }

    /// Banner for a failed submit.
    ///
    /// Server field errors for fields the form knows go to `field_errors`;
    /// the rest are appended to the banner message.
    pub fn from_api_with_fields(
        error: &ApiError,
        is_form_field: impl Fn(&str) -> bool,
        field_errors: &mut BTreeMap<String, String>,
    ) -> Self {
        let mut banner = Self::from_api(error);

        if let Some(server_fields) = error.field_errors() {
            let mut unmatched = Vec::new();
            for (field, message) in server_fields {
                if is_form_field(field) {
                    field_errors.insert(field.clone(), message.clone());
                } else {
                    unmatched.push(format!("{field}: {message}"));
                }
            }

            if !unmatched.is_empty() {
                banner.message = format!("{} ({})", banner.message, unmatched.join(", "));
            }
        }

        banner
    }

    pub fn is_network_failure(&self) -> bool {
        self.status.is_some_and(|status| status.is_network_failure())
    }
}
