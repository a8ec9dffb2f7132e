use super::api::ApiError;
use crate::validation::ValidationErrors;

use thiserror::Error as ThisError;

/// Failure of a login or registration attempt.
#[derive(Debug, ThisError)]
pub enum AuthError {
    /// The form failed local validation; nothing was sent.
    #[error("Auth Validation Error: {0}")]
    Validation(ValidationErrors),

    #[error(transparent)]
    Api(#[from] ApiError),
}
