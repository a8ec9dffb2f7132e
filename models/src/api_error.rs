use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Error body returned by the backend's global exception handler.
///
/// - validation failures: `{ status, message, errors: { field: message } }`
/// - everything else: `{ status, message }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub status: u16,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, String>>,
}
