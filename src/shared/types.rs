use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Error body returned by every failing endpoint.
///
/// `error` is meant to be shown to the user verbatim; `errors` carries the
/// individual validation messages when there are several.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, errors: Option<Vec<String>>) -> Self {
        Self {
            error: error.into(),
            errors,
        }
    }
}
