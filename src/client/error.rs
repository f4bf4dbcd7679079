use reqwest::StatusCode;
use thiserror::Error;

use crate::shared::types::ErrorResponse;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Rejected locally, no request was sent
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Transport(String),
}

impl ClientError {
    /// Build an error from a failed response, preferring the body's `error`
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorResponse>(body)
            .ok()
            .map(|b| b.error)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()));

        if status == StatusCode::NOT_FOUND {
            return ClientError::NotFound(message);
        }

        ClientError::Api {
            status: status.as_u16(),
            message,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::NotFound(_))
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        ClientError::Transport(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_taken_from_body() {
        let err = ClientError::from_response(
            StatusCode::CONFLICT,
            r#"{"error":"Cannot delete category with products."}"#,
        );
        assert_eq!(err.to_string(), "Cannot delete category with products.");
        assert!(matches!(err, ClientError::Api { status: 409, .. }));
    }

    #[test]
    fn test_generic_fallback() {
        let err = ClientError::from_response(StatusCode::BAD_GATEWAY, "<html>oops</html>");
        assert_eq!(err.to_string(), "Request failed with status 502");

        let err = ClientError::from_response(StatusCode::NOT_FOUND, "");
        assert!(err.is_not_found());
    }
}
