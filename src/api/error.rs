use serde::Deserialize;
use thiserror::Error;

use crate::auth::TokenError;

#[derive(Error, Debug)]
pub enum ApiError {
    /// 400-level rejection with the backend's own message, e.g. a failed
    /// login's `non_field_errors` or a serializer `detail`.
    #[error("{0}")]
    BadRequest(String),

    #[error("Unauthorized - token may be expired or revoked")]
    Unauthorized,

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Session storage error: {0}")]
    Session(#[from] TokenError),
}

/// Maximum length for error messages lifted from response bodies.
const MAX_ERROR_BODY_LENGTH: usize = 500;

/// Error body shapes the backend emits.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<String>,
    #[serde(default)]
    non_field_errors: Vec<String>,
}

impl ApiError {
    /// Truncate a message to avoid carrying an entire response body around.
    fn truncate(message: &str) -> String {
        if message.len() <= MAX_ERROR_BODY_LENGTH {
            message.to_string()
        } else {
            format!(
                "{}... (truncated, {} total bytes)",
                &message[..MAX_ERROR_BODY_LENGTH],
                message.len()
            )
        }
    }

    /// Pull `detail` or `non_field_errors` out of an error body.
    fn extract_message(body: &str) -> Option<String> {
        let parsed: ErrorBody = serde_json::from_str(body).ok()?;
        if let Some(detail) = parsed.detail {
            return Some(detail);
        }
        if !parsed.non_field_errors.is_empty() {
            return Some(parsed.non_field_errors.join("; "));
        }
        None
    }

    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let message = Self::extract_message(body)
            .map(|m| Self::truncate(&m))
            .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));

        match status.as_u16() {
            401 => ApiError::Unauthorized,
            403 => ApiError::AccessDenied(message),
            404 => ApiError::NotFound(message),
            400..=499 => ApiError::BadRequest(message),
            500..=599 => ApiError::ServerError(message),
            _ => ApiError::InvalidResponse(format!("Status {}: {}", status, message)),
        }
    }
}
