use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("An account with this email already exists")]
    AccountExists,

    #[error("Request rejected: {0}")]
    Rejected(String),

    #[error("Rate limited - please wait before retrying")]
    RateLimited,

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Shown when a failure carries no usable detail of its own.
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

/// Error payload the identity service sends on failures.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<String>,
    message: Option<String>,
}

impl ApiError {
    /// Truncate a response body to avoid logging excessive data
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            body.to_string()
        } else {
            format!(
                "{}... (truncated, {} total bytes)",
                &body[..MAX_ERROR_BODY_LENGTH],
                body.len()
            )
        }
    }

    /// Pull the human-readable detail out of an error response body,
    /// falling back to the (truncated) raw body.
    fn detail_from_body(body: &str) -> String {
        if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
            if let Some(detail) = parsed.detail.or(parsed.message) {
                if !detail.is_empty() {
                    return detail;
                }
            }
        }
        Self::truncate_body(body)
    }

    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        match status.as_u16() {
            401 => ApiError::InvalidCredentials,
            409 => ApiError::AccountExists,
            400 | 422 => ApiError::Rejected(Self::detail_from_body(body)),
            429 => ApiError::RateLimited,
            500..=599 => ApiError::ServerError(Self::detail_from_body(body)),
            _ => ApiError::InvalidResponse(format!(
                "Status {}: {}",
                status,
                Self::truncate_body(body)
            )),
        }
    }

    /// Message suitable for showing directly to the user.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::InvalidCredentials
            | ApiError::AccountExists
            | ApiError::RateLimited
            | ApiError::Rejected(_) => self.to_string(),
            ApiError::NetworkError(_)
            | ApiError::ServerError(_)
            | ApiError::InvalidResponse(_) => GENERIC_ERROR_MESSAGE.to_string(),
        }
    }
}

/// User-facing message for any failure out of a submission handler.
/// Falls back to the generic message when the chain holds no `ApiError`.
pub fn surface_message(err: &anyhow::Error) -> String {
    match err.downcast_ref::<ApiError>() {
        Some(api_err) => api_err.user_message(),
        None => GENERIC_ERROR_MESSAGE.to_string(),
    }
}
