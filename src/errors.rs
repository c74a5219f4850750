use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;

/// Why one provider could not answer a lookup attempt.
///
/// This type never leaves the lookup pipeline: every transport, status, or
/// payload problem is absorbed at the adapter boundary and converted into
/// one of these variants, and the orchestrator reacts by moving on to the
/// next provider. Callers of `lookup` only ever see a `CompanyRecord`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderUnavailable {
    /// HTTP 429 — the provider's request budget for this window is spent.
    RateLimited,
    /// Any other non-200 status.
    Status(u16),
    /// The request exceeded the provider's timeout.
    Timeout,
    /// Connection-level failure (DNS, TLS, refused, ...).
    Transport(String),
    /// 200 response whose body could not be decoded.
    MalformedPayload(String),
    /// 200 response decoded fine but carried no usable field.
    InsufficientData,
}

impl ProviderUnavailable {
    /// Maps a reqwest send error, keeping timeouts distinguishable.
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProviderUnavailable::Timeout
        } else {
            ProviderUnavailable::Transport(err.to_string())
        }
    }
}

impl fmt::Display for ProviderUnavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderUnavailable::RateLimited => write!(f, "rate limited (HTTP 429)"),
            ProviderUnavailable::Status(code) => write!(f, "unexpected HTTP status {}", code),
            ProviderUnavailable::Timeout => write!(f, "request timed out"),
            ProviderUnavailable::Transport(msg) => write!(f, "transport error: {}", msg),
            ProviderUnavailable::MalformedPayload(msg) => write!(f, "malformed payload: {}", msg),
            ProviderUnavailable::InsufficientData => write!(f, "payload carried no usable field"),
        }
    }
}

/// Application-specific error types for the HTTP layer.
#[derive(Debug, Clone)]
pub enum AppError {
    /// Bad request error (invalid input).
    BadRequest(String),
    /// Error setting up or talking to an external dependency.
    ExternalApiError(String),
}

impl fmt::Display for AppError {
    /// Formats the error for display.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::ExternalApiError(msg) => write!(f, "External API error: {}", msg),
        }
    }
}

impl IntoResponse for AppError {
    /// Converts the error into an HTTP response.
    ///
    /// Maps each error variant to an appropriate HTTP status code and JSON body.
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::ExternalApiError(msg) => {
                tracing::error!("External API error: {}", msg);
                (
                    StatusCode::BAD_GATEWAY,
                    "External service error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_unavailable_display() {
        assert_eq!(
            ProviderUnavailable::RateLimited.to_string(),
            "rate limited (HTTP 429)"
        );
        assert_eq!(
            ProviderUnavailable::Status(503).to_string(),
            "unexpected HTTP status 503"
        );
        assert_eq!(
            ProviderUnavailable::InsufficientData.to_string(),
            "payload carried no usable field"
        );
    }
}
