use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use waifu_markup::MarkupError;

pub type Result<T> = std::result::Result<T, TtsError>;

/// Voice service errors with appropriate HTTP status codes
#[derive(Debug, Error)]
pub enum TtsError {
    /// Text transformation failed (unknown ids or malformed input)
    #[error(transparent)]
    Markup(#[from] MarkupError),

    /// No synthesis provider is configured
    #[error("Speech synthesis is not available, no provider is configured")]
    ProviderUnavailable,

    /// Provider rejected the configured credentials
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Provider API returned an error
    #[error("Provider API error ({status}): {message}")]
    ProviderApiError { status: u16, message: String },

    /// Network or connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Provider did not answer within the configured timeout
    #[error("Provider request timed out")]
    Timeout,

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Internal server error
    /// If Some(message), it came from a provider and can be shown
    /// If None, it's an internal error and should not leak details
    #[error("Internal server error")]
    InternalError(Option<String>),
}

impl TtsError {
    /// Get the appropriate HTTP status code for this error
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Markup(e) if e.is_request_error() => StatusCode::BAD_REQUEST,
            Self::ProviderUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::AuthenticationFailed(_) => StatusCode::UNAUTHORIZED,
            Self::ConnectionError(_) => StatusCode::BAD_GATEWAY,
            Self::Timeout => StatusCode::GATEWAY_TIMEOUT,
            Self::ProviderApiError { status, .. } => match *status {
                400 => StatusCode::BAD_REQUEST,
                401 => StatusCode::UNAUTHORIZED,
                403 => StatusCode::FORBIDDEN,
                429 => StatusCode::TOO_MANY_REQUESTS,
                _ => StatusCode::BAD_GATEWAY,
            },
            Self::Markup(_) | Self::ConfigError(_) | Self::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error type string for the response
    pub const fn error_type(&self) -> &str {
        match self {
            Self::Markup(e) if e.is_request_error() => "invalid_request_error",
            Self::ProviderUnavailable => "service_unavailable",
            Self::AuthenticationFailed(_) => "authentication_error",
            Self::ConnectionError(_) | Self::Timeout | Self::ProviderApiError { .. } => "api_error",
            Self::Markup(_) | Self::ConfigError(_) | Self::InternalError(_) => "internal_error",
        }
    }

    /// Message that is safe to expose to API consumers
    pub fn client_message(&self) -> String {
        match self {
            Self::InternalError(Some(provider_msg)) => provider_msg.clone(),
            Self::InternalError(None) | Self::ConfigError(_) => "Internal server error".to_owned(),
            _ => self.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorDetails,
}

#[derive(Debug, Serialize)]
struct ErrorDetails {
    message: String,
    r#type: String,
    code: u16,
}

impl IntoResponse for TtsError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!("request failed: {self}");
        }

        let error_response = ErrorResponse {
            error: ErrorDetails {
                message: self.client_message(),
                r#type: self.error_type().to_owned(),
                code: status.as_u16(),
            },
        };

        (status, Json(error_response)).into_response()
    }
}
