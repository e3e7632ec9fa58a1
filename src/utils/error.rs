use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use basecamp::BasecampError;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    BasecampApi(BasecampError),
    OAuthApi { status: u16, body: String },
    ConfigError(String),
    ValidationError(String),
    JsonError(serde_json::Error),
    HttpError(reqwest::Error),
    InternalError(String),
}

impl AppError {
    /// Corpo da resposta upstream, quando a falha veio de uma chamada à API
    ///
    /// Usado no boundary de contenção do webhook: o payload da plataforma é
    /// preferido ao erro genérico na hora de logar.
    pub fn upstream_body(&self) -> Option<&str> {
        match self {
            AppError::BasecampApi(err) => err.response_body(),
            AppError::OAuthApi { body, .. } => Some(body),
            _ => None,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::BasecampApi(err) => write!(f, "Basecamp API error: {}", err),
            AppError::OAuthApi { status, body } => {
                write!(f, "OAuth token endpoint error (status {}): {}", status, body)
            }
            AppError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            AppError::JsonError(err) => write!(f, "JSON error: {}", err),
            AppError::HttpError(err) => write!(f, "HTTP error: {}", err),
            AppError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<BasecampError> for AppError {
    fn from(err: BasecampError) -> Self {
        AppError::BasecampApi(err)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::JsonError(err)
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::HttpError(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::BasecampApi(err) => (StatusCode::BAD_GATEWAY, err.to_string()),
            AppError::OAuthApi { status, body } => {
                (StatusCode::BAD_GATEWAY, format!("OAuth error ({}): {}", status, body))
            }
            AppError::ConfigError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::JsonError(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            AppError::HttpError(err) => (StatusCode::BAD_GATEWAY, err.to_string()),
            AppError::InternalError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = json!({
            "error": error_message,
            "status": status.as_u16()
        });

        (status, axum::Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
