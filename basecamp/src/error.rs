//! Tipos de erro para o crate basecamp

use thiserror::Error;

/// Erros do cliente Basecamp
#[derive(Debug, Error)]
pub enum BasecampError {
    /// Erro de requisição HTTP
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Erro da API do Basecamp (status code não-2xx), com o corpo da resposta
    #[error("Basecamp API error (status {status}): {body}")]
    ApiError { status: u16, body: String },

    /// Erro de parsing JSON
    #[error("JSON parsing failed: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Erro de configuração
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl BasecampError {
    /// Corpo da resposta upstream, quando a API respondeu com erro
    pub fn response_body(&self) -> Option<&str> {
        match self {
            BasecampError::ApiError { body, .. } => Some(body),
            _ => None,
        }
    }
}

/// Tipo Result padrão para o crate
pub type Result<T> = std::result::Result<T, BasecampError>;
