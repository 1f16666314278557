//! Error types for the reporting client

use rsuite_config::ConfigError;
use rsuite_query::QueryError;
use thiserror::Error;

/// Result type for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur while talking to the reporting API
#[derive(Error, Debug)]
pub enum ClientError {
    /// Failed to initialize the client (e.g., HTTP client creation failed)
    #[error("failed to initialize client: {0}")]
    Init(String),

    /// HTTP request failed before a response was read
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The API answered with an error document
    #[error("API error {code} (HTTP {status}): {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
        error_id: Option<String>,
    },

    /// The response did not have the expected shape
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Query could not be compiled
    #[error(transparent)]
    Query(#[from] QueryError),

    /// Configuration is incomplete
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ClientError {
    pub(crate) fn unexpected(message: impl Into<String>) -> Self {
        Self::UnexpectedResponse(message.into())
    }
}
