// src/error.rs

//! Unified error handling for hackdash.

use thiserror::Error;

/// Result type alias for hackdash operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum Error {
    /// Server answered with a non-200 status. Distinct from transport
    /// failures: the response body is kept for diagnosis.
    #[error("status {status}: {body}")]
    Status { status: u16, body: String },

    /// HTTP transport failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a status error from a response body.
    pub fn status(status: u16, body: &[u8]) -> Self {
        Self::Status {
            status,
            body: String::from_utf8_lossy(body).into_owned(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}
