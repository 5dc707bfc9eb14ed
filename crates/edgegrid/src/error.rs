//! Transport-level error types

use thiserror::Error;

/// Errors produced before a response is obtained from the remote API.
///
/// Remote API failures (non-success status codes) are not represented here;
/// the session returns those responses untouched and the API crates decode
/// them into their own error types.
#[derive(Error, Debug)]
pub enum SessionError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// JSON serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Missing environment variable
    #[error("missing environment variable: {0}")]
    MissingEnvVar(String),

    /// Invalid URL
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

impl SessionError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a missing env var error
    pub fn missing_env(var: impl Into<String>) -> Self {
        Self::MissingEnvVar(var.into())
    }
}
