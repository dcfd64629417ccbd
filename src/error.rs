//! Inspector error types.
//!
//! Only the ambient layer (configuration, the gateway client, CLI input)
//! produces errors. The payload core in [`crate::payload`] never does: malformed
//! captures degrade to fallback text or `None` instead.

use thiserror::Error;

/// Inspector errors.
#[derive(Error, Debug)]
pub enum InspectorError {
    /// Configuration error.
    #[error("Config error: {0}")]
    Config(String),

    /// Network communication error.
    #[error("Network error: {0}")]
    Network(String),

    /// The gateway rejected the credential (HTTP 401).
    ///
    /// Callers holding a session should discard it and ask for a new login.
    #[error("Unauthorized: session is missing or expired")]
    Unauthorized,

    /// The gateway answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Message taken from the response body, or a generic one.
        message: String,
    },

    /// The gateway answered successfully but not with JSON.
    #[error("Unexpected response from server: {0}")]
    UnexpectedResponse(String),

    /// Unknown API type name.
    #[error("Invalid API type: {0}")]
    InvalidApiType(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for inspector operations
pub type Result<T> = std::result::Result<T, InspectorError>;

impl From<reqwest::Error> for InspectorError {
    fn from(err: reqwest::Error) -> Self {
        InspectorError::Network(err.to_string())
    }
}

impl From<toml::de::Error> for InspectorError {
    fn from(err: toml::de::Error) -> Self {
        InspectorError::Config(err.to_string())
    }
}
