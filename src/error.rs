//! Error type shared by every stage of a generate call.

use thiserror::Error;

/// Errors that can occur when calling the generate endpoint.
#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Generate request failed ({status}): {message}")]
    Remote {
        status: u16,
        message: String,
        code: Option<String>,
        details: Option<serde_json::Value>,
    },
}

impl Error {
    pub fn config(message: impl Into<String>) -> Self {
        Error::Config(message.into())
    }

    pub fn remote(status: u16, message: impl Into<String>) -> Self {
        Error::Remote {
            status,
            message: message.into(),
            code: None,
            details: None,
        }
    }

    /// True when the call was rejected before any network activity.
    pub fn is_config(&self) -> bool {
        matches!(self, Error::Config(_))
    }

    /// HTTP status of a remote failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Remote { status, .. } => Some(*status),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
