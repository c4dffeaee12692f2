// src/core/error.rs
//! Normalized failure type for every call made through the service client

use reqwest::StatusCode;
use serde::Deserialize;

/// Error body convention used by the remote service: `{ "error": "..." }`.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Network unreachable, connection refused, DNS or body read failure.
    #[error("{0}")]
    Transport(String),

    /// Non-2xx status. `message` is the server's own text when it sent one.
    #[error("{message}")]
    Remote { status: u16, message: String },

    /// The response arrived but did not have the expected shape.
    #[error("Invalid response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Build the normalized error for a non-success status from its raw body.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|parsed| parsed.error)
            .filter(|msg| !msg.trim().is_empty())
            .unwrap_or_else(|| {
                format!(
                    "HTTP {}: {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("")
                )
            });

        ApiError::Remote {
            status: status.as_u16(),
            message,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}
