//! Error types for the task-list API client.
//!
//! # Design
//! Callers of this contract do not branch on status codes, so every non-2xx
//! response lands in `RequestFailed` with the raw status and a message taken
//! from the response body text, falling back to a generic message when the
//! body is empty. JSON-layer failures get their own variants for debugging.

use std::fmt;

use crate::http::HttpResponse;

/// Message used when a failed response carries an empty body.
const FALLBACK_MESSAGE: &str = "request failed";

/// Errors returned by `TaskClient` parse methods.
#[derive(Debug)]
pub enum ApiError {
    /// The server returned a non-2xx status.
    RequestFailed { status: u16, message: String },

    /// The response body could not be deserialized into the expected type.
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    Serialization(String),
}

impl ApiError {
    /// Normalize a non-success response: the message is the response body
    /// text, or the fallback when the body is empty.
    pub(crate) fn from_response(response: &HttpResponse) -> Self {
        let message = if response.body.is_empty() {
            FALLBACK_MESSAGE.to_string()
        } else {
            response.body.clone()
        };
        ApiError::RequestFailed {
            status: response.status,
            message,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::RequestFailed { status, message } => {
                write!(f, "HTTP {status}: {message}")
            }
            ApiError::Deserialization(msg) => {
                write!(f, "deserialization failed: {msg}")
            }
            ApiError::Serialization(msg) => {
                write!(f, "serialization failed: {msg}")
            }
        }
    }
}

impl std::error::Error for ApiError {}
