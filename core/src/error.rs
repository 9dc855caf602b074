//! Error types for the home API client.
//!
//! # Design
//! A 404 on read is not an error: `HomeResource::read` returns `Ok(None)`.
//! Every other unexpected status lands in `UnexpectedStatus` with the raw
//! status code, reason phrase and body so the host can show them verbatim.

use std::fmt;

use thiserror::Error;

/// The resource operation a failed request belonged to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Read,
    Update,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::Create => "create",
            Operation::Read => "read",
            Operation::Update => "update",
            Operation::Delete => "delete",
        })
    }
}

/// Errors returned by the home API client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Provider configuration failed validation before any network call.
    #[error("invalid provider configuration: {0}")]
    InvalidConfig(String),

    /// The request URL could not be constructed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The HTTP call could not be executed (DNS, connect, I/O).
    #[error("transport error: {0}")]
    Transport(String),

    /// The HTTP call exceeded the configured timeout.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The service answered with a status outside the operation's success set.
    #[error(
        "failed to {operation} home resource, status_code: {status}, status: {status_text}, body: {body}"
    )]
    UnexpectedStatus {
        operation: Operation,
        status: u16,
        status_text: String,
        body: String,
    },
}

impl ApiError {
    /// HTTP status carried by the error, if the service answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}
