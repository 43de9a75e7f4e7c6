//! Error types for the entity client.
//!
//! # Design
//! Every non-200 answer becomes `UnexpectedStatus` with the raw status code
//! and body, whatever the operation. Transport failures keep the
//! transport's own error as their `source()` so callers can downcast to it.

use thiserror::Error;

/// Error reported by a `Transport` when the round-trip itself fails
/// (connection refused, DNS, TLS, ...).
pub type TransportError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors returned by `EntityApi` and `EntityClient` operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The HTTP round-trip failed before a response was received.
    #[error("transport failed: {0}")]
    Transport(#[source] TransportError),

    /// The service answered with a status other than 200.
    #[error("unexpected HTTP status {status}: {}", String::from_utf8_lossy(.body))]
    UnexpectedStatus { status: u16, body: Vec<u8> },

    /// A 200 response body did not parse into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(#[source] serde_json::Error),
}

impl ApiError {
    /// Status code of an `UnexpectedStatus` error.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
