//! Client-side error types.

use std::fmt;

/// Errors surfaced to the list client by a [`crate::client::BookmarkApi`].
///
/// Cloneable so a failed page can keep its error for inline display while
/// the same value is logged or turned into a notice.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    /// Transport failed before a response arrived (connect, timeout, reset).
    #[error("network error: {0}")]
    Network(String),

    /// The server answered 404.
    #[error("{message}")]
    NotFound { message: String },

    /// The server rejected the input (400).
    #[error("{message}")]
    Validation { message: String, fields: Vec<String> },

    /// Any other non-success status.
    #[error("server returned {status}: {message}")]
    Server { status: u16, message: String },

    /// The response body could not be decoded.
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl ClientError {
    pub fn not_found(id: impl fmt::Display) -> Self {
        ClientError::NotFound {
            message: format!("Bookmark with ID {id} not found"),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::NotFound { .. })
    }
}
