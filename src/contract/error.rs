//! Contract error types for the panel sync client
//!
//! One taxonomy for every failure mode a panel operation can surface. Errors
//! are never fatal: every operation returns `Result` and the client stays
//! usable afterwards.

use thiserror::Error;

/// Sync client errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    /// The request never produced a response (connect failure, timeout,
    /// interrupted body read)
    #[error("transport failure: {detail}")]
    Transport { detail: String },

    /// The server answered with a non-2xx status
    #[error("server returned {status}: {detail}")]
    Status { status: u16, detail: String },

    /// The response body was not valid JSON for the expected shape
    #[error("could not decode response: {detail}")]
    Decode { detail: String },

    /// A required field was empty or malformed; no network call was made
    #[error("validation failed: {message}")]
    Validation { message: String },

    /// An imported file was unreadable or not valid JSON of the expected
    /// shape; no network call was made
    #[error("import file rejected: {detail}")]
    FileFormat { detail: String },

    /// A duplicate key was rejected by policy
    #[error("conflict: {reason}")]
    Conflict { reason: String },

    /// The result was discarded because a newer request was issued for the
    /// same section
    #[error("request superseded by a newer one for section '{section}'")]
    Superseded { section: String },

    /// Configuration could not be loaded or validated
    #[error("configuration error: {detail}")]
    Config { detail: String },
}

impl SyncError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn decode(detail: impl Into<String>) -> Self {
        Self::Decode {
            detail: detail.into(),
        }
    }

    pub fn transport(detail: impl Into<String>) -> Self {
        Self::Transport {
            detail: detail.into(),
        }
    }

    /// Whether this is a 404 from the remote store.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }

    /// Whether the carrying operation was discarded as stale rather than
    /// having failed.
    pub fn is_superseded(&self) -> bool {
        matches!(self, Self::Superseded { .. })
    }
}
