//! Remote backend error types.

use thiserror::Error;

/// Errors that can occur talking to the hosted backend.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// HTTP request failed or returned a non-success status.
    #[error("Backend request failed: {0}")]
    RequestFailed(String),

    /// Response body was not valid JSON or did not match the expected shape.
    #[error("Failed to parse backend response: {0}")]
    ParseError(String),

    /// Request timed out.
    #[error("Backend request timed out after {0}ms")]
    Timeout(u64),

    /// Backend is unreachable or no backend is configured.
    #[error("Backend unavailable: {0}")]
    Unavailable(String),

    /// The user has no XP ledger row. Rows are provisioned at signup, so
    /// this indicates a provisioning problem, not a fresh account.
    #[error("No XP ledger row for user {0}")]
    LedgerMissing(String),

    /// A conditional ledger write matched no row: the total changed between
    /// the caller's read and this write.
    #[error("Ledger write conflict: total_xp is no longer {expected}")]
    Conflict {
        /// The total the write was conditioned on.
        expected: u64,
    },
}

impl From<reqwest::Error> for RemoteError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RemoteError::Timeout(0)
        } else if err.is_connect() {
            RemoteError::Unavailable(err.to_string())
        } else {
            RemoteError::RequestFailed(err.to_string())
        }
    }
}

impl RemoteError {
    /// Whether this failure is a compare-and-swap conflict, as opposed to a
    /// transport or backend fault.
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, RemoteError::Conflict { .. })
    }
}
