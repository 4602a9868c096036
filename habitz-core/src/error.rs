//! Error types for the HABITZ core library.

use thiserror::Error;

/// Top-level error type for core operations.
///
/// The level math itself is total and never fails; errors here come from the
/// configuration surface.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type alias.
pub type Result<T> = std::result::Result<T, CoreError>;
