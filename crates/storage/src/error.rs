//! Store error types
//!
//! Every backend maps its native failures onto [`StoreError`] so the facade
//! can wrap them with the key involved without knowing the backend.

use kvs_core::ConfigError;
use thiserror::Error;

/// Result type alias for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Errors raised by store backends and clients
#[derive(Debug, Error)]
pub enum StoreError {
    /// Could not open a client session
    #[error("connection failed: {0}")]
    Connection(String),

    /// The store rejected or failed a command
    #[error("backend error: {0}")]
    Backend(String),

    /// Text-mode read of a value that is not UTF-8
    #[error("value at '{key}' is not valid UTF-8 text")]
    NotText {
        /// Key read
        key: String,
    },

    /// Increment of a value that is not a decimal integer
    #[error("value at '{key}' is not an integer")]
    NotInteger {
        /// Key incremented
        key: String,
    },

    /// Backend not compiled in or not supported
    #[error("unsupported backend: {0}")]
    Unsupported(String),

    /// Failure injected by a test backend
    #[error("injected {0} failure")]
    Injected(&'static str),

    /// Backend configuration is invalid
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl StoreError {
    /// Check if this error came from the transport rather than the data.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            StoreError::Connection(_) | StoreError::Backend(_) | StoreError::Injected(_)
        )
    }
}
