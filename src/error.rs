//! Error types for the facade.
//!
//! Callers branch on the variant: a missing key is `Ok(None)`, never an
//! error, and a stored value that fails to decode is reported separately from
//! a store that could not be reached.

use kvs_core::{ConfigError, KeyError};
use kvs_store::StoreError;
use thiserror::Error;

/// All facade errors.
#[derive(Debug, Error)]
pub enum Error {
    /// Value could not be encoded as JSON before a write
    #[error("invalid input: {reason}")]
    InvalidInput {
        /// Serializer message
        reason: String,
    },

    /// Key parts were rejected by strict key construction
    #[error("invalid key: {0}")]
    InvalidKey(#[from] KeyError),

    /// Reading a key failed in the store or its transport
    #[error("cannot read key {key}: {source}")]
    StoreRead {
        /// Key read
        key: String,
        /// Store failure
        #[source]
        source: StoreError,
    },

    /// Writing a key failed in the store or its transport
    #[error("cannot write key {key}: {source}")]
    StoreWrite {
        /// Key written
        key: String,
        /// Store failure
        #[source]
        source: StoreError,
    },

    /// A value is present but does not decode as the requested JSON type
    #[error("malformed value at key {key}: {reason}")]
    MalformedValue {
        /// Key read
        key: String,
        /// Payload as stored
        raw: String,
        /// Decoder message
        reason: String,
    },

    /// Store failure outside a keyed read or write (backend setup, sequences)
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration could not be loaded or is invalid
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The operation was removed
    #[error("{operation} is deprecated: {replacement}")]
    Deprecated {
        /// Removed operation
        operation: &'static str,
        /// What to do instead
        replacement: &'static str,
    },
}

/// Result type for facade operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if the store or its transport failed.
    pub fn is_store_failure(&self) -> bool {
        matches!(
            self,
            Error::StoreRead { .. } | Error::StoreWrite { .. } | Error::Store(_)
        )
    }

    /// Check if a stored value failed to decode.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Error::MalformedValue { .. })
    }

    /// Check if a removed operation was called.
    pub fn is_deprecated(&self) -> bool {
        matches!(self, Error::Deprecated { .. })
    }

    /// Key involved, for keyed failures.
    pub fn key(&self) -> Option<&str> {
        match self {
            Error::StoreRead { key, .. }
            | Error::StoreWrite { key, .. }
            | Error::MalformedValue { key, .. } => Some(key),
            _ => None,
        }
    }
}
