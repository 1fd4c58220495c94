//! Error types for kvs-core
//!
//! Key construction errors live next to the key rules in [`crate::key`];
//! this module holds configuration errors.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read config file '{}': {source}", path.display())]
    Read {
        /// File path
        path: PathBuf,
        /// Underlying I/O error
        source: io::Error,
    },

    /// Config file could not be written
    #[error("failed to write config file '{}': {source}", path.display())]
    Write {
        /// File path
        path: PathBuf,
        /// Underlying I/O error
        source: io::Error,
    },

    /// Config file is not valid TOML for [`crate::KvsConfig`]
    #[error("failed to parse config file '{}': {reason}", path.display())]
    Parse {
        /// File path
        path: PathBuf,
        /// Parser message
        reason: String,
    },

    /// Config could not be serialized
    #[error("failed to serialize config: {0}")]
    Serialize(String),

    /// A setting has a value outside its allowed set
    #[error("invalid {field} '{value}' in config, expected {expected}")]
    InvalidValue {
        /// Setting name
        field: &'static str,
        /// Value found
        value: String,
        /// Allowed values
        expected: &'static str,
    },
}
