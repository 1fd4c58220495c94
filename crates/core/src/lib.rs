//! Core types for kvs
//!
//! This crate holds the pure parts of the store facade:
//! - Key construction: `build_key`, `job_key`, `product_key`, `sites_key`
//! - Identifiers: truncated random ids and `<prefix>:<n>` internal ids
//! - Configuration: `KvsConfig` loaded from `kvs.toml`
//! - Errors: `KeyError`, `ConfigError`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod id;
pub mod key;

pub use config::{BackendKind, KvsConfig, SequenceMode, CONFIG_FILE_NAME};
pub use error::ConfigError;
pub use id::{
    internal_id, random_id, BLOCK_ID_PREFIX, DEFAULT_RANDOM_ID_LENGTH, INTERNAL_ID_SEPARATOR,
    MAX_RANDOM_ID_LENGTH,
};
pub use key::{
    build_key, job_key, product_key, sites_key, try_build_key, KeyError, JOB_KEY_TOKEN,
    KEY_SEPARATOR, SITES_KEY_TOKEN,
};
