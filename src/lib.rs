//! kvs - key-value facade for job and block records
//!
//! Computation jobs keep their intermediate records in a shared key-value
//! store. This crate is the thin layer in front of that store: it builds
//! keys from identifier tuples, moves JSON or raw values in and out, and
//! hands out block ids.
//!
//! # Quick Start
//!
//! ```
//! use kvs::prelude::*;
//!
//! let kv = KeyValueFacade::in_memory();
//!
//! let block = kv.next_block_id()?;
//! let key = product_key(7, "hazard", &block, "site-1");
//! assert_eq!(key, "7!hazard!BLOCK:1!site-1");
//!
//! kv.set_json(&key, &vec![0.1, 0.2])?;
//! assert_eq!(kv.get_json::<Vec<f64>>(&key)?, Some(vec![0.1, 0.2]));
//! # Ok::<(), kvs::Error>(())
//! ```
//!
//! # Architecture
//!
//! - `kvs-core`: key construction, ids, `kvs.toml` configuration
//! - `kvs-store`: client protocol, in-memory and Redis backends, sequences
//! - this crate: [`KeyValueFacade`] and its [`Error`] type
//!
//! Backends are selected at runtime from [`KvsConfig`]; the Redis backend is
//! compiled in with the `redis-backend` feature.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod facade;
pub mod prelude;

pub use kvs_core::{config, id, key};

pub use error::{Error, Result};
pub use facade::KeyValueFacade;

pub use kvs_core::{
    build_key, internal_id, job_key, product_key, random_id, sites_key, try_build_key,
    BackendKind, ConfigError, KeyError, KvsConfig, SequenceMode, BLOCK_ID_PREFIX,
    CONFIG_FILE_NAME, DEFAULT_RANDOM_ID_LENGTH, INTERNAL_ID_SEPARATOR, JOB_KEY_TOKEN,
    KEY_SEPARATOR, MAX_RANDOM_ID_LENGTH, SITES_KEY_TOKEN,
};
pub use kvs_store::{
    open_backend, testing, AtomicSequence, ClientOptions, IdSequence, InMemoryStore, Payload,
    StoreBackend, StoreClient, StoreError, StoreResult, StoreSequence,
};
#[cfg(feature = "redis-backend")]
pub use kvs_store::RedisStore;
