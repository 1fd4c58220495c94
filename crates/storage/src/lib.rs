//! Store layer for kvs
//!
//! This crate defines how the facade talks to a key-value store:
//! - StoreClient / StoreBackend: the client protocol (get, set, incr)
//! - ClientOptions, Payload: text or binary payload handling
//! - InMemoryStore: DashMap-backed, process-local backend
//! - RedisStore: network backend (feature `redis-backend`)
//! - IdSequence: block id counters, in-process or store-backed
//! - testing::FaultyStore: fault injection for error paths

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod client;
pub mod error;
pub mod factory;
pub mod memory;
#[cfg(feature = "redis-backend")]
pub mod redis_store;
pub mod sequence;
pub mod testing;

pub use client::{ClientOptions, Payload, StoreBackend, StoreClient};
pub use error::{StoreError, StoreResult};
pub use factory::open_backend;
pub use memory::{InMemoryClient, InMemoryStore};
#[cfg(feature = "redis-backend")]
pub use redis_store::RedisStore;
pub use sequence::{
    sequence_from_config, AtomicSequence, IdSequence, StoreSequence, SEQUENCE_KEY_TOKEN,
};
