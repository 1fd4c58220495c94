//! Testing utilities for store failure paths
//!
//! - **Fault injection**: [`FaultyStore`] wraps an in-memory store and fails
//!   connects, reads or writes on demand
//!
//! # Example
//!
//! ```
//! use kvs_store::testing::FaultyStore;
//! use kvs_store::{ClientOptions, Payload, StoreBackend};
//!
//! let store = FaultyStore::new();
//! store.fail_writes(true);
//! let mut client = store.open_client(ClientOptions::new()).unwrap();
//! assert!(client.set("k", Payload::from("v")).is_err());
//! ```

mod faulty;

pub use faulty::{Faults, FaultyStore};
