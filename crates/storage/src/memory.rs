//! In-memory store backend
//!
//! A process-local stand-in for a networked store, used by tests and by
//! single-process deployments.
//!
//! # Design
//!
//! - DashMap: sharded map, concurrent readers and writers
//! - Clients share the map through an `Arc`; opening a client is cheap
//! - Values are kept as bytes and decoded per client mode on read
//! - `incr` runs under the shard's write lock, so concurrent increments of
//!   the same key never lose updates

use crate::client::{ClientOptions, Payload, StoreBackend, StoreClient};
use crate::error::{StoreError, StoreResult};
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Process-local store
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    data: Arc<DashMap<String, Vec<u8>>>,
    clients_opened: Arc<AtomicU64>,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys stored.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Check if a key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// Raw bytes stored at `key`, bypassing any client.
    pub fn raw(&self, key: &str) -> Option<Vec<u8>> {
        self.data.get(key).map(|entry| entry.value().clone())
    }

    /// Number of clients opened so far.
    pub fn clients_opened(&self) -> u64 {
        self.clients_opened.load(Ordering::Relaxed)
    }
}

impl StoreBackend for InMemoryStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn open_client(&self, options: ClientOptions) -> StoreResult<Box<dyn StoreClient>> {
        self.clients_opened.fetch_add(1, Ordering::Relaxed);
        Ok(Box::new(InMemoryClient {
            data: Arc::clone(&self.data),
            options,
        }))
    }
}

/// Client session on an [`InMemoryStore`]
#[derive(Debug)]
pub struct InMemoryClient {
    data: Arc<DashMap<String, Vec<u8>>>,
    options: ClientOptions,
}

impl StoreClient for InMemoryClient {
    fn options(&self) -> ClientOptions {
        self.options
    }

    fn get(&mut self, key: &str) -> StoreResult<Option<Payload>> {
        let raw = self.data.get(key).map(|entry| entry.value().clone());
        raw.map(|bytes| self.options.decode(key, bytes)).transpose()
    }

    fn set(&mut self, key: &str, value: Payload) -> StoreResult<()> {
        self.data.insert(key.to_string(), value.into_bytes());
        Ok(())
    }

    fn incr(&mut self, key: &str, delta: i64) -> StoreResult<i64> {
        let mut entry = self
            .data
            .entry(key.to_string())
            .or_insert_with(|| b"0".to_vec());

        let current = std::str::from_utf8(entry.value())
            .ok()
            .and_then(|s| s.parse::<i64>().ok())
            .ok_or_else(|| StoreError::NotInteger {
                key: key.to_string(),
            })?;
        let next = current
            .checked_add(delta)
            .ok_or_else(|| StoreError::Backend(format!("increment of '{}' overflows", key)))?;

        *entry.value_mut() = next.to_string().into_bytes();
        Ok(next)
    }
}
