//! Fault-injecting store backend

use crate::client::{ClientOptions, Payload, StoreBackend, StoreClient};
use crate::error::{StoreError, StoreResult};
use crate::memory::InMemoryStore;
use parking_lot::RwLock;
use std::sync::Arc;

/// Which operations fail
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Faults {
    /// `open_client` fails
    pub connect: bool,
    /// `get` fails
    pub reads: bool,
    /// `set` and `incr` fail
    pub writes: bool,
}

/// In-memory store whose operations can be made to fail
///
/// Faults are shared with every client already opened, so toggling them
/// affects in-flight sessions too.
#[derive(Debug, Clone, Default)]
pub struct FaultyStore {
    inner: InMemoryStore,
    faults: Arc<RwLock<Faults>>,
}

impl FaultyStore {
    /// Healthy store over an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Healthy store over an existing in-memory store.
    pub fn wrapping(inner: InMemoryStore) -> Self {
        Self {
            inner,
            faults: Arc::new(RwLock::new(Faults::default())),
        }
    }

    /// The wrapped store, for direct inspection or seeding.
    pub fn inner(&self) -> &InMemoryStore {
        &self.inner
    }

    /// Current faults.
    pub fn faults(&self) -> Faults {
        *self.faults.read()
    }

    /// Replace all faults at once.
    pub fn set_faults(&self, faults: Faults) {
        *self.faults.write() = faults;
    }

    /// Toggle connect failures.
    pub fn fail_connect(&self, fail: bool) {
        self.faults.write().connect = fail;
    }

    /// Toggle read failures.
    pub fn fail_reads(&self, fail: bool) {
        self.faults.write().reads = fail;
    }

    /// Toggle write failures.
    pub fn fail_writes(&self, fail: bool) {
        self.faults.write().writes = fail;
    }
}

impl StoreBackend for FaultyStore {
    fn name(&self) -> &'static str {
        "faulty"
    }

    fn open_client(&self, options: ClientOptions) -> StoreResult<Box<dyn StoreClient>> {
        if self.faults.read().connect {
            return Err(StoreError::Connection("injected connect failure".to_string()));
        }
        Ok(Box::new(FaultyClient {
            inner: self.inner.open_client(options)?,
            faults: Arc::clone(&self.faults),
        }))
    }
}

struct FaultyClient {
    inner: Box<dyn StoreClient>,
    faults: Arc<RwLock<Faults>>,
}

impl StoreClient for FaultyClient {
    fn options(&self) -> ClientOptions {
        self.inner.options()
    }

    fn get(&mut self, key: &str) -> StoreResult<Option<Payload>> {
        if self.faults.read().reads {
            return Err(StoreError::Injected("read"));
        }
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: Payload) -> StoreResult<()> {
        if self.faults.read().writes {
            return Err(StoreError::Injected("write"));
        }
        self.inner.set(key, value)
    }

    fn incr(&mut self, key: &str, delta: i64) -> StoreResult<i64> {
        if self.faults.read().writes {
            return Err(StoreError::Injected("write"));
        }
        self.inner.incr(key, delta)
    }
}
