//! Redis store backend
//!
//! Enabled with the `redis-backend` feature. Each client is a dedicated,
//! blocking connection; `incr` maps to `INCRBY`, which Redis executes
//! atomically, so store-backed sequences stay unique across processes.

use crate::client::{ClientOptions, Payload, StoreBackend, StoreClient};
use crate::error::{StoreError, StoreResult};
use redis::Commands;
use std::time::Duration;
use tracing::debug;

/// Redis server reachable at a `redis://` URL
pub struct RedisStore {
    client: redis::Client,
    timeout: Option<Duration>,
}

impl RedisStore {
    /// Validate the URL and prepare a backend.
    ///
    /// No connection is made until a client is opened.
    pub fn open(url: &str, timeout: Option<Duration>) -> StoreResult<Self> {
        let client = redis::Client::open(url)
            .map_err(|e| StoreError::Connection(format!("invalid redis url '{}': {}", url, e)))?;
        Ok(Self { client, timeout })
    }

    /// Connect timeout applied to new clients.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

impl StoreBackend for RedisStore {
    fn name(&self) -> &'static str {
        "redis"
    }

    fn open_client(&self, options: ClientOptions) -> StoreResult<Box<dyn StoreClient>> {
        let conn = match self.timeout {
            Some(timeout) => self.client.get_connection_with_timeout(timeout),
            None => self.client.get_connection(),
        }
        .map_err(|e| StoreError::Connection(e.to_string()))?;

        debug!(target: "kvs::store", binary = options.binary, "Opened redis client");
        Ok(Box::new(RedisClient { conn, options }))
    }
}

struct RedisClient {
    conn: redis::Connection,
    options: ClientOptions,
}

fn backend_error(e: redis::RedisError) -> StoreError {
    if e.is_connection_dropped() || e.is_connection_refusal() || e.is_timeout() {
        StoreError::Connection(e.to_string())
    } else {
        StoreError::Backend(e.to_string())
    }
}

impl StoreClient for RedisClient {
    fn options(&self) -> ClientOptions {
        self.options
    }

    fn get(&mut self, key: &str) -> StoreResult<Option<Payload>> {
        let raw: Option<Vec<u8>> = self.conn.get(key).map_err(backend_error)?;
        raw.map(|bytes| self.options.decode(key, bytes)).transpose()
    }

    fn set(&mut self, key: &str, value: Payload) -> StoreResult<()> {
        self.conn
            .set::<_, _, ()>(key, value.into_bytes())
            .map_err(backend_error)
    }

    fn incr(&mut self, key: &str, delta: i64) -> StoreResult<i64> {
        self.conn.incr(key, delta).map_err(backend_error)
    }
}
