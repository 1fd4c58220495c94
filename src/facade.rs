//! Key-value facade over a pluggable store.
//!
//! [`KeyValueFacade`] turns identifier tuples into keys (see [`crate::key`]),
//! opens a fresh store client for every call, and optionally encodes values
//! as JSON. It holds no data of its own; everything lives in the backend.
//!
//! # Example
//!
//! ```
//! use kvs::prelude::*;
//! use serde_json::json;
//!
//! let kv = KeyValueFacade::in_memory();
//! let key = job_key(7);
//!
//! kv.set_json(&key, &json!({"status": "running"}))?;
//! let job: Option<serde_json::Value> = kv.get_json(&key)?;
//! assert_eq!(job, Some(json!({"status": "running"})));
//!
//! assert_eq!(kv.next_block_id()?, "BLOCK:1");
//! # Ok::<(), kvs::Error>(())
//! ```
//!
//! # Reads
//!
//! | Stored value | `get_json` | `get_json_lossy` |
//! |--------------|------------|------------------|
//! | absent | `Ok(None)` | `None` |
//! | valid JSON | `Ok(Some(v))` | `Some(v)` |
//! | not UTF-8, not JSON, wrong shape | `Err(MalformedValue)` | `None` |
//! | store unreachable | `Err(StoreRead)` | `None` |

use crate::error::{Error, Result};
use kvs_core::{KvsConfig, BLOCK_ID_PREFIX};
use kvs_store::{
    open_backend, sequence_from_config, AtomicSequence, ClientOptions, IdSequence,
    InMemoryStore, Payload, StoreBackend, StoreClient, StoreError,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

/// Facade over a key-value store.
///
/// Cheap to clone; clones share the backend and the block id sequence.
/// `Send + Sync`, so one facade can serve many threads: each call opens its
/// own client.
#[derive(Clone)]
pub struct KeyValueFacade {
    backend: Arc<dyn StoreBackend>,
    block_ids: Arc<dyn IdSequence>,
}

impl KeyValueFacade {
    /// Facade over `backend` with an in-process block id counter.
    ///
    /// The counter starts at 1 for every facade built this way. Use
    /// [`KeyValueFacade::with_block_sequence`] to share or persist it.
    pub fn new(backend: Arc<dyn StoreBackend>) -> Self {
        Self {
            backend,
            block_ids: Arc::new(AtomicSequence::new(BLOCK_ID_PREFIX)),
        }
    }

    /// Facade over a fresh [`InMemoryStore`].
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryStore::new()))
    }

    /// Facade with the backend and block sequencing named in `config`.
    pub fn open(config: &KvsConfig) -> Result<Self> {
        config.validate()?;
        let backend = open_backend(config)?;
        let block_ids = sequence_from_config(config, Arc::clone(&backend), BLOCK_ID_PREFIX)?;
        Ok(Self { backend, block_ids })
    }

    /// Facade configured from a `kvs.toml` file.
    pub fn open_file(path: impl AsRef<Path>) -> Result<Self> {
        let config = KvsConfig::from_file(path.as_ref())?;
        Self::open(&config)
    }

    /// Replace the block id sequence.
    pub fn with_block_sequence(mut self, block_ids: Arc<dyn IdSequence>) -> Self {
        self.block_ids = block_ids;
        self
    }

    /// The backing store.
    pub fn backend(&self) -> &Arc<dyn StoreBackend> {
        &self.backend
    }

    /// Open a new client session.
    ///
    /// Every call yields a fresh client; nothing is pooled.
    pub fn get_client(&self, options: ClientOptions) -> Result<Box<dyn StoreClient>> {
        Ok(self.backend.open_client(options)?)
    }

    /// Read the text stored at `key`.
    ///
    /// Returns `None` if the key is absent.
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        match self.read(key, ClientOptions::new())? {
            None => Ok(None),
            Some(Payload::Text(text)) => Ok(Some(text)),
            Some(Payload::Bytes(bytes)) => String::from_utf8(bytes).map(Some).map_err(|_| {
                Error::StoreRead {
                    key: key.to_string(),
                    source: StoreError::NotText {
                        key: key.to_string(),
                    },
                }
            }),
        }
    }

    /// Read the raw bytes stored at `key`.
    pub fn get_bytes(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self
            .read(key, ClientOptions::new().binary(true))?
            .map(Payload::into_bytes))
    }

    /// Read and decode the JSON stored at `key`.
    ///
    /// `Ok(None)` means the key is absent. A value that is present but does
    /// not decode as `T` is logged with its raw payload and returned as
    /// [`Error::MalformedValue`]; store failures are [`Error::StoreRead`].
    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let bytes = match self.get_bytes(key)? {
            Some(bytes) => bytes,
            None => return Ok(None),
        };

        // JSON text is UTF-8, so undecodable bytes are a malformed value
        let raw = match String::from_utf8(bytes) {
            Ok(raw) => raw,
            Err(e) => {
                let reason = format!("value is not UTF-8: {}", e.utf8_error());
                let raw = String::from_utf8_lossy(e.as_bytes()).into_owned();
                return Err(malformed(key, raw, reason));
            }
        };

        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| malformed(key, raw.clone(), e.to_string()))
    }

    /// Read and decode JSON, folding every failure into `None`.
    ///
    /// Absent, malformed and unreachable all look the same to the caller;
    /// the cause is only logged. Prefer [`KeyValueFacade::get_json`].
    pub fn get_json_lossy<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.get_json(key) {
            Ok(value) => value,
            Err(e) => {
                if !e.is_malformed() {
                    warn!(target: "kvs::facade", key, error = %e, "Value unavailable, treating as absent");
                }
                None
            }
        }
    }

    /// Encode `value` as JSON and store it at `key`.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidInput`] if `value` cannot be serialized; nothing is written
    /// - [`Error::StoreWrite`] if the store rejects the write
    pub fn set_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let encoded = serde_json::to_string(value).map_err(|e| Error::InvalidInput {
            reason: format!("cannot encode value for key {} as JSON: {}", key, e),
        })?;
        self.write(key, Payload::Text(encoded))
    }

    /// Store an already-encoded value at `key`.
    ///
    /// # Errors
    ///
    /// [`Error::StoreWrite`] if the store rejects the write.
    pub fn set_raw(&self, key: &str, value: impl Into<Payload>) -> Result<()> {
        self.write(key, value.into())
    }

    /// Next block id: `BLOCK:1`, `BLOCK:2`, …
    pub fn next_block_id(&self) -> Result<String> {
        Ok(self.block_ids.next_id()?)
    }

    /// Removed: sites are read from the block itself.
    ///
    /// Always fails with [`Error::Deprecated`] and touches nothing.
    #[deprecated(
        since = "0.1.0",
        note = "Load the block and read its sites instead"
    )]
    pub fn get_sites(
        &self,
        _job_id: impl fmt::Display,
        _block_id: impl fmt::Display,
    ) -> Result<Vec<serde_json::Value>> {
        Err(Error::Deprecated {
            operation: "get_sites",
            replacement: "load the block and read its sites instead",
        })
    }

    fn read(&self, key: &str, options: ClientOptions) -> Result<Option<Payload>> {
        let read_error = |source| Error::StoreRead {
            key: key.to_string(),
            source,
        };
        let mut client = self.backend.open_client(options).map_err(read_error)?;
        let payload = client.get(key).map_err(read_error)?;
        debug!(
            target: "kvs::facade",
            key,
            found = payload.is_some(),
            binary = options.binary,
            "Read key"
        );
        Ok(payload)
    }

    fn write(&self, key: &str, payload: Payload) -> Result<()> {
        let write_error = |source| Error::StoreWrite {
            key: key.to_string(),
            source,
        };
        let options = ClientOptions::new().binary(matches!(payload, Payload::Bytes(_)));
        let len = payload.len();
        let mut client = self.backend.open_client(options).map_err(write_error)?;
        client.set(key, payload).map_err(write_error)?;
        debug!(target: "kvs::facade", key, bytes = len, "Wrote key");
        Ok(())
    }
}

fn malformed(key: &str, raw: String, reason: String) -> Error {
    warn!(
        target: "kvs::facade",
        key,
        error = %reason,
        raw = %raw,
        "Stored value is not valid JSON"
    );
    Error::MalformedValue {
        key: key.to_string(),
        raw,
        reason,
    }
}

impl fmt::Debug for KeyValueFacade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyValueFacade")
            .field("backend", &self.backend.name())
            .field("block_prefix", &self.block_ids.prefix())
            .finish()
    }
}
