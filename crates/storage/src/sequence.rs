//! Id sequences
//!
//! A sequence hands out `<prefix>:<n>` ids with `n` starting at 1 and
//! growing by 1 per call. Sequences are owned values injected into whoever
//! needs them; nothing here is a process global.
//!
//! | Sequence | Counter lives in | Unique across |
//! |----------|------------------|---------------|
//! | [`AtomicSequence`] | this value | threads sharing it |
//! | [`StoreSequence`] | the store (`SEQUENCE!<prefix>`) | all processes on the store |
//!
//! Neither is durable unless the store is: an `AtomicSequence` restarts at 1
//! whenever it is recreated, so ids from two processes (or two runs of the
//! same process) collide.

use crate::client::{ClientOptions, StoreBackend};
use crate::error::{StoreError, StoreResult};
use kvs_core::{build_key, internal_id, KvsConfig, SequenceMode};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Leading part of store-side counter keys
pub const SEQUENCE_KEY_TOKEN: &str = "SEQUENCE";

/// Monotonic id source scoped to a prefix
pub trait IdSequence: Send + Sync {
    /// Prefix of every id
    fn prefix(&self) -> &str;

    /// Advance and return the counter.
    fn next_value(&self) -> StoreResult<u64>;

    /// Advance and return the formatted id, e.g. `BLOCK:3`.
    fn next_id(&self) -> StoreResult<String> {
        Ok(internal_id(self.prefix(), self.next_value()?))
    }
}

/// In-process atomic counter
#[derive(Debug)]
pub struct AtomicSequence {
    prefix: String,
    counter: AtomicU64,
}

impl AtomicSequence {
    /// New sequence; the first id ends in `:1`.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: AtomicU64::new(0),
        }
    }

    /// Sequence that resumes after `last`; the next id ends in `:<last + 1>`.
    pub fn starting_after(prefix: impl Into<String>, last: u64) -> Self {
        Self {
            prefix: prefix.into(),
            counter: AtomicU64::new(last),
        }
    }

    /// Last value handed out (0 before the first call).
    pub fn current(&self) -> u64 {
        self.counter.load(Ordering::Relaxed)
    }
}

impl IdSequence for AtomicSequence {
    fn prefix(&self) -> &str {
        &self.prefix
    }

    fn next_value(&self) -> StoreResult<u64> {
        // Each successful update hands its caller a distinct value
        let previous = self
            .counter
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| n.checked_add(1))
            .map_err(|_| {
                StoreError::Backend(format!("sequence '{}' is exhausted", self.prefix))
            })?;
        Ok(previous + 1)
    }
}

/// Counter kept in the store, advanced with an atomic increment
pub struct StoreSequence {
    prefix: String,
    counter_key: String,
    backend: Arc<dyn StoreBackend>,
}

impl StoreSequence {
    /// Sequence whose counter lives at `SEQUENCE!<prefix>`.
    pub fn new(backend: Arc<dyn StoreBackend>, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        let counter_key = build_key(&[&SEQUENCE_KEY_TOKEN, &prefix]);
        Self {
            prefix,
            counter_key,
            backend,
        }
    }

    /// Store key holding the counter.
    pub fn counter_key(&self) -> &str {
        &self.counter_key
    }
}

impl IdSequence for StoreSequence {
    fn prefix(&self) -> &str {
        &self.prefix
    }

    fn next_value(&self) -> StoreResult<u64> {
        let mut client = self.backend.open_client(ClientOptions::new())?;
        let value = client.incr(&self.counter_key, 1)?;
        debug!(target: "kvs::sequence", key = %self.counter_key, value, "Advanced store sequence");
        u64::try_from(value)
            .ok()
            .filter(|v| *v > 0)
            .ok_or_else(|| {
                StoreError::Backend(format!(
                    "sequence counter '{}' returned non-positive value {}",
                    self.counter_key, value
                ))
            })
    }
}

/// Build the sequence the config asks for.
pub fn sequence_from_config(
    config: &KvsConfig,
    backend: Arc<dyn StoreBackend>,
    prefix: &str,
) -> StoreResult<Arc<dyn IdSequence>> {
    Ok(match config.sequence_mode()? {
        SequenceMode::Process => Arc::new(AtomicSequence::new(prefix)),
        SequenceMode::Store => Arc::new(StoreSequence::new(backend, prefix)),
    })
}
