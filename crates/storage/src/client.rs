//! Store client protocol
//!
//! A [`StoreBackend`] knows how to reach a store; each call to
//! [`StoreBackend::open_client`] yields a fresh [`StoreClient`] session. There
//! is no pooling or reuse contract: callers open a client per operation.
//!
//! The only client option is the payload mode. Text clients return
//! [`Payload::Text`] and fail on non-UTF-8 data; binary clients return
//! [`Payload::Bytes`] untouched.

use crate::error::{StoreError, StoreResult};

/// A stored value as seen by a client
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// UTF-8 text
    Text(String),
    /// Raw bytes
    Bytes(Vec<u8>),
}

impl Payload {
    /// Borrow the payload as bytes.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Payload::Text(s) => s.as_bytes(),
            Payload::Bytes(b) => b,
        }
    }

    /// Convert into bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Payload::Text(s) => s.into_bytes(),
            Payload::Bytes(b) => b,
        }
    }

    /// Borrow the payload as text, if it is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Payload::Text(s) => Some(s),
            Payload::Bytes(_) => None,
        }
    }

    /// Convert into text; byte payloads are accepted when valid UTF-8.
    pub fn into_text(self) -> Option<String> {
        match self {
            Payload::Text(s) => Some(s),
            Payload::Bytes(b) => String::from_utf8(b).ok(),
        }
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    /// Check if the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<String> for Payload {
    fn from(s: String) -> Self {
        Payload::Text(s)
    }
}

impl From<&str> for Payload {
    fn from(s: &str) -> Self {
        Payload::Text(s.to_string())
    }
}

impl From<Vec<u8>> for Payload {
    fn from(b: Vec<u8>) -> Self {
        Payload::Bytes(b)
    }
}

impl From<&[u8]> for Payload {
    fn from(b: &[u8]) -> Self {
        Payload::Bytes(b.to_vec())
    }
}

/// Options for opening a client.
///
/// ```
/// use kvs_store::ClientOptions;
///
/// let opts = ClientOptions::new().binary(true);
/// assert!(opts.binary);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClientOptions {
    /// Payloads are raw bytes (`true`) or UTF-8 text (`false`, default)
    pub binary: bool,
}

impl ClientOptions {
    /// Text-mode options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the payload mode.
    pub fn binary(mut self, binary: bool) -> Self {
        self.binary = binary;
        self
    }

    /// Turn raw stored bytes into the payload this mode returns.
    pub fn decode(&self, key: &str, raw: Vec<u8>) -> StoreResult<Payload> {
        if self.binary {
            return Ok(Payload::Bytes(raw));
        }
        String::from_utf8(raw)
            .map(Payload::Text)
            .map_err(|_| StoreError::NotText {
                key: key.to_string(),
            })
    }
}

/// A session with the store
///
/// Calls block until the store answers. Timeouts, if any, belong to the
/// backend.
pub trait StoreClient: Send {
    /// Options this client was opened with
    fn options(&self) -> ClientOptions;

    /// Read a value; `None` if the key is absent.
    fn get(&mut self, key: &str) -> StoreResult<Option<Payload>>;

    /// Write a value, replacing any previous one.
    fn set(&mut self, key: &str, value: Payload) -> StoreResult<()>;

    /// Atomically add `delta` to the integer at `key` and return the result.
    ///
    /// An absent key counts as 0.
    fn incr(&mut self, key: &str, delta: i64) -> StoreResult<i64>;
}

/// A reachable store
///
/// Thread safety: backends are shared across threads; clients are not.
pub trait StoreBackend: Send + Sync {
    /// Short backend name for logs
    fn name(&self) -> &'static str;

    /// Open a new client session.
    fn open_client(&self, options: ClientOptions) -> StoreResult<Box<dyn StoreClient>>;
}
