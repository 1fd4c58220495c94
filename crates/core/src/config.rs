//! Store configuration via `kvs.toml`
//!
//! Selects the backing store, its address and how block ids are sequenced.
//! String settings are kept as written and validated by the typed accessors
//! ([`KvsConfig::backend_kind`], [`KvsConfig::sequence_mode`]), so a config
//! file with an unknown value still parses and fails when used.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Config file name
pub const CONFIG_FILE_NAME: &str = "kvs.toml";

/// Which store implementation to open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// Process-local map, lost on exit
    Memory,
    /// Redis server at `url`
    Redis,
}

/// Where block id counters live
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceMode {
    /// Atomic counter in this process; restarts at 1 and is not shared
    Process,
    /// Atomic increment in the store; shared by every process using it
    Store,
}

/// Configuration loaded from `kvs.toml`.
///
/// # Example
///
/// ```toml
/// backend = "redis"
/// url = "redis://127.0.0.1:6379/0"
/// sequence = "store"
/// timeout_ms = 2000
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KvsConfig {
    /// Backend: `"memory"` or `"redis"`.
    #[serde(default = "default_backend")]
    pub backend: String,
    /// Store address, used by network backends.
    #[serde(default = "default_url")]
    pub url: String,
    /// Block id sequencing: `"process"` or `"store"`.
    #[serde(default = "default_sequence")]
    pub sequence: String,
    /// Connect timeout in milliseconds. Unset means the client default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

fn default_backend() -> String {
    "memory".to_string()
}

fn default_url() -> String {
    "redis://127.0.0.1:6379/0".to_string()
}

fn default_sequence() -> String {
    "process".to_string()
}

impl Default for KvsConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            url: default_url(),
            sequence: default_sequence(),
            timeout_ms: None,
        }
    }
}

impl KvsConfig {
    /// Parse the backend setting.
    pub fn backend_kind(&self) -> Result<BackendKind, ConfigError> {
        match self.backend.as_str() {
            "memory" => Ok(BackendKind::Memory),
            "redis" => Ok(BackendKind::Redis),
            other => Err(ConfigError::InvalidValue {
                field: "backend",
                value: other.to_string(),
                expected: "\"memory\" or \"redis\"",
            }),
        }
    }

    /// Parse the sequence setting.
    pub fn sequence_mode(&self) -> Result<SequenceMode, ConfigError> {
        match self.sequence.as_str() {
            "process" => Ok(SequenceMode::Process),
            "store" => Ok(SequenceMode::Store),
            other => Err(ConfigError::InvalidValue {
                field: "sequence",
                value: other.to_string(),
                expected: "\"process\" or \"store\"",
            }),
        }
    }

    /// Connect timeout, if configured.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# kvs store configuration
#
# Backend: "memory" (default) or "redis"
#   "memory" = process-local map, contents lost on exit
#   "redis"  = server at `url` (requires the redis-backend feature)
backend = "memory"

url = "redis://127.0.0.1:6379/0"

# Block id sequencing: "process" (default) or "store"
#   "process" = in-process counter, restarts at 1, not shared between processes
#   "store"   = atomic increment in the store, shared by all its clients
sequence = "process"

# Connect timeout in milliseconds (optional)
# timeout_ms = 2000
"#
    }

    /// Read, parse and validate config from a file path.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: KvsConfig = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check every string setting eagerly.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.backend_kind()?;
        self.sequence_mode()?;
        Ok(())
    }

    /// Write the default config file if it does not already exist.
    pub fn write_default_if_missing(path: &Path) -> Result<(), ConfigError> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml()).map_err(|source| ConfigError::Write {
                path: path.to_path_buf(),
                source,
            })?;
        }
        Ok(())
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?;
        std::fs::write(path, content).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}
