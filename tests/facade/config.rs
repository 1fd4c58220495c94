//! Configuration Tests
//!
//! Facades opened from `kvs.toml` files.

use crate::common::*;
use kvs::{BackendKind, ConfigError, SequenceMode};
use tempfile::TempDir;

#[test]
fn open_file_with_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "");

    let kv = KeyValueFacade::open_file(&path).unwrap();
    assert_eq!(kv.backend().name(), "memory");
    assert_eq!(kv.next_block_id().unwrap(), "BLOCK:1");
}

#[test]
fn open_file_with_store_sequence() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "backend = \"memory\"\nsequence = \"store\"\n");

    let kv = KeyValueFacade::open_file(&path).unwrap();
    assert_eq!(kv.next_block_id().unwrap(), "BLOCK:1");
    assert_eq!(kv.get("SEQUENCE!BLOCK").unwrap(), Some("1".to_string()));
}

#[test]
fn open_file_rejects_unknown_backend() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "backend = \"memcache\"\n");

    match KeyValueFacade::open_file(&path) {
        Err(Error::Config(ConfigError::InvalidValue { field, value, .. })) => {
            assert_eq!(field, "backend");
            assert_eq!(value, "memcache");
        }
        other => panic!("Expected InvalidValue, got {:?}", other),
    }
}

#[test]
fn open_rejects_unknown_backend_as_config_error() {
    let config = KvsConfig {
        backend: "memcache".to_string(),
        ..KvsConfig::default()
    };
    assert!(matches!(
        KeyValueFacade::open(&config),
        Err(Error::Config(ConfigError::InvalidValue { field: "backend", .. }))
    ));

    let config = KvsConfig {
        sequence: "cluster".to_string(),
        ..KvsConfig::default()
    };
    assert!(matches!(
        KeyValueFacade::open(&config),
        Err(Error::Config(ConfigError::InvalidValue { field: "sequence", .. }))
    ));
}

#[test]
fn open_file_rejects_bad_toml() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "backend = \n");
    assert!(matches!(
        KeyValueFacade::open_file(&path),
        Err(Error::Config(ConfigError::Parse { .. }))
    ));
}

#[test]
fn open_file_missing_is_read_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.toml");
    assert!(matches!(
        KeyValueFacade::open_file(&path),
        Err(Error::Config(ConfigError::Read { .. }))
    ));
}

#[test]
fn default_file_written_when_missing_opens_memory_store() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(kvs::CONFIG_FILE_NAME);

    KvsConfig::write_default_if_missing(&path).unwrap();
    let config = KvsConfig::from_file(&path).unwrap();
    assert_eq!(config, KvsConfig::default());
    assert_eq!(config.backend_kind().unwrap(), BackendKind::Memory);
    assert_eq!(config.sequence_mode().unwrap(), SequenceMode::Process);

    assert!(KeyValueFacade::open(&config).is_ok());
}

#[test]
fn written_config_round_trips() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(kvs::CONFIG_FILE_NAME);
    let config = KvsConfig {
        sequence: "store".to_string(),
        timeout_ms: Some(1500),
        ..KvsConfig::default()
    };

    config.write_to_file(&path).unwrap();
    assert_eq!(KvsConfig::from_file(&path).unwrap(), config);
}

#[cfg(not(feature = "redis-backend"))]
#[test]
fn redis_backend_needs_feature() {
    let config = KvsConfig {
        backend: "redis".to_string(),
        ..KvsConfig::default()
    };
    assert!(matches!(
        KeyValueFacade::open(&config),
        Err(Error::Store(StoreError::Unsupported(_)))
    ));
}
