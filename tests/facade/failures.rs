//! Store Failure Tests
//!
//! Transport failures surface as errors naming the key; they are never
//! reported as success or as an absent value.

use crate::common::*;
use kvs::StoreError;
use serde_json::{json, Value};

// ============================================================================
// Writes
// ============================================================================

#[test]
fn set_json_write_failure_is_store_write() {
    let (kv, store) = faulty_facade();
    store.fail_writes(true);

    match kv.set_json(&job_key(7), &json!({"status": "done"})) {
        Err(Error::StoreWrite { key, source }) => {
            assert_eq!(key, "JOB!7");
            assert!(matches!(source, StoreError::Injected("write")));
        }
        other => panic!("Expected StoreWrite, got {:?}", other),
    }
    assert!(store.inner().is_empty());
}

#[test]
fn set_raw_write_failure_is_store_write() {
    let (kv, store) = faulty_facade();
    store.fail_writes(true);

    let err = kv.set_raw("k", "v").unwrap_err();
    assert!(matches!(err, Error::StoreWrite { .. }));
    assert!(err.is_store_failure());

    let err = kv.set_raw("blob", vec![1u8, 2, 3]).unwrap_err();
    assert_eq!(err.key(), Some("blob"));
}

#[test]
fn connect_failure_on_write_is_store_write() {
    let (kv, store) = faulty_facade();
    store.fail_connect(true);

    match kv.set_raw("k", "v") {
        Err(Error::StoreWrite { source, .. }) => assert!(source.is_transport()),
        other => panic!("Expected StoreWrite, got {:?}", other),
    }
}

#[test]
fn writes_succeed_after_fault_clears() {
    let (kv, store) = faulty_facade();
    store.fail_writes(true);
    assert!(kv.set_raw("k", "v").is_err());

    store.fail_writes(false);
    kv.set_raw("k", "v").unwrap();
    assert_eq!(kv.get("k").unwrap(), Some("v".to_string()));
}

// ============================================================================
// Reads
// ============================================================================

#[test]
fn read_failure_is_store_read_not_absent() {
    let (kv, store) = faulty_facade();
    kv.set_json("k", &json!(1)).unwrap();
    store.fail_reads(true);

    assert!(matches!(kv.get("k"), Err(Error::StoreRead { .. })));
    assert!(matches!(kv.get_bytes("k"), Err(Error::StoreRead { .. })));

    let err = kv.get_json::<Value>("k").unwrap_err();
    assert!(err.is_store_failure());
    assert!(!err.is_malformed());
}

#[test]
fn lossy_read_folds_store_failure_into_none() {
    let (kv, store) = faulty_facade();
    kv.set_json("k", &json!(1)).unwrap();
    store.set_faults(Faults {
        connect: true,
        ..Faults::default()
    });

    assert_eq!(kv.get_json_lossy::<Value>("k"), None);

    store.set_faults(Faults::default());
    assert_eq!(kv.get_json_lossy::<Value>("k"), Some(json!(1)));
}

#[test]
fn get_client_connect_failure() {
    let (kv, store) = faulty_facade();
    store.fail_connect(true);
    assert!(matches!(
        kv.get_client(ClientOptions::new()),
        Err(Error::Store(StoreError::Connection(_)))
    ));
}

// ============================================================================
// Removed operations
// ============================================================================

#[test]
#[allow(deprecated)]
fn get_sites_always_fails_without_touching_store() {
    let (kv, store) = memory_facade();
    kv.set_json(&sites_key(1, "BLOCK:1"), &json!(["site-a"])).unwrap();
    let opened = store.clients_opened();

    let err = kv.get_sites(1, "BLOCK:1").unwrap_err();
    assert!(err.is_deprecated());
    assert!(matches!(err, Error::Deprecated { operation: "get_sites", .. }));
    assert_eq!(store.clients_opened(), opened);
}
