//! Block Id Sequence Tests

use crate::common::*;
use kvs::AtomicSequence;
use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

#[test]
fn block_ids_start_at_one_and_increase() {
    let (kv, _store) = memory_facade();
    let ids: Vec<String> = (0..3).map(|_| kv.next_block_id().unwrap()).collect();
    assert_eq!(ids, ["BLOCK:1", "BLOCK:2", "BLOCK:3"]);
}

#[test]
fn separate_facades_have_separate_process_counters() {
    let (a, _) = memory_facade();
    let (b, _) = memory_facade();
    assert_eq!(a.next_block_id().unwrap(), "BLOCK:1");
    assert_eq!(a.next_block_id().unwrap(), "BLOCK:2");
    assert_eq!(b.next_block_id().unwrap(), "BLOCK:1");
}

#[test]
fn concurrent_callers_never_see_duplicates() {
    let (kv, _store) = memory_facade();
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let kv = kv.clone();
            thread::spawn(move || {
                (0..200)
                    .map(|_| kv.next_block_id().unwrap())
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut seen = HashSet::new();
    for handle in handles {
        for id in handle.join().unwrap() {
            assert!(seen.insert(id.clone()), "duplicate block id {}", id);
        }
    }
    assert_eq!(seen.len(), 1600);
    assert!(seen.contains("BLOCK:1600"));
}

#[test]
fn store_sequence_is_shared_between_facades() {
    let store = InMemoryStore::new();
    let a = store_sequenced_facade(&store);
    let b = store_sequenced_facade(&store);

    assert_eq!(a.next_block_id().unwrap(), "BLOCK:1");
    assert_eq!(b.next_block_id().unwrap(), "BLOCK:2");
    assert_eq!(a.next_block_id().unwrap(), "BLOCK:3");
    assert_eq!(store.raw("SEQUENCE!BLOCK"), Some(b"3".to_vec()));
}

#[test]
fn store_sequence_concurrent_unique() {
    let store = InMemoryStore::new();
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let kv = store_sequenced_facade(&store);
            thread::spawn(move || {
                (0..100)
                    .map(|_| kv.next_block_id().unwrap())
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let ids: HashSet<String> = handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();
    assert_eq!(ids.len(), 400);
}

#[test]
fn injected_sequence_replaces_default() {
    let seq = Arc::new(AtomicSequence::new("BLOCK"));
    seq.next_value().unwrap();
    seq.next_value().unwrap();

    let (kv, _store) = memory_facade();
    let kv = kv.with_block_sequence(seq.clone());
    assert_eq!(kv.next_block_id().unwrap(), "BLOCK:3");
    assert_eq!(seq.current(), 3);
}

#[test]
fn store_sequence_failure_is_store_error() {
    let store = FaultyStore::new();
    let backend: Arc<dyn StoreBackend> = Arc::new(store.clone());
    let kv = KeyValueFacade::new(Arc::clone(&backend))
        .with_block_sequence(Arc::new(StoreSequence::new(backend, BLOCK_ID_PREFIX)));

    store.fail_writes(true);
    let err = kv.next_block_id().unwrap_err();
    assert!(err.is_store_failure());

    store.fail_writes(false);
    assert_eq!(kv.next_block_id().unwrap(), "BLOCK:1");
}
