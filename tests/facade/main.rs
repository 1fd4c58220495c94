//! Facade Integration Tests
//!
//! Tests for the kvs facade as a caller sees it:
//! - Key construction (format, determinism, strict variant)
//! - JSON and raw values (round trips, malformed payloads)
//! - Block id sequencing (in-process and store-backed)
//! - Store failures and removed operations
//! - Configuration files

#[path = "../common/mod.rs"]
mod common;

mod config;
mod failures;
mod sequence;
