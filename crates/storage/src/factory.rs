//! Backend selection from configuration

use crate::client::StoreBackend;
use crate::error::StoreResult;
use crate::memory::InMemoryStore;
use kvs_core::{BackendKind, KvsConfig};
use std::sync::Arc;
use tracing::info;

/// Open the backend named in the config.
///
/// # Errors
///
/// - [`crate::StoreError::Config`] for an unknown backend name
/// - [`crate::StoreError::Unsupported`] for `redis` without the `redis-backend` feature
/// - [`crate::StoreError::Connection`] for an unusable Redis URL
pub fn open_backend(config: &KvsConfig) -> StoreResult<Arc<dyn StoreBackend>> {
    let backend: Arc<dyn StoreBackend> = match config.backend_kind()? {
        BackendKind::Memory => Arc::new(InMemoryStore::new()),
        BackendKind::Redis => open_redis(config)?,
    };
    info!(target: "kvs::store", backend = backend.name(), "Opened store backend");
    Ok(backend)
}

#[cfg(feature = "redis-backend")]
fn open_redis(config: &KvsConfig) -> StoreResult<Arc<dyn StoreBackend>> {
    Ok(Arc::new(crate::redis_store::RedisStore::open(
        &config.url,
        config.timeout(),
    )?))
}

#[cfg(not(feature = "redis-backend"))]
fn open_redis(_config: &KvsConfig) -> StoreResult<Arc<dyn StoreBackend>> {
    Err(crate::error::StoreError::Unsupported(
        "redis backend requires the `redis-backend` feature".to_string(),
    ))
}
