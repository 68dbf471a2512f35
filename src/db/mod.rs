//! Preference storage abstraction
//!
//! Saved style preferences live in a keyed document store, one record per
//! username. Backends only need single-key atomic writes: a save always
//! replaces the whole record.

use std::sync::Arc;

use crate::{config::StoreBackend, error::AppResult, models::PreferenceRecord};

pub mod memory;
pub mod redis;

pub use self::memory::MemoryPreferenceStore;
pub use self::redis::{create_redis_client, RedisPreferenceStore, StoreKey};

/// Trait for preference storage backends
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait PreferenceStore: Send + Sync {
    /// Inserts the record, replacing any previous record for the same username
    async fn upsert(&self, record: PreferenceRecord) -> AppResult<()>;

    /// Looks up the record saved for `username`
    async fn find(&self, username: &str) -> AppResult<Option<PreferenceRecord>>;

    /// Backend name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Builds the store selected in configuration
pub fn create_preference_store(
    backend: StoreBackend,
    redis_url: &str,
) -> anyhow::Result<Arc<dyn PreferenceStore>> {
    let store: Arc<dyn PreferenceStore> = match backend {
        StoreBackend::Redis => Arc::new(RedisPreferenceStore::new(create_redis_client(redis_url)?)),
        StoreBackend::Memory => Arc::new(MemoryPreferenceStore::new()),
    };

    tracing::info!(backend = store.name(), "Preference store ready");
    Ok(store)
}
