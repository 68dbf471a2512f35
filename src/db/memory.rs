use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::{db::PreferenceStore, error::AppResult, models::PreferenceRecord};

/// Process-local preference store, lost on restart
#[derive(Default)]
pub struct MemoryPreferenceStore {
    records: RwLock<HashMap<String, PreferenceRecord>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl PreferenceStore for MemoryPreferenceStore {
    async fn upsert(&self, record: PreferenceRecord) -> AppResult<()> {
        let mut records = self.records.write().await;
        records.insert(record.username.clone(), record);
        Ok(())
    }

    async fn find(&self, username: &str) -> AppResult<Option<PreferenceRecord>> {
        let records = self.records.read().await;
        Ok(records.get(username).cloned())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
