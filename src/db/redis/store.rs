use redis::AsyncCommands;
use redis::Client;
use std::fmt::Display;

use crate::db::PreferenceStore;
use crate::error::AppError;
use crate::error::AppResult;
use crate::models::PreferenceRecord;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StoreKey {
    Preferences(String),
}

impl Display for StoreKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreKey::Preferences(username) => write!(f, "prefs:{}", username),
        }
    }
}

/// Creates a Redis client for preference storage
///
/// Opening the client only validates the URL; connections are made per call.
pub fn create_redis_client(redis_url: &str) -> anyhow::Result<Client> {
    let client = Client::open(redis_url)?;
    Ok(client)
}

/// Preference store keeping one JSON document per username
///
/// A save is a single `SET`, so Redis provides the atomic upsert.
#[derive(Clone)]
pub struct RedisPreferenceStore {
    redis_client: Client,
}

impl RedisPreferenceStore {
    pub fn new(redis_client: Client) -> Self {
        Self { redis_client }
    }
}

#[async_trait::async_trait]
impl PreferenceStore for RedisPreferenceStore {
    async fn upsert(&self, record: PreferenceRecord) -> AppResult<()> {
        let key = StoreKey::Preferences(record.username.clone());
        let json = serde_json::to_string(&record)
            .map_err(|e| AppError::Internal(format!("Preference serialization error: {}", e)))?;

        let mut conn = self.redis_client.get_multiplexed_async_connection().await?;
        let _: () = conn.set(key.to_string(), json).await.map_err(|e| {
            tracing::warn!(error = %e, "Redis set failed");
            e
        })?;

        tracing::debug!(key = %key, "Stored preferences");
        Ok(())
    }

    async fn find(&self, username: &str) -> AppResult<Option<PreferenceRecord>> {
        let key = StoreKey::Preferences(username.to_string());
        let mut conn = self.redis_client.get_multiplexed_async_connection().await?;
        let stored: Option<String> = conn.get(key.to_string()).await.map_err(|e| {
            tracing::warn!(error = %e, "Redis get failed");
            e
        })?;

        match stored {
            Some(json) => {
                let record = serde_json::from_str(&json).map_err(|e| {
                    AppError::Internal(format!("Preference deserialization error: {}", e))
                })?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    fn name(&self) -> &'static str {
        "redis"
    }
}
