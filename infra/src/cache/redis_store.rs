//! Redis-backed ephemeral store
//!
//! Production adapter: every process pointing at the same Redis shares the
//! cooldowns, counters and locks, and Redis expires them.

use async_trait::async_trait;
use tracing::debug;

use og_core::EphemeralStore;

use super::redis_client::RedisClient;

/// `EphemeralStore` over Redis SET EX / GET / DEL
///
/// Keys are namespaced with the configured `key_prefix`, if any.
#[derive(Clone)]
pub struct RedisEphemeralStore {
    client: RedisClient,
}

impl RedisEphemeralStore {
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &RedisClient {
        &self.client
    }

    fn key(&self, key: &str) -> String {
        self.client.config().make_key(key)
    }
}

#[async_trait]
impl EphemeralStore for RedisEphemeralStore {
    async fn get(&self, key: &str) -> Result<Option<String>, String> {
        self.client
            .get(&self.key(key))
            .await
            .map_err(|e| e.to_string())
    }

    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), String> {
        self.client
            .set_with_expiry(&self.key(key), value, ttl_seconds)
            .await
            .map_err(|e| e.to_string())
    }

    async fn delete(&self, keys: &[String]) -> Result<(), String> {
        let keys: Vec<String> = keys.iter().map(|key| self.key(key)).collect();
        let deleted = self
            .client
            .delete(&keys)
            .await
            .map_err(|e| e.to_string())?;
        debug!(requested = keys.len(), deleted, "Deleted ephemeral records");
        Ok(())
    }
}
