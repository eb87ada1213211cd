//! Storage for resolved user IDs

use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;

const CACHE_KEY_PREFIX: &str = "scratchsig::userIdByUsername";
const DEFAULT_MAX_ENTRIES: u64 = 10_000;

/// Namespaced cache key for a normalized username
pub fn cache_key(username: &str) -> String {
    format!("{CACHE_KEY_PREFIX}[{username}]")
}

/// Shared key-value store for resolved user IDs.
///
/// Implementations must tolerate concurrent readers and writers. Expiry, if
/// any, is the store's own business.
#[async_trait]
pub trait IdCache: Send + Sync {
    async fn get(&self, key: &str) -> Option<String>;
    async fn set(&self, key: &str, user_id: String);
}

/// In-process `IdCache` backed by a moka async cache
#[derive(Clone)]
pub struct MokaIdCache {
    cache: Cache<String, String>,
}

impl MokaIdCache {
    /// Bounded cache whose entries never expire
    pub fn new(max_entries: u64) -> Self {
        Self::with_ttl(max_entries, None)
    }

    /// Bounded cache with an optional time-to-live per entry
    pub fn with_ttl(max_entries: u64, ttl: Option<Duration>) -> Self {
        let mut builder = Cache::builder().max_capacity(max_entries);
        if let Some(ttl) = ttl {
            builder = builder.time_to_live(ttl);
        }
        Self {
            cache: builder.build(),
        }
    }
}

impl Default for MokaIdCache {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ENTRIES)
    }
}

#[async_trait]
impl IdCache for MokaIdCache {
    async fn get(&self, key: &str) -> Option<String> {
        self.cache.get(key).await
    }

    async fn set(&self, key: &str, user_id: String) {
        self.cache.insert(key.to_string(), user_id).await;
    }
}
