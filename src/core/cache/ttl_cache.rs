use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::debug;

use super::ttl_cache_trait::TtlCache;

/// Longest expiry an entry can get, whatever the requested TTL.
pub const MAX_TTL: Duration = Duration::from_secs(60 * 60 * 24 * 30);
const FALLBACK_TTL: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
struct CacheEntry {
    value: String,
    expires_at: Instant,
}

/// In-memory [`TtlCache`]. Expired entries are invisible to readers and are
/// dropped by [`InMemoryTtlCache::purge_expired`].
pub struct InMemoryTtlCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    default_ttl: Duration,
}

impl InMemoryTtlCache {
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            default_ttl,
        }
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Remove expired entries and return how many were dropped.
    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut guard = self.entries.write().await;
        let before = guard.len();
        guard.retain(|_, entry| entry.expires_at > now);
        before - guard.len()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

#[async_trait]
impl TtlCache for InMemoryTtlCache {
    async fn get(&self, key: &str) -> Option<String> {
        let guard = self.entries.read().await;
        guard
            .get(key)
            .filter(|entry| entry.expires_at > Instant::now())
            .map(|entry| entry.value.clone())
    }

    async fn set(&self, key: &str, value: String) {
        self.set_with_ttl(key, value, self.default_ttl).await;
    }

    async fn set_with_ttl(&self, key: &str, value: String, ttl: Duration) {
        let now = Instant::now();
        let expires_at = now
            .checked_add(ttl.min(MAX_TTL))
            .unwrap_or_else(|| now + FALLBACK_TTL);
        let entry = CacheEntry { value, expires_at };
        self.entries.write().await.insert(key.to_string(), entry);
    }
}

/// Periodically purge expired entries for the lifetime of the process.
pub fn spawn_cache_janitor(cache: Arc<InMemoryTtlCache>, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every.max(Duration::from_secs(1)));
        // first tick fires immediately
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let purged = cache.purge_expired().await;
            if purged > 0 {
                debug!("Purged {} expired cache entr(ies)", purged);
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn entries_expire_after_ttl() {
        let cache = InMemoryTtlCache::new(Duration::from_secs(60));
        cache.set("k", "v".into()).await;

        tokio::time::advance(Duration::from_secs(59)).await;
        assert_eq!(cache.get("k").await.as_deref(), Some("v"));

        tokio::time::advance(Duration::from_secs(2)).await;
        assert_eq!(cache.get("k").await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn last_write_wins() {
        let cache = InMemoryTtlCache::new(Duration::from_secs(60));
        cache.set("k", "first".into()).await;
        cache.set("k", "second".into()).await;
        assert_eq!(cache.get("k").await.as_deref(), Some("second"));
    }

    #[tokio::test(start_paused = true)]
    async fn purge_drops_only_expired_entries() {
        let cache = InMemoryTtlCache::new(Duration::from_secs(60));
        cache.set_with_ttl("short", "a".into(), Duration::from_secs(5)).await;
        cache.set("long", "b".into()).await;

        tokio::time::advance(Duration::from_secs(10)).await;

        assert_eq!(cache.purge_expired().await, 1);
        assert_eq!(cache.len().await, 1);
        assert_eq!(cache.get("long").await.as_deref(), Some("b"));
    }

    #[tokio::test(start_paused = true)]
    async fn janitor_purges_in_background() {
        let cache = InMemoryTtlCache::new(Duration::from_secs(1)).shared();
        cache.set("k", "v".into()).await;

        let handle = spawn_cache_janitor(cache.clone(), Duration::from_secs(5));
        tokio::time::sleep(Duration::from_secs(6)).await;

        assert_eq!(cache.len().await, 0);
        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn huge_ttl_is_capped_instead_of_overflowing() {
        let cache = InMemoryTtlCache::new(Duration::MAX);
        cache.set("k", "v".into()).await;
        cache.set_with_ttl("other", "w".into(), Duration::from_secs(u64::MAX)).await;

        assert_eq!(cache.get("k").await.as_deref(), Some("v"));

        tokio::time::advance(MAX_TTL + Duration::from_secs(1)).await;
        assert_eq!(cache.get("k").await, None);
        assert_eq!(cache.get("other").await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn janitor_survives_zero_period() {
        let cache = InMemoryTtlCache::new(Duration::from_millis(500)).shared();
        cache.set("k", "v".into()).await;

        let handle = spawn_cache_janitor(cache.clone(), Duration::ZERO);
        tokio::time::sleep(Duration::from_secs(2)).await;

        assert!(!handle.is_finished());
        assert_eq!(cache.len().await, 0);
        handle.abort();
    }
}
