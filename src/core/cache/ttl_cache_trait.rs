use std::time::Duration;

use async_trait::async_trait;

/// Process-wide string cache with per-entry expiry.
#[async_trait]
pub trait TtlCache: Send + Sync {
    /// Live value for `key`, if any.
    async fn get(&self, key: &str) -> Option<String>;

    /// Store with the cache's default expiry.
    async fn set(&self, key: &str, value: String);

    async fn set_with_ttl(&self, key: &str, value: String, ttl: Duration);
}
