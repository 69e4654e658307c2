pub mod ttl_cache;
pub mod ttl_cache_trait;
