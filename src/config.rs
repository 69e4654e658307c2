use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_DATA_DIR: &str = "./data";
pub const DEFAULT_CACHE_TTL_SECS: u64 = 300;
pub const DEFAULT_CACHE_PURGE_SECS: u64 = 600;
pub const DEFAULT_OUTBOUND_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_METRICS_NAMESPACE: &str = "lma";

/// Upper bound for every duration setting (30 days).
pub const MAX_DURATION_SECS: u64 = 60 * 60 * 24 * 30;

/// Process configuration, read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub data_dir: PathBuf,
    pub cache_ttl: Duration,
    pub cache_purge_every: Duration,
    pub outbound_timeout: Duration,
    pub metrics_namespace: String,
    /// Daily rolling log files go here when set; stdout otherwise.
    pub log_dir: Option<PathBuf>,
    /// Settings that were rejected and replaced by their default. Read before
    /// logging is up, so they are reported by [`AppConfig::log_fallbacks`].
    pub fallbacks: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut fallbacks = Vec::new();

        let default_addr = SocketAddr::from(([0, 0, 0, 0], 8080));
        let bind_addr = parse_or(
            "STACKBOARD_BIND_ADDR",
            non_empty("STACKBOARD_BIND_ADDR"),
            default_addr,
            &mut fallbacks,
        );

        let mut secs = |key: &str, default: u64| {
            let value = match parse_or(key, non_empty(key), default, &mut fallbacks) {
                v @ 1..=MAX_DURATION_SECS => v,
                v => {
                    fallbacks.push(format!(
                        "{}={} is outside 1..={}, using default {}",
                        key, v, MAX_DURATION_SECS, default
                    ));
                    default
                }
            };
            Duration::from_secs(value)
        };

        let cache_ttl = secs("STACKBOARD_CACHE_TTL_SECS", DEFAULT_CACHE_TTL_SECS);
        let cache_purge_every = secs("STACKBOARD_CACHE_PURGE_SECS", DEFAULT_CACHE_PURGE_SECS);
        let outbound_timeout = secs("STACKBOARD_OUTBOUND_TIMEOUT_SECS", DEFAULT_OUTBOUND_TIMEOUT_SECS);

        Self {
            bind_addr,
            data_dir: non_empty("STACKBOARD_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR)),
            cache_ttl,
            cache_purge_every,
            outbound_timeout,
            metrics_namespace: non_empty("STACKBOARD_METRICS_NAMESPACE")
                .unwrap_or_else(|| DEFAULT_METRICS_NAMESPACE.to_string()),
            log_dir: non_empty("STACKBOARD_LOG_DIR").map(PathBuf::from),
            fallbacks,
        }
    }

    /// Emit one warning per rejected setting. Call once tracing is installed.
    pub fn log_fallbacks(&self) {
        for notice in &self.fallbacks {
            warn!("{}", notice);
        }
    }
}

fn parse_or<T>(key: &str, raw: Option<String>, default: T, fallbacks: &mut Vec<String>) -> T
where
    T: FromStr + std::fmt::Debug,
{
    match raw {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            fallbacks.push(format!(
                "Invalid value '{}' for {}, using default {:?}",
                raw, key, default
            ));
            default
        }),
    }
}
