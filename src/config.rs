//! Configuration Module
//!
//! Handles loading backend and cache settings from environment variables.

use std::env;

/// Default TTL in seconds for pages held by the expiring fetch cache.
pub const DEFAULT_FETCH_TTL: u64 = 10;

/// Library configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Redis connection URL, None selects the in-memory backend
    pub redis_url: Option<String>,
    /// Whether a new Cache flushes the whole database
    pub flush_on_init: bool,
    /// TTL in seconds for fetched pages
    pub fetch_ttl: u64,
    /// HTTP request timeout in seconds
    pub fetch_timeout: u64,
    /// In-memory sweep interval in seconds
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `REDIS_URL` - Redis connection URL (default: unset, in-memory backend)
    /// - `FLUSH_ON_INIT` - Flush the database when a Cache is built (default: true)
    /// - `FETCH_TTL` - Fetched page TTL in seconds (default: 10)
    /// - `FETCH_TIMEOUT` - HTTP request timeout in seconds (default: 30)
    /// - `CLEANUP_INTERVAL` - In-memory sweep frequency in seconds (default: 1)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            redis_url: env::var("REDIS_URL").ok().filter(|v| !v.trim().is_empty()),
            flush_on_init: env::var("FLUSH_ON_INIT")
                .ok()
                .and_then(|v| parse_bool(&v))
                .unwrap_or(defaults.flush_on_init),
            fetch_ttl: env::var("FETCH_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|ttl| *ttl > 0)
                .unwrap_or(defaults.fetch_ttl),
            fetch_timeout: env::var("FETCH_TIMEOUT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.fetch_timeout),
            cleanup_interval: env::var("CLEANUP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|secs| *secs > 0)
                .unwrap_or(defaults.cleanup_interval),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            redis_url: None,
            flush_on_init: true,
            fetch_ttl: DEFAULT_FETCH_TTL,
            fetch_timeout: 30,
            cleanup_interval: 1,
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
