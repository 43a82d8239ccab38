//! Expiring Fetch Cache
//!
//! Memoizes fetched pages under a TTL while counting every access.
//!
//! # Keys
//! - `count:{url}` - access counter, never expires
//! - `cached:{url}` - page content, expires after the TTL

use tracing::debug;

use super::fetcher::Fetcher;
use crate::cache::{decode_int, decode_str};
use crate::config::DEFAULT_FETCH_TTL;
use crate::error::{CacheError, Result};
use crate::store::SharedStore;

/// Key of the access counter for `url`.
pub fn count_key(url: &str) -> String {
    format!("count:{}", url)
}

/// Key of the cached content for `url`.
pub fn cached_key(url: &str) -> String {
    format!("cached:{}", url)
}

// == Expiring Fetch Cache ==
/// Page cache in front of a `Fetcher`.
pub struct ExpiringFetchCache<F> {
    store: SharedStore,
    fetcher: F,
    ttl: u64,
}

impl<F: Fetcher> ExpiringFetchCache<F> {
    // == Constructor ==
    /// Creates a cache holding pages for the default 10 seconds.
    pub fn new(store: SharedStore, fetcher: F) -> Self {
        Self {
            store,
            fetcher,
            ttl: DEFAULT_FETCH_TTL,
        }
    }

    /// Overrides the page TTL in seconds.
    pub fn with_ttl(mut self, ttl_secs: u64) -> Result<Self> {
        if ttl_secs == 0 {
            return Err(CacheError::InvalidArgument(
                "page TTL must be at least one second".to_string(),
            ));
        }
        self.ttl = ttl_secs;
        Ok(self)
    }

    /// Page TTL in seconds.
    pub fn ttl(&self) -> u64 {
        self.ttl
    }

    // == Get Page ==
    /// Returns the content of `url`, fetching it only when no live copy is cached.
    ///
    /// The access counter is incremented on every call, hit or miss.
    pub async fn get_page(&self, url: &str) -> Result<String> {
        let count = self.store.incr(&count_key(url)).await?;

        let cache_key = cached_key(url);
        if let Some(raw) = self.store.get(&cache_key).await? {
            debug!("Page cache hit for {} (access #{})", url, count);
            return decode_str(&raw);
        }

        debug!("Page cache miss for {} (access #{})", url, count);
        let content = self.fetcher.fetch(url).await?;
        self.store
            .set_ex(&cache_key, content.as_bytes(), self.ttl)
            .await?;

        Ok(content)
    }

    // == Access Count ==
    /// Returns how many times `url` was requested, 0 if never.
    pub async fn access_count(&self, url: &str) -> Result<u64> {
        match self.store.get(&count_key(url)).await? {
            Some(raw) => Ok(decode_int(&raw)?.max(0) as u64),
            None => Ok(0),
        }
    }

    /// Returns the wrapped fetcher.
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }
}
