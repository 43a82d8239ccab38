//! Redis Memo demo
//!
//! Stores a few values, reads them back, prints the replay of `Cache.store`
//! and, given a URL argument, fetches it twice through the expiring page cache.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use redis_memo::{
    spawn_cleanup_task, Cache, Config, ExpiringFetchCache, HttpFetcher, MemoryStore, RedisStore,
    SharedStore,
};

/// Main entry point for the demo.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Connect to Redis, or start the in-memory backend and its sweep task
/// 4. Exercise the cache and print its call history
/// 5. Optionally fetch a page twice through the expiring page cache
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "redis_memo=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    info!(
        "Configuration loaded: backend={}, flush_on_init={}, fetch_ttl={}s",
        config.redis_url.as_deref().unwrap_or("memory"),
        config.flush_on_init,
        config.fetch_ttl
    );

    let (store, cleanup_handle) = open_store(&config).await?;

    let cache = Cache::new(store.clone(), config.flush_on_init)
        .await
        .context("failed to initialize cache")?;

    let k_str = cache.store("hello").await?;
    let k_int = cache.store(42).await?;
    let k_bytes = cache.store(b"bytes".to_vec()).await?;
    let k_float = cache.store(3.14).await?;

    println!("{} -> {:?}", k_str, cache.get_str(&k_str).await?);
    println!("{} -> {:?}", k_int, cache.get_int(&k_int).await?);
    println!("{} -> {:?}", k_bytes, cache.get(&k_bytes).await?);
    println!("{} -> {:?}", k_float, cache.get_float(&k_float).await?);
    println!("{}", cache.replay_store().await?);

    if let Some(url) = std::env::args().nth(1) {
        let fetcher = HttpFetcher::new(Duration::from_secs(config.fetch_timeout))?;
        let pages = ExpiringFetchCache::new(store, fetcher).with_ttl(config.fetch_ttl)?;

        for _ in 0..2 {
            let content = pages
                .get_page(&url)
                .await
                .with_context(|| format!("failed to fetch {}", url))?;
            println!("{}: {} bytes", url, content.len());
        }
        println!("{} accessed {} times", url, pages.access_count(&url).await?);
    }

    if let Some(handle) = cleanup_handle {
        handle.abort();
        warn!("Cleanup task aborted");
    }

    info!("Done");
    Ok(())
}

/// Opens the configured backend.
///
/// The in-memory backend comes with a running sweep task.
async fn open_store(config: &Config) -> anyhow::Result<(SharedStore, Option<JoinHandle<()>>)> {
    match &config.redis_url {
        Some(url) => {
            let store = RedisStore::connect(url)
                .await
                .with_context(|| format!("failed to connect to {}", url))?;
            info!("Using Redis store at {}", store.url());
            Ok((Arc::new(store), None))
        }
        None => {
            let store = MemoryStore::new();
            let handle = spawn_cleanup_task(store.clone(), config.cleanup_interval);
            info!("Using in-memory store");
            Ok((Arc::new(store), Some(handle)))
        }
    }
}
