//! Redis Backend Integration Tests
//!
//! Runs the cache against a real Redis server. Tests skip themselves when no
//! server answers at `REDIS_URL` (default redis://127.0.0.1:6379).
//!
//! These tests flush the selected database.

use std::sync::Arc;

use redis_memo::{Cache, KeyValueStore, RedisStore, SharedStore};

fn redis_url() -> String {
    std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string())
}

/// Connects to Redis, or returns None if it is not reachable
async fn connect() -> Option<RedisStore> {
    let url = redis_url();
    let connecting = RedisStore::connect(&url);
    match tokio::time::timeout(std::time::Duration::from_secs(2), connecting).await {
        Ok(Ok(store)) => Some(store),
        _ => None,
    }
}

macro_rules! require_redis {
    () => {
        match connect().await {
            Some(store) => store,
            None => {
                eprintln!("Skipping test: Redis not available at {}", redis_url());
                return;
            }
        }
    };
}

// All tests share one database, so they run as a single sequence
#[tokio::test]
async fn test_redis_backend() {
    let store = require_redis!();
    assert_eq!(store.url(), redis_url());
    let shared: SharedStore = Arc::new(store.clone());

    store_commands(&store).await;
    cache_roundtrip(shared).await;
}

async fn store_commands(store: &RedisStore) {
    store.flush().await.unwrap();

    store.set("k", b"v").await.unwrap();
    assert_eq!(store.get("k").await.unwrap(), Some(b"v".to_vec()));
    assert_eq!(store.get("missing").await.unwrap(), None);

    assert_eq!(store.incr("n").await.unwrap(), 1);
    assert_eq!(store.incr("n").await.unwrap(), 2);

    store.rpush("l", b"a").await.unwrap();
    assert_eq!(store.rpush("l", b"b").await.unwrap(), 2);
    assert_eq!(
        store.lrange("l", 0, -1).await.unwrap(),
        vec![b"a".to_vec(), b"b".to_vec()]
    );

    store.set_ex("t", b"x", 10).await.unwrap();
    assert!(store.get("t").await.unwrap().is_some());
    assert!(store.incr("k").await.is_err());
}

async fn cache_roundtrip(store: SharedStore) {
    let cache = Cache::new(store, true).await.unwrap();

    let k1 = cache.store("foo").await.unwrap();
    let k2 = cache.store(42).await.unwrap();

    assert_eq!(cache.get_str(&k1).await.unwrap().as_deref(), Some("foo"));
    assert_eq!(cache.get_int(&k2).await.unwrap(), Some(42));

    let log = cache.replay_store().await.unwrap();
    assert_eq!(
        log.lines(),
        vec![
            "store was called 2 times:".to_string(),
            format!("store(*('foo',)) -> {}", k1),
            format!("store(*(42,)) -> {}", k2),
        ]
    );
}
