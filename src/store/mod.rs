//! Store Module
//!
//! The key-value contract the cache is built on, with a Redis backend and an
//! in-memory backend that honors the same command semantics.

mod entry;
mod memory;
mod redis_store;

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;

pub use self::entry::{StoreEntry, StoredValue};
pub use self::memory::MemoryStore;
pub use self::redis_store::RedisStore;

/// Shared handle to a key-value backend.
pub type SharedStore = Arc<dyn KeyValueStore>;

// == Key-Value Contract ==
/// The subset of Redis commands the cache relies on.
///
/// Every method maps to a single command and is atomic on its own. Nothing
/// here groups several commands into a transaction.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// SET: stores `value` under `key`, replacing any previous value and TTL.
    async fn set(&self, key: &str, value: &[u8]) -> Result<()>;

    /// SETEX: stores `value` under `key`, expiring after `ttl_secs`.
    async fn set_ex(&self, key: &str, value: &[u8], ttl_secs: u64) -> Result<()>;

    /// GET: returns the raw bytes, or None when the key is absent or expired.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// INCR: increments the integer under `key` (0 when absent) and returns it.
    async fn incr(&self, key: &str) -> Result<i64>;

    /// RPUSH: appends `value` to the list under `key`, returning the new length.
    async fn rpush(&self, key: &str, value: &[u8]) -> Result<usize>;

    /// LRANGE: returns list items between `start` and `stop` inclusive.
    ///
    /// Negative indexes count from the end, so `(0, -1)` is the whole list.
    async fn lrange(&self, key: &str, start: isize, stop: isize) -> Result<Vec<Vec<u8>>>;

    /// FLUSHDB: removes every key.
    async fn flush(&self) -> Result<()>;

    /// Human-readable backend name for logs.
    fn backend_name(&self) -> &str;
}
