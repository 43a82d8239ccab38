//! In-Memory Store Module
//!
//! HashMap-backed implementation of the key-value contract with Redis command
//! semantics for strings, counters, lists and TTL expiration.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::entry::{StoreEntry, StoredValue};
use super::KeyValueStore;
use crate::error::{CacheError, Result};

const WRONG_TYPE: &str = "WRONGTYPE Operation against a key holding the wrong kind of value";
const NOT_AN_INTEGER: &str = "ERR value is not an integer or out of range";

// == Memory Store ==
/// In-process key-value backend.
///
/// Cloning is cheap and every clone shares the same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Keyspace>>,
}

impl MemoryStore {
    // == Constructor ==
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // == Cleanup Expired ==
    /// Removes all expired keys.
    ///
    /// Returns the number of keys removed.
    pub async fn cleanup_expired(&self) -> usize {
        self.inner.write().await.cleanup_expired()
    }

    // == Length ==
    /// Returns the number of keys currently held, expired ones included until swept.
    pub async fn len(&self) -> usize {
        self.inner.read().await.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the store holds no keys.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.entries.is_empty()
    }
}

// == Keyspace ==
/// The synchronous core guarded by the store's lock.
#[derive(Debug, Default)]
struct Keyspace {
    entries: HashMap<String, StoreEntry>,
}

impl Keyspace {
    /// Returns the live entry for `key`, dropping it first if it has expired.
    fn live(&mut self, key: &str) -> Option<&mut StoreEntry> {
        if self.entries.get(key).is_some_and(StoreEntry::is_expired) {
            self.entries.remove(key);
        }
        self.entries.get_mut(key)
    }

    fn set(&mut self, key: &str, value: &[u8], ttl: Option<u64>) {
        let entry = StoreEntry::new(StoredValue::Bytes(value.to_vec()), ttl);
        self.entries.insert(key.to_string(), entry);
    }

    fn get(&mut self, key: &str) -> Result<Option<Vec<u8>>> {
        match self.live(key).map(|entry| &entry.value) {
            Some(StoredValue::Bytes(bytes)) => Ok(Some(bytes.clone())),
            Some(StoredValue::List(_)) => Err(CacheError::Store(WRONG_TYPE.to_string())),
            None => Ok(None),
        }
    }

    fn incr(&mut self, key: &str) -> Result<i64> {
        let Some(entry) = self.live(key) else {
            self.set(key, b"1", None);
            return Ok(1);
        };

        let StoredValue::Bytes(bytes) = &mut entry.value else {
            return Err(CacheError::Store(WRONG_TYPE.to_string()));
        };

        // TTL is kept, as Redis does for INCR
        let next = std::str::from_utf8(bytes)
            .ok()
            .and_then(|text| text.parse::<i64>().ok())
            .and_then(|current| current.checked_add(1))
            .ok_or_else(|| CacheError::Store(NOT_AN_INTEGER.to_string()))?;
        *bytes = next.to_string().into_bytes();
        Ok(next)
    }

    fn rpush(&mut self, key: &str, value: &[u8]) -> Result<usize> {
        let Some(entry) = self.live(key) else {
            let list = StoredValue::List(vec![value.to_vec()]);
            self.entries.insert(key.to_string(), StoreEntry::new(list, None));
            return Ok(1);
        };

        match &mut entry.value {
            StoredValue::List(items) => {
                items.push(value.to_vec());
                Ok(items.len())
            }
            StoredValue::Bytes(_) => Err(CacheError::Store(WRONG_TYPE.to_string())),
        }
    }

    fn lrange(&mut self, key: &str, start: isize, stop: isize) -> Result<Vec<Vec<u8>>> {
        match self.live(key).map(|entry| &entry.value) {
            Some(StoredValue::List(items)) => {
                let range = range_bounds(items.len(), start, stop);
                Ok(items[range].to_vec())
            }
            Some(StoredValue::Bytes(_)) => Err(CacheError::Store(WRONG_TYPE.to_string())),
            None => Ok(Vec::new()),
        }
    }

    fn cleanup_expired(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired());
        before - self.entries.len()
    }
}

/// Resolves LRANGE indexes against a list of `len` items.
fn range_bounds(len: usize, start: isize, stop: isize) -> std::ops::Range<usize> {
    let len_i = len as isize;
    let start = if start < 0 { (start + len_i).max(0) } else { start };
    let stop = if stop < 0 { stop + len_i } else { stop.min(len_i - 1) };

    if start > stop || start >= len_i {
        return 0..0;
    }
    start as usize..(stop + 1) as usize
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        self.inner.write().await.set(key, value, None);
        Ok(())
    }

    async fn set_ex(&self, key: &str, value: &[u8], ttl_secs: u64) -> Result<()> {
        if ttl_secs == 0 {
            return Err(CacheError::InvalidArgument(
                "invalid expire time in 'setex' command".to_string(),
            ));
        }
        self.inner.write().await.set(key, value, Some(ttl_secs));
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        // Write lock: reads may evict an expired key
        self.inner.write().await.get(key)
    }

    async fn incr(&self, key: &str) -> Result<i64> {
        self.inner.write().await.incr(key)
    }

    async fn rpush(&self, key: &str, value: &[u8]) -> Result<usize> {
        self.inner.write().await.rpush(key, value)
    }

    async fn lrange(&self, key: &str, start: isize, stop: isize) -> Result<Vec<Vec<u8>>> {
        self.inner.write().await.lrange(key, start, stop)
    }

    async fn flush(&self) -> Result<()> {
        self.inner.write().await.entries.clear();
        Ok(())
    }

    fn backend_name(&self) -> &str {
        "memory"
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_store_new() {
        let store = MemoryStore::new();
        assert_eq!(store.len().await, 0);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_set_and_get() {
        let store = MemoryStore::new();

        store.set("key1", b"value1").await.unwrap();
        assert_eq!(store.get("key1").await.unwrap(), Some(b"value1".to_vec()));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_get_nonexistent() {
        let store = MemoryStore::new();
        assert_eq!(store.get("nonexistent").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_overwrite_clears_ttl() {
        let store = MemoryStore::new();

        store.set_ex("key1", b"value1", 1).await.unwrap();
        store.set("key1", b"value2").await.unwrap();

        tokio::time::sleep(Duration::from_millis(1100)).await;
        assert_eq!(store.get("key1").await.unwrap(), Some(b"value2".to_vec()));
    }

    #[tokio::test]
    async fn test_set_ex_expiration() {
        let store = MemoryStore::new();

        store.set_ex("key1", b"value1", 1).await.unwrap();
        assert!(store.get("key1").await.unwrap().is_some());

        tokio::time::sleep(Duration::from_millis(1100)).await;
        assert_eq!(store.get("key1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_ex_zero_ttl_rejected() {
        let store = MemoryStore::new();
        let result = store.set_ex("key1", b"value1", 0).await;
        assert!(matches!(result, Err(CacheError::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn test_incr() {
        let store = MemoryStore::new();

        assert_eq!(store.incr("counter").await.unwrap(), 1);
        assert_eq!(store.incr("counter").await.unwrap(), 2);
        assert_eq!(store.get("counter").await.unwrap(), Some(b"2".to_vec()));

        store.set("counter", b"41").await.unwrap();
        assert_eq!(store.incr("counter").await.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_incr_not_an_integer() {
        let store = MemoryStore::new();

        store.set("text", b"hello").await.unwrap();
        assert!(matches!(store.incr("text").await, Err(CacheError::Store(_))));

        store.set("max", i64::MAX.to_string().as_bytes()).await.unwrap();
        assert!(matches!(store.incr("max").await, Err(CacheError::Store(_))));
    }

    #[tokio::test]
    async fn test_rpush_and_lrange() {
        let store = MemoryStore::new();

        assert_eq!(store.rpush("list", b"a").await.unwrap(), 1);
        assert_eq!(store.rpush("list", b"b").await.unwrap(), 2);
        assert_eq!(store.rpush("list", b"c").await.unwrap(), 3);

        let all = store.lrange("list", 0, -1).await.unwrap();
        assert_eq!(all, vec![b"a".to_vec(), b"b".to_vec(), b"c".to_vec()]);

        assert_eq!(store.lrange("list", 1, 1).await.unwrap(), vec![b"b".to_vec()]);
        assert_eq!(store.lrange("list", -2, 10).await.unwrap().len(), 2);
        assert!(store.lrange("list", 5, 10).await.unwrap().is_empty());
        assert!(store.lrange("list", 2, 1).await.unwrap().is_empty());
        assert!(store.lrange("missing", 0, -1).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_wrong_type_errors() {
        let store = MemoryStore::new();

        store.set("string", b"value").await.unwrap();
        store.rpush("list", b"item").await.unwrap();

        assert!(matches!(store.rpush("string", b"x").await, Err(CacheError::Store(_))));
        assert!(matches!(store.lrange("string", 0, -1).await, Err(CacheError::Store(_))));
        assert!(matches!(store.get("list").await, Err(CacheError::Store(_))));
        assert!(matches!(store.incr("list").await, Err(CacheError::Store(_))));
    }

    #[tokio::test]
    async fn test_flush() {
        let store = MemoryStore::new();

        store.set("a", b"1").await.unwrap();
        store.rpush("b", b"2").await.unwrap();
        store.flush().await.unwrap();

        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_cleanup_expired() {
        let store = MemoryStore::new();

        store.set_ex("key1", b"value1", 1).await.unwrap();
        store.set_ex("key2", b"value2", 10).await.unwrap();

        tokio::time::sleep(Duration::from_millis(1100)).await;

        assert_eq!(store.cleanup_expired().await, 1);
        assert_eq!(store.len().await, 1);
        assert!(store.get("key2").await.unwrap().is_some());
    }

    #[test]
    fn test_range_bounds() {
        assert_eq!(range_bounds(3, 0, -1), 0..3);
        assert_eq!(range_bounds(3, -1, -1), 2..3);
        assert_eq!(range_bounds(3, -10, 1), 0..2);
        assert_eq!(range_bounds(0, 0, -1), 0..0);
        assert_eq!(range_bounds(3, 3, 5), 0..0);
    }
}
