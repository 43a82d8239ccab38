//! Replay Reporter
//!
//! Reads back what `CallCounter` and `CallHistory` recorded for an operation
//! and renders it as a readable call log.

use std::fmt;

use serde::Serialize;

use super::operation::{inputs_key, outputs_key};
use crate::cache::decode_int;
use crate::error::Result;
use crate::store::KeyValueStore;

// == Call Record ==
/// One recorded call: rendered arguments paired with the rendered result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallRecord {
    pub input: String,
    pub output: String,
}

// == Call Log ==
/// The recorded history of one operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallLog {
    /// Full operation identity, e.g. `Cache.store`
    pub name: String,
    /// Counter value, 0 when the operation was never called
    pub calls: u64,
    /// Input/output pairs, truncated to the shorter of the two lists
    pub entries: Vec<CallRecord>,
}

impl CallLog {
    /// Name shown in the log: the last segment of the identity.
    pub fn display_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }

    /// Header line followed by one line per recorded call.
    pub fn lines(&self) -> Vec<String> {
        let name = self.display_name();
        let mut lines = Vec::with_capacity(self.entries.len() + 1);
        lines.push(format!("{} was called {} times:", name, self.calls));
        lines.extend(
            self.entries
                .iter()
                .map(|record| format!("{}(*{}) -> {}", name, record.input, record.output)),
        );
        lines
    }
}

impl fmt::Display for CallLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lines().join("\n"))
    }
}

// == Replay ==
/// Reads the call count and history recorded under `name`.
///
/// Read-only: nothing in the store is modified.
pub async fn replay(store: &dyn KeyValueStore, name: &str) -> Result<CallLog> {
    let calls = match store.get(name).await? {
        Some(raw) => decode_int(&raw)?.max(0) as u64,
        None => 0,
    };

    let inputs = store.lrange(&inputs_key(name), 0, -1).await?;
    let outputs = store.lrange(&outputs_key(name), 0, -1).await?;

    let entries = inputs
        .iter()
        .zip(outputs.iter())
        .map(|(input, output)| CallRecord {
            input: String::from_utf8_lossy(input).into_owned(),
            output: String::from_utf8_lossy(output).into_owned(),
        })
        .collect();

    Ok(CallLog {
        name: name.to_string(),
        calls,
        entries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CacheError;
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn test_replay_never_called() {
        let store = MemoryStore::new();
        let log = replay(&store, "Cache.store").await.unwrap();

        assert_eq!(log.calls, 0);
        assert!(log.entries.is_empty());
        assert_eq!(log.lines(), vec!["store was called 0 times:"]);
    }

    #[tokio::test]
    async fn test_replay_pairs_inputs_and_outputs() {
        let store = MemoryStore::new();
        store.set("Cache.store", b"2").await.unwrap();
        store.rpush("Cache.store:inputs", b"('foo',)").await.unwrap();
        store.rpush("Cache.store:inputs", b"('bar',)").await.unwrap();
        store.rpush("Cache.store:outputs", b"k1").await.unwrap();
        store.rpush("Cache.store:outputs", b"k2").await.unwrap();

        let log = replay(&store, "Cache.store").await.unwrap();
        assert_eq!(
            log.to_string(),
            "store was called 2 times:\nstore(*('foo',)) -> k1\nstore(*('bar',)) -> k2"
        );
    }

    #[tokio::test]
    async fn test_replay_truncates_to_shorter_list() {
        let store = MemoryStore::new();
        store.set("Cache.store", b"3").await.unwrap();
        for input in [&b"(1,)"[..], b"(2,)", b"(3,)"] {
            store.rpush("Cache.store:inputs", input).await.unwrap();
        }
        store.rpush("Cache.store:outputs", b"a").await.unwrap();

        let log = replay(&store, "Cache.store").await.unwrap();
        assert_eq!(log.calls, 3);
        assert_eq!(log.entries.len(), 1);
        assert_eq!(log.lines()[1], "store(*(1,)) -> a");
    }

    #[tokio::test]
    async fn test_replay_has_no_side_effects() {
        let store = MemoryStore::new();
        replay(&store, "Cache.store").await.unwrap();
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_replay_bad_counter() {
        let store = MemoryStore::new();
        store.set("Cache.store", b"many").await.unwrap();

        let result = replay(&store, "Cache.store").await;
        assert!(matches!(result, Err(CacheError::Decode(_))));
    }

    #[test]
    fn test_display_name_without_owner() {
        let log = CallLog {
            name: "fetch".to_string(),
            calls: 1,
            entries: vec![CallRecord {
                input: "('x',)".to_string(),
                output: "y".to_string(),
            }],
        };
        assert_eq!(log.lines(), vec!["fetch was called 1 times:", "fetch(*('x',)) -> y"]);
    }

    #[test]
    fn test_call_log_serializes() {
        let log = CallLog {
            name: "Cache.store".to_string(),
            calls: 0,
            entries: Vec::new(),
        };
        let json = serde_json::to_value(&log).unwrap();
        assert_eq!(json["name"], "Cache.store");
        assert_eq!(json["calls"], 0);
    }
}
