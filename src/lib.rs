//! Redis Memo - typed value caching on a key-value store
//!
//! Stores values under generated keys, records call counts and call history
//! for instrumented operations, replays that history, and memoizes fetched
//! pages under a TTL.

pub mod cache;
pub mod config;
pub mod error;
pub mod instrument;
pub mod store;
pub mod tasks;
pub mod web;

pub use cache::{Cache, CacheValue};
pub use config::Config;
pub use error::{CacheError, Result};
pub use instrument::{instrument, replay, CallLog, Operation};
pub use store::{KeyValueStore, MemoryStore, RedisStore, SharedStore};
pub use tasks::spawn_cleanup_task;
pub use web::{ExpiringFetchCache, Fetcher, HttpFetcher};
