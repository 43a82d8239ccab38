//! Cache Module
//!
//! Stores values under freshly generated keys and reads them back typed.
//! Every `store` call is counted and recorded in call history.

use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use super::decode::{decode_float, decode_int, decode_str};
use super::CacheValue;
use crate::error::Result;
use crate::instrument::{instrument, replay, CallLog, Instrumented, Operation};
use crate::store::SharedStore;

/// Identity under which `Cache::store` calls are recorded.
pub const STORE_OPERATION: &str = "Cache.store";

// == Store Value Operation ==
/// Writes a value under a new random key and returns the key.
struct StoreValue {
    store: SharedStore,
}

#[async_trait]
impl Operation for StoreValue {
    type Input = CacheValue;
    type Output = String;

    fn name(&self) -> &str {
        STORE_OPERATION
    }

    async fn call(&self, input: CacheValue) -> Result<String> {
        let key = Uuid::new_v4().to_string();
        self.store.set(&key, &input.to_bytes()).await?;
        Ok(key)
    }
}

// == Cache ==
/// Typed value cache on top of a key-value store.
pub struct Cache {
    store: SharedStore,
    store_op: Instrumented<StoreValue>,
}

impl Cache {
    // == Constructor ==
    /// Creates a Cache over `store`.
    ///
    /// # Arguments
    /// * `store` - Connection handle to the backend
    /// * `flush_on_init` - Remove every key in the backend first
    pub async fn new(store: SharedStore, flush_on_init: bool) -> Result<Self> {
        if flush_on_init {
            store.flush().await?;
            info!("Flushed {} store", store.backend_name());
        }

        let store_op = instrument(
            StoreValue {
                store: store.clone(),
            },
            store.clone(),
        );

        Ok(Self { store, store_op })
    }

    // == Store ==
    /// Stores `data` under a new unique key and returns the key.
    pub async fn store(&self, data: impl Into<CacheValue>) -> Result<String> {
        self.store_op.call(data.into()).await
    }

    // == Get ==
    /// Returns the raw bytes stored under `key`, or None if absent.
    pub async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.store.get(key).await
    }

    /// Returns the value under `key` passed through `decoder`, or None if absent.
    pub async fn get_with<T, F>(&self, key: &str, decoder: F) -> Result<Option<T>>
    where
        F: FnOnce(&[u8]) -> Result<T>,
    {
        self.get(key).await?.map(|raw| decoder(&raw)).transpose()
    }

    /// Returns the value under `key` as UTF-8 text.
    pub async fn get_str(&self, key: &str) -> Result<Option<String>> {
        self.get_with(key, decode_str).await
    }

    /// Returns the value under `key` as a decimal integer.
    pub async fn get_int(&self, key: &str) -> Result<Option<i64>> {
        self.get_with(key, decode_int).await
    }

    /// Returns the value under `key` as a float.
    pub async fn get_float(&self, key: &str) -> Result<Option<f64>> {
        self.get_with(key, decode_float).await
    }

    // == Replay ==
    /// Returns the recorded history of `store` calls.
    pub async fn replay_store(&self) -> Result<CallLog> {
        replay(self.store.as_ref(), STORE_OPERATION).await
    }

    /// Identity under which `store` calls are recorded.
    pub fn store_operation_name(&self) -> &str {
        self.store_op.name()
    }
}
