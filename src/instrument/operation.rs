//! Instrumented Operations
//!
//! Decorators that record call counts and call history for an operation in
//! the key-value store, without touching the operation itself.

use std::fmt;

use async_trait::async_trait;
use tracing::debug;

use super::args::CallArgs;
use crate::error::Result;
use crate::store::SharedStore;

// == Operation ==
/// An async operation with a stable identity.
///
/// The identity (`name`) keys every record kept about the operation, so it
/// must not change between runs.
#[async_trait]
pub trait Operation: Send + Sync {
    /// Positional arguments of one call
    type Input: CallArgs + Send + 'static;
    /// Result of one call, recorded through its `Display` form
    type Output: fmt::Display + Send + 'static;

    /// Stable identity, e.g. `Cache.store`.
    fn name(&self) -> &str;

    /// Runs the operation.
    async fn call(&self, input: Self::Input) -> Result<Self::Output>;
}

/// Key of the list holding rendered inputs of `name`.
pub fn inputs_key(name: &str) -> String {
    format!("{}:inputs", name)
}

/// Key of the list holding rendered outputs of `name`.
pub fn outputs_key(name: &str) -> String {
    format!("{}:outputs", name)
}

// == Call Counter ==
/// Increments a counter keyed by the operation name on every call.
///
/// The increment happens before delegating, so failed calls are counted too.
pub struct CallCounter<O> {
    inner: O,
    store: SharedStore,
}

impl<O: Operation> CallCounter<O> {
    /// Wraps `inner`, counting calls in `store`.
    pub fn new(inner: O, store: SharedStore) -> Self {
        Self { inner, store }
    }

    /// Returns the wrapped operation.
    pub fn inner(&self) -> &O {
        &self.inner
    }
}

#[async_trait]
impl<O: Operation> Operation for CallCounter<O> {
    type Input = O::Input;
    type Output = O::Output;

    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn call(&self, input: Self::Input) -> Result<Self::Output> {
        let calls = self.store.incr(self.name()).await?;
        debug!("{} call #{}", self.name(), calls);
        self.inner.call(input).await
    }
}

// == Call History ==
/// Appends each call's rendered inputs and output to per-operation lists.
///
/// The input is pushed before delegating and the output only on success, so
/// a failed call leaves the two lists one entry out of step. Concurrent
/// callers can also interleave their pushes. Readers pair the lists
/// positionally and truncate to the shorter one.
pub struct CallHistory<O> {
    inner: O,
    store: SharedStore,
}

impl<O: Operation> CallHistory<O> {
    /// Wraps `inner`, recording history in `store`.
    pub fn new(inner: O, store: SharedStore) -> Self {
        Self { inner, store }
    }

    /// Returns the wrapped operation.
    pub fn inner(&self) -> &O {
        &self.inner
    }
}

#[async_trait]
impl<O: Operation> Operation for CallHistory<O> {
    type Input = O::Input;
    type Output = O::Output;

    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn call(&self, input: Self::Input) -> Result<Self::Output> {
        let rendered = input.render_args();
        self.store
            .rpush(&inputs_key(self.name()), rendered.as_bytes())
            .await?;

        let output = self.inner.call(input).await?;
        self.store
            .rpush(&outputs_key(self.name()), output.to_string().as_bytes())
            .await?;

        Ok(output)
    }
}

// == Instrumented ==
/// An operation with both call counting and call history attached.
pub type Instrumented<O> = CallCounter<CallHistory<O>>;

/// Attaches call counting and call history to `op`.
pub fn instrument<O: Operation>(op: O, store: SharedStore) -> Instrumented<O> {
    CallCounter::new(CallHistory::new(op, store.clone()), store)
}
