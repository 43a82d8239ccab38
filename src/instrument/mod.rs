//! Instrument Module
//!
//! Call counting, call history and replay for operations backed by the
//! key-value store.
//!
//! # Keys
//! - `{name}` - call counter
//! - `{name}:inputs` - rendered argument tuples, in call order
//! - `{name}:outputs` - rendered results, in call order

mod args;
mod operation;
mod replay;

pub use args::{float_literal, CallArgs, Repr};
pub use operation::{
    inputs_key, instrument, outputs_key, CallCounter, CallHistory, Instrumented, Operation,
};
pub use replay::{replay, CallLog, CallRecord};
