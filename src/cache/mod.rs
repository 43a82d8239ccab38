//! Cache Module
//!
//! Typed value storage under generated keys, with every `store` call counted
//! and recorded for replay.

mod decode;
mod store;
mod value;


// Re-export public types
pub use decode::{decode_float, decode_int, decode_str};
pub use store::{Cache, STORE_OPERATION};
pub use value::CacheValue;
