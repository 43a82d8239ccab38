//! Cache Value Module
//!
//! The payload types a Cache can store and their byte encoding.

use crate::instrument::float_literal;

// == Cache Value ==
/// A storable payload.
#[derive(Debug, Clone, PartialEq)]
pub enum CacheValue {
    Str(String),
    Bytes(Vec<u8>),
    Int(i64),
    Float(f64),
}

impl CacheValue {
    /// Returns the bytes written to the store.
    ///
    /// Strings are UTF-8, bytes verbatim, integers decimal ASCII and floats
    /// their shortest round-trip literal.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            CacheValue::Str(s) => s.as_bytes().to_vec(),
            CacheValue::Bytes(b) => b.clone(),
            CacheValue::Int(i) => i.to_string().into_bytes(),
            CacheValue::Float(f) => float_literal(*f).into_bytes(),
        }
    }
}

impl From<&str> for CacheValue {
    fn from(value: &str) -> Self {
        CacheValue::Str(value.to_string())
    }
}

impl From<String> for CacheValue {
    fn from(value: String) -> Self {
        CacheValue::Str(value)
    }
}

impl From<&[u8]> for CacheValue {
    fn from(value: &[u8]) -> Self {
        CacheValue::Bytes(value.to_vec())
    }
}

impl<const N: usize> From<&[u8; N]> for CacheValue {
    fn from(value: &[u8; N]) -> Self {
        CacheValue::Bytes(value.to_vec())
    }
}

impl From<Vec<u8>> for CacheValue {
    fn from(value: Vec<u8>) -> Self {
        CacheValue::Bytes(value)
    }
}

impl From<i64> for CacheValue {
    fn from(value: i64) -> Self {
        CacheValue::Int(value)
    }
}

impl From<i32> for CacheValue {
    fn from(value: i32) -> Self {
        CacheValue::Int(value.into())
    }
}

impl From<f64> for CacheValue {
    fn from(value: f64) -> Self {
        CacheValue::Float(value)
    }
}
