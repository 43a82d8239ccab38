//! Decoders
//!
//! Byte-to-value conversions for reading typed values back from the store.

use crate::error::{CacheError, Result};

/// Decodes UTF-8 text.
pub fn decode_str(raw: &[u8]) -> Result<String> {
    String::from_utf8(raw.to_vec())
        .map_err(|e| CacheError::Decode(format!("invalid UTF-8: {}", e)))
}

/// Decodes a decimal integer.
pub fn decode_int(raw: &[u8]) -> Result<i64> {
    let text = std::str::from_utf8(raw)
        .map_err(|e| CacheError::Decode(format!("invalid UTF-8: {}", e)))?;
    text.trim()
        .parse()
        .map_err(|_| CacheError::Decode(format!("not an integer: {:?}", text)))
}

/// Decodes a float literal, including `inf`, `-inf` and `nan`.
pub fn decode_float(raw: &[u8]) -> Result<f64> {
    let text = std::str::from_utf8(raw)
        .map_err(|e| CacheError::Decode(format!("invalid UTF-8: {}", e)))?;
    text.trim()
        .parse()
        .map_err(|_| CacheError::Decode(format!("not a float: {:?}", text)))
}
