//! Error types for the cache library
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache library.
///
/// A missing key is not an error: lookups return `Ok(None)` instead.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Backend unavailable, connection dropped, or a command hit a value of the wrong type
    #[error("Store error: {0}")]
    Store(String),

    /// Stored bytes could not be decoded into the requested type
    #[error("Decode error: {0}")]
    Decode(String),

    /// The external fetch collaborator failed
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// An argument was rejected before reaching the store
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration could not be turned into a working backend
    #[error("Config error: {0}")]
    Config(String),
}

// == Conversions ==
impl From<redis::RedisError> for CacheError {
    fn from(err: redis::RedisError) -> Self {
        CacheError::Store(err.to_string())
    }
}

impl From<reqwest::Error> for CacheError {
    fn from(err: reqwest::Error) -> Self {
        CacheError::Fetch(err.to_string())
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache library.
pub type Result<T> = std::result::Result<T, CacheError>;
