//! Web Module
//!
//! Expiring page cache with per-URL access tracking.

mod expiring;
mod fetcher;

pub use expiring::{cached_key, count_key, ExpiringFetchCache};
pub use fetcher::{Fetcher, HttpFetcher};
