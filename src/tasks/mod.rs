//! Background Tasks Module
//!
//! # Tasks
//! - TTL Cleanup: Sweeps expired keys from the in-memory backend

mod cleanup;

pub use cleanup::spawn_cleanup_task;
