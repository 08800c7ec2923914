//! Cache module for API responses
//!
//! Holds parsed responses in memory for the lifetime of the client that owns
//! them. Nothing is written to disk and nothing survives a restart.

mod store;

pub use store::{CachedData, ResponseCache};
