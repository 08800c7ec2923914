//! In-memory response cache keyed by endpoint
//!
//! Stores parsed JSON payloads with the time they were fetched. Freshness is
//! decided at read time against a caller-supplied TTL; expired entries stay in
//! the map until they are overwritten or the whole cache is cleared.

use chrono::{DateTime, Duration, Utc};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// A stored response
#[derive(Debug, Clone)]
struct CacheEntry {
    /// The parsed payload
    value: Value,
    /// When the payload was fetched
    fetched_at: DateTime<Utc>,
}

/// Result of reading from the cache, including freshness metadata
#[derive(Debug, Clone, PartialEq)]
pub struct CachedData {
    /// The cached payload
    pub data: Value,
    /// When the payload was fetched
    pub fetched_at: DateTime<Utc>,
    /// Whether the entry is older than the TTL it was read with
    pub is_expired: bool,
}

/// Keyed store of fetched responses
///
/// At most one entry exists per key and a write replaces it wholesale. There
/// is no size bound and no per-entry eviction.
#[derive(Debug, Default)]
pub struct ResponseCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl ResponseCache {
    pub fn new() -> Self {
        Self::default()
    }

    // Recover the map from a poisoned lock
    fn lock(&self) -> MutexGuard<'_, HashMap<String, CacheEntry>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Reads an entry, reporting whether it is older than `ttl` at `now`
    ///
    /// Returns `None` if nothing is stored under `key`.
    pub fn read(&self, key: &str, now: DateTime<Utc>, ttl: Duration) -> Option<CachedData> {
        let entries = self.lock();
        let entry = entries.get(key)?;
        Some(CachedData {
            data: entry.value.clone(),
            fetched_at: entry.fetched_at,
            is_expired: now - entry.fetched_at >= ttl,
        })
    }

    /// Returns the payload only if it is still fresh
    pub fn fresh(&self, key: &str, now: DateTime<Utc>, ttl: Duration) -> Option<Value> {
        self.read(key, now, ttl)
            .filter(|cached| !cached.is_expired)
            .map(|cached| cached.data)
    }

    /// Stores a payload, replacing any previous entry for `key`
    pub fn write(&self, key: &str, value: Value, fetched_at: DateTime<Utc>) {
        self.lock()
            .insert(key.to_string(), CacheEntry { value, fetched_at });
    }

    /// Drops every entry
    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.lock().contains_key(key)
    }
}
