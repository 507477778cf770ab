//! In-memory TTL cache.
//!
//! Entries live for the lifetime of the owning value and are never written to
//! disk. An entry is usable while `now < expiry`; an expired entry is replaced
//! on the next write, never read.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Default time-to-live for derived statistics.
pub const DEFAULT_TTL: Duration = Duration::from_millis(7000);

/// A cached value with its expiry instant.
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    pub value: T,
    pub expiry: Instant,
}

impl<T> CacheEntry<T> {
    /// Whether the entry may still be read at `now`.
    #[must_use]
    pub fn is_fresh_at(&self, now: Instant) -> bool {
        now < self.expiry
    }
}

/// A keyed cache whose entries expire after a fixed TTL.
///
/// Reads and writes take the lock separately; there is no atomic
/// check-and-set, so two callers missing at the same time both compute and
/// the later write wins.
#[derive(Debug)]
pub struct TtlCache<T> {
    ttl: Duration,
    entries: Mutex<HashMap<String, CacheEntry<T>>>,
}

impl<T: Clone> TtlCache<T> {
    /// Create an empty cache with the given TTL.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Configured time-to-live.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Return a clone of the value for `key` if it is still fresh.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<T> {
        self.get_at(key, Instant::now())
    }

    /// Same as [`get`](Self::get) with an explicit clock reading.
    #[must_use]
    pub fn get_at(&self, key: &str, now: Instant) -> Option<T> {
        let entries = self.lock();
        entries
            .get(key)
            .filter(|entry| entry.is_fresh_at(now))
            .map(|entry| entry.value.clone())
    }

    /// Store `value` under `key`, replacing any previous entry.
    pub fn insert(&self, key: impl Into<String>, value: T) {
        self.insert_at(key, value, Instant::now());
    }

    /// Same as [`insert`](Self::insert) with an explicit clock reading.
    pub fn insert_at(&self, key: impl Into<String>, value: T, now: Instant) {
        let entry = CacheEntry {
            value,
            expiry: now + self.ttl,
        };
        self.lock().insert(key.into(), entry);
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Number of stored entries, fresh or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the cache holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // A poisoned lock only means another thread panicked mid-insert; the map
    // itself is still a valid HashMap.
    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, CacheEntry<T>>> {
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl<T: Clone> Default for TtlCache<T> {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}
