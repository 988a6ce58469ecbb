//! Read-through cache for parsed signal data.
//!
//! A single `Mutex` guards the backing map. The lock is held only while the
//! map is read or written; the compute closure always runs without it, so a
//! slow parse never blocks readers of unrelated keys. Two concurrent misses
//! on the same key both compute and the later store wins.

use std::any::Any;
use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use tracing::debug;

/// Source of "now" for expiry checks.
pub trait Clock: Send + Sync + std::fmt::Debug {
    fn now(&self) -> Instant;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    base: Instant,
    offset: Mutex<Duration>,
}

impl ManualClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            base: Instant::now(),
            offset: Mutex::new(Duration::ZERO),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut offset = self.offset.lock().unwrap_or_else(PoisonError::into_inner);
        *offset += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.base + *self.offset.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[derive(Debug)]
struct CacheEntry {
    stored_at: Instant,
    value: Arc<dyn Any + Send + Sync>,
}

type Store = HashMap<String, CacheEntry>;

/// Memoizes computations by logical key for a caller-supplied TTL.
///
/// Values of different types can share one cache; an entry whose stored type
/// differs from the requested one is treated as a miss and overwritten.
#[derive(Debug)]
pub struct TtlCache {
    clock: Arc<dyn Clock>,
    store: Mutex<Store>,
}

impl TtlCache {
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    #[must_use]
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            store: Mutex::new(HashMap::new()),
        }
    }

    /// Return the cached value for `key`, or compute and store it.
    #[must_use]
    pub fn get_or_compute<T, F>(&self, key: &str, ttl: Duration, compute: F) -> T
    where
        T: Clone + Send + Sync + 'static,
        F: FnOnce() -> T,
    {
        match self.get_or_try_compute(key, ttl, || Ok::<T, Infallible>(compute())) {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }

    /// Fallible variant of [`Self::get_or_compute`].
    ///
    /// An error is handed back to the caller and nothing is stored, so the
    /// next call computes again.
    pub fn get_or_try_compute<T, E, F>(&self, key: &str, ttl: Duration, compute: F) -> Result<T, E>
    where
        T: Clone + Send + Sync + 'static,
        F: FnOnce() -> Result<T, E>,
    {
        if let Some(value) = self.lookup::<T>(key, ttl) {
            debug!(key, "cache hit");
            return Ok(value);
        }

        debug!(key, "cache miss");
        let value = compute()?;

        let entry = CacheEntry {
            stored_at: self.clock.now(),
            value: Arc::new(value.clone()),
        };
        self.lock().insert(key.to_string(), entry);

        Ok(value)
    }

    /// Drop every entry.
    pub fn clear_all(&self) {
        let mut store = self.lock();
        let dropped = store.len();
        store.clear();
        debug!(dropped, "cache cleared");
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lookup<T: Clone + 'static>(&self, key: &str, ttl: Duration) -> Option<T> {
        let now = self.clock.now();
        let store = self.lock();
        let entry = store.get(key)?;
        if now.saturating_duration_since(entry.stored_at) >= ttl {
            return None;
        }
        entry.value.downcast_ref::<T>().cloned()
    }

    // Entries are plain values, so a panic elsewhere cannot leave one half-written.
    fn lock(&self) -> MutexGuard<'_, Store> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for TtlCache {
    fn default() -> Self {
        Self::new()
    }
}
