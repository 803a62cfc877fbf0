/// Single-slot memoization for pure compilation steps.
///
/// `MemoizeOne` remembers the result for the most recent argument only.
///
/// # Eviction
///
/// Capacity is one. A call whose key equals the stored key (structural
/// equality) returns the stored value; any other key recomputes and replaces
/// the slot. Failed computations are returned as-is and leave the slot
/// untouched.
///
/// Caching never changes results, it only skips recomputation when the same
/// argument arrives twice in a row.
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

pub struct MemoizeOne<K, V> {
    slot: Mutex<Option<(K, V)>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<K, V> Default for MemoizeOne<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> MemoizeOne<K, V> {
    pub fn new() -> Self {
        MemoizeOne {
            slot: Mutex::new(None),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Drop the stored entry; counters are kept
    pub fn clear(&self) {
        *self.lock() = None;
    }

    pub fn metrics(&self) -> CacheMetrics {
        CacheMetrics {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            occupied: self.lock().is_some(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<(K, V)>> {
        // A panic while holding the lock cannot leave a half-written slot.
        self.slot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<K: PartialEq + Clone, V: Clone> MemoizeOne<K, V> {
    /// Return the stored value when `key` matches the last key, otherwise run
    /// `compute` and store its successful result.
    pub fn get_or_try_compute<E, F>(&self, key: &K, compute: F) -> Result<V, E>
    where
        F: FnOnce(&K) -> Result<V, E>,
    {
        if let Some((cached_key, value)) = self.lock().as_ref() {
            if cached_key == key {
                self.hits.fetch_add(1, Ordering::Relaxed);
                log::debug!("Memoized result HIT");
                return Ok(value.clone());
            }
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        log::debug!("Memoized result MISS");
        let value = compute(key)?;
        *self.lock() = Some((key.clone(), value.clone()));
        Ok(value)
    }
}

/// Cache metrics for monitoring
#[derive(Debug, Clone, PartialEq)]
pub struct CacheMetrics {
    pub hits: u64,
    pub misses: u64,
    pub occupied: bool,
}

impl CacheMetrics {
    /// Calculate cache hit rate (0.0 to 1.0)
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
