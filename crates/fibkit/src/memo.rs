//! Memoized Fibonacci computation.
//!
//! [`MemoCache`] is an explicitly owned cache. With the `std` feature a
//! process-wide instance is also available through [`fibonacci_recursive_memo`]
//! and [`clear_memo`].

use alloc::{collections::BTreeMap, vec::Vec};
use core::convert::Infallible;

use crate::{Error, MAX_EXACT_INDEX, Result};

/// Counters describing how a [`MemoCache`] has been used.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Requests for an index `>= 2` that were answered straight from the cache
    pub hits: u64,
    /// Entries written to the cache
    pub inserts: u64,
}

/// A cache of Fibonacci numbers keyed by index.
///
/// Only indices `>= 2` are stored; the base cases are never cached. An entry,
/// once written, holds F(n) (wrapped, if it was produced by [`MemoCache::compute`]
/// beyond [`MAX_EXACT_INDEX`](crate::MAX_EXACT_INDEX)) and is only removed by
/// [`MemoCache::clear`].
#[derive(Debug, Clone, Default)]
pub struct MemoCache {
    entries: BTreeMap<i64, i64>,
    stats: CacheStats,
}

impl MemoCache {
    /// Create an empty cache
    pub const fn new() -> Self {
        Self { entries: BTreeMap::new(), stats: CacheStats { hits: 0, inserts: 0 } }
    }

    /// Compute F(n), reusing and extending the cache. Wraps on overflow.
    pub fn compute(&mut self, n: i64) -> i64 {
        match self.resolve(n, |a, b| Ok::<_, Infallible>(a.wrapping_add(b))) {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }

    /// Compute F(n), reusing and extending the cache.
    ///
    /// Fails with [`Error::Overflow`] if F(n) does not fit into an `i64`. On
    /// overflow every index up to [`MAX_EXACT_INDEX`] is still cached.
    ///
    /// Entries above [`MAX_EXACT_INDEX`] written by [`MemoCache::compute`] hold
    /// wrapped values and are never returned from here.
    pub fn try_compute(&mut self, n: i64) -> Result<i64> {
        let exact = n.min(MAX_EXACT_INDEX);
        let value = self.resolve(exact, |a, b| a.checked_add(b).ok_or(Error::Overflow { n }))?;
        match n > MAX_EXACT_INDEX {
            true => Err(Error::Overflow { n }),
            false => Ok(value),
        }
    }

    /// Discard all entries
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of cached entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The cached value for `n`, if present
    pub fn get(&self, n: i64) -> Option<i64> {
        self.entries.get(&n).copied()
    }

    /// Whether `n` has a cached value
    pub fn contains(&self, n: i64) -> bool {
        self.entries.contains_key(&n)
    }

    /// Usage counters; these are not affected by [`MemoCache::clear`]
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Reset the usage counters to zero
    pub fn reset_stats(&mut self) {
        self.stats = CacheStats::default();
    }

    fn lookup(&self, n: i64) -> Option<i64> {
        match n {
            ..=0 => Some(0),
            1 => Some(1),
            _ => self.get(n),
        }
    }

    // Walks the recursion F(k) = F(k-1) + F(k-2) with an explicit stack so the
    // depth is bounded by memory, not by the call stack. Each missing index is
    // inserted exactly once, smallest first.
    fn resolve<E>(&mut self, n: i64, add: impl Fn(i64, i64) -> Result<i64, E>) -> Result<i64, E> {
        if let Some(value) = self.lookup(n) {
            if n >= 2 {
                self.stats.hits += 1;
            }
            return Ok(value);
        }

        crate::trace!("memo miss for F({n}), {} entries cached", self.entries.len());

        let mut pending = Vec::from([n]);
        let mut value = 0;
        while let Some(&k) = pending.last() {
            match (self.lookup(k - 1), self.lookup(k - 2)) {
                (Some(a), Some(b)) => {
                    value = add(a, b)?;
                    self.entries.insert(k, value);
                    self.stats.inserts += 1;
                    crate::trace!("memo insert F({k}) = {value}");
                    pending.pop();
                }
                (None, _) => pending.push(k - 1),
                // F(k - 1) is cached, so everything it depended on is too
                (Some(_), None) => pending.push(k - 2),
            }
        }

        Ok(value)
    }
}

#[cfg(feature = "std")]
static SHARED_MEMO: std::sync::Mutex<MemoCache> = std::sync::Mutex::new(MemoCache::new());

#[cfg(feature = "std")]
fn shared_memo() -> std::sync::MutexGuard<'static, MemoCache> {
    // a panic while holding the lock cannot leave a wrong entry behind
    SHARED_MEMO.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

/// Compute F(n) with the process-wide memo cache.
///
/// Entries persist between calls until [`clear_memo`] is called. Wraps on overflow.
#[cfg(feature = "std")]
pub fn fibonacci_recursive_memo(n: i64) -> i64 {
    shared_memo().compute(n)
}

/// Discard every entry of the process-wide memo cache.
#[cfg(feature = "std")]
pub fn clear_memo() {
    shared_memo().clear();
}

/// Run `f` with read access to the process-wide memo cache.
#[cfg(feature = "std")]
pub fn with_shared_memo<R>(f: impl FnOnce(&MemoCache) -> R) -> R {
    f(&shared_memo())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fibonacci_iterative;

    #[test]
    fn test_base_cases_are_not_cached() {
        let mut cache = MemoCache::new();
        assert_eq!(cache.compute(-7), 0);
        assert_eq!(cache.compute(0), 0);
        assert_eq!(cache.compute(1), 1);
        assert!(cache.is_empty());
        assert_eq!(cache.stats(), CacheStats::default());
    }

    #[test]
    fn test_compute_fills_every_index_once() {
        let mut cache = MemoCache::new();
        assert_eq!(cache.compute(10), 55);
        assert_eq!(cache.len(), 9);
        assert_eq!(cache.stats().inserts, 9);
        for k in 2..=10 {
            assert_eq!(cache.get(k), Some(fibonacci_iterative(k)), "F({k})");
        }
        assert!(!cache.contains(11));
    }

    #[test]
    fn test_repeat_request_is_a_hit() {
        let mut cache = MemoCache::new();
        assert_eq!(cache.compute(20), 6765);
        let before = cache.stats();

        assert_eq!(cache.compute(20), 6765);
        assert_eq!(cache.stats().inserts, before.inserts);
        assert_eq!(cache.stats().hits, before.hits + 1);
    }

    #[test]
    fn test_extends_existing_entries() {
        let mut cache = MemoCache::new();
        cache.compute(10);
        assert_eq!(cache.compute(12), 144);
        assert_eq!(cache.stats().inserts, 11);
        assert_eq!(cache.len(), 11);
    }

    #[test]
    fn test_clear() {
        let mut cache = MemoCache::new();
        assert_eq!(cache.compute(50), 12586269025);
        cache.clear();
        assert!(cache.is_empty());
        cache.clear();
        assert!(cache.is_empty());

        assert_eq!(cache.compute(50), 12586269025);
        assert_eq!(cache.stats().inserts, 98);
        cache.reset_stats();
        assert_eq!(cache.stats(), CacheStats::default());
    }

    #[test]
    fn test_deep_index_does_not_overflow_the_stack() {
        let mut cache = MemoCache::new();
        assert_eq!(cache.compute(100_000), fibonacci_iterative(100_000));
        assert_eq!(cache.len(), 99_999);
    }

    #[test]
    fn test_try_compute_overflow_keeps_exact_entries() {
        let mut cache = MemoCache::new();
        assert_eq!(cache.try_compute(92), Ok(7_540_113_804_746_346_429));
        assert_eq!(cache.try_compute(200), Err(Error::Overflow { n: 200 }));
        assert_eq!(cache.len(), 91);
        assert!(!cache.contains(93));
    }

    #[test]
    fn test_try_compute_ignores_wrapped_entries() {
        let mut cache = MemoCache::new();
        cache.compute(150);
        assert!(cache.contains(150));

        assert_eq!(cache.try_compute(150), Err(Error::Overflow { n: 150 }));
        assert_eq!(cache.try_compute(151), Err(Error::Overflow { n: 151 }));
        assert_eq!(cache.try_compute(93), Err(Error::Overflow { n: 93 }));
        assert!(!cache.contains(151));
        assert_eq!(cache.try_compute(92), Ok(7_540_113_804_746_346_429));
    }

    #[test]
    fn test_compute_wraps_like_iterative() {
        let mut cache = MemoCache::new();
        assert_eq!(cache.compute(150), fibonacci_iterative(150));
    }
}
