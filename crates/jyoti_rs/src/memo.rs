//! Single-flight memoization with a bounded, expiring cache.
//!
//! At most one computation runs per key. Callers that arrive while it is
//! running block on the same flight and receive its result, error
//! included. Only successes are stored.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use lru::LruCache;
use parking_lot::{Condvar, Mutex};
use tracing::debug;

/// Cache counters since construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MemoStats {
    pub hits: u64,
    /// Requests not answered from the cache, waiters included.
    pub misses: u64,
    /// Computations actually started.
    pub computations: u64,
}

struct Entry<V> {
    value: V,
    stored_at: Instant,
}

enum Outcome<V, E> {
    Pending,
    Done(Result<V, E>),
    /// The computing thread panicked; waiters start over.
    Abandoned,
}

struct Flight<V, E> {
    outcome: Mutex<Outcome<V, E>>,
    done: Condvar,
}

impl<V: Clone, E: Clone> Flight<V, E> {
    fn new() -> Self {
        Self {
            outcome: Mutex::new(Outcome::Pending),
            done: Condvar::new(),
        }
    }

    /// Block until the flight settles. `None` if it was abandoned.
    fn wait(&self) -> Option<Result<V, E>> {
        let mut outcome = self.outcome.lock();
        while matches!(*outcome, Outcome::Pending) {
            self.done.wait(&mut outcome);
        }
        match &*outcome {
            Outcome::Done(result) => Some(result.clone()),
            Outcome::Pending | Outcome::Abandoned => None,
        }
    }

    fn settle(&self, outcome: Outcome<V, E>) {
        *self.outcome.lock() = outcome;
        self.done.notify_all();
    }
}

struct State<K: Hash + Eq, V, E> {
    cache: LruCache<K, Entry<V>>,
    in_flight: HashMap<K, Arc<Flight<V, E>>>,
}

impl<K: Hash + Eq, V: Clone, E> State<K, V, E> {
    fn fresh(&mut self, key: &K, ttl: Duration) -> Option<V> {
        let expired = match self.cache.get(key) {
            Some(entry) if entry.stored_at.elapsed() < ttl => return Some(entry.value.clone()),
            Some(_) => true,
            None => false,
        };
        if expired {
            self.cache.pop(key);
        }
        None
    }
}

enum Claim<V, E> {
    Hit(V),
    Wait(Arc<Flight<V, E>>),
    Lead(Arc<Flight<V, E>>),
}

/// Memoizes `K -> Result<V, E>` computations.
pub struct Memoizer<K: Hash + Eq, V, E> {
    name: &'static str,
    ttl: Duration,
    state: Mutex<State<K, V, E>>,
    hits: AtomicU64,
    misses: AtomicU64,
    computations: AtomicU64,
}

impl<K: Hash + Eq, V, E> std::fmt::Debug for Memoizer<K, V, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Memoizer")
            .field("name", &self.name)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl<K, V, E> Memoizer<K, V, E>
where
    K: Hash + Eq + Clone + Debug,
    V: Clone,
    E: Clone,
{
    pub fn new(name: &'static str, capacity: NonZeroUsize, ttl: Duration) -> Self {
        Self {
            name,
            ttl,
            state: Mutex::new(State {
                cache: LruCache::new(capacity),
                in_flight: HashMap::new(),
            }),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            computations: AtomicU64::new(0),
        }
    }

    /// Cached value for `key`, or the result of `compute`.
    ///
    /// `compute` runs at most once per call and only when no other caller
    /// is already computing `key`.
    pub fn get_or_compute<F>(&self, key: K, compute: F) -> Result<V, E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        let flight = loop {
            match self.claim(&key) {
                Claim::Hit(value) => return Ok(value),
                Claim::Wait(flight) => match flight.wait() {
                    Some(result) => return result,
                    None => debug!(cache = self.name, ?key, "flight abandoned, retrying"),
                },
                Claim::Lead(flight) => break flight,
            }
        };

        let mut lead = Lead {
            memo: self,
            key: &key,
            flight: &flight,
            settled: false,
        };
        self.computations.fetch_add(1, Ordering::Relaxed);
        let result = compute();
        lead.settle(&result);
        result
    }

    fn claim(&self, key: &K) -> Claim<V, E> {
        let mut state = self.state.lock();
        if let Some(value) = state.fresh(key, self.ttl) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            debug!(cache = self.name, ?key, "cache hit");
            return Claim::Hit(value);
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        if let Some(flight) = state.in_flight.get(key) {
            debug!(cache = self.name, ?key, "joining in-flight computation");
            return Claim::Wait(Arc::clone(flight));
        }
        debug!(cache = self.name, ?key, "cache miss");
        let flight = Arc::new(Flight::new());
        state.in_flight.insert(key.clone(), Arc::clone(&flight));
        Claim::Lead(flight)
    }

    pub fn stats(&self) -> MemoStats {
        MemoStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            computations: self.computations.load(Ordering::Relaxed),
        }
    }

    /// Cached entries, expired ones included until they are next touched.
    pub fn len(&self) -> usize {
        self.state.lock().cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every cached value. In-flight computations are unaffected.
    pub fn clear(&self) {
        self.state.lock().cache.clear();
    }
}

/// Owns the in-flight slot of the computing caller.
struct Lead<'a, K, V, E>
where
    K: Hash + Eq + Clone + Debug,
    V: Clone,
    E: Clone,
{
    memo: &'a Memoizer<K, V, E>,
    key: &'a K,
    flight: &'a Arc<Flight<V, E>>,
    settled: bool,
}

impl<K, V, E> Lead<'_, K, V, E>
where
    K: Hash + Eq + Clone + Debug,
    V: Clone,
    E: Clone,
{
    fn settle(&mut self, result: &Result<V, E>) {
        {
            let mut state = self.memo.state.lock();
            state.in_flight.remove(self.key);
            if let Ok(value) = result {
                state.cache.put(
                    self.key.clone(),
                    Entry {
                        value: value.clone(),
                        stored_at: Instant::now(),
                    },
                );
            }
        }
        self.flight.settle(Outcome::Done(result.clone()));
        self.settled = true;
    }
}

impl<K, V, E> Drop for Lead<'_, K, V, E>
where
    K: Hash + Eq + Clone + Debug,
    V: Clone,
    E: Clone,
{
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        self.memo.state.lock().in_flight.remove(self.key);
        self.flight.settle(Outcome::Abandoned);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Barrier;
    use std::sync::atomic::AtomicU32;
    use std::thread;

    fn memo(capacity: usize, ttl: Duration) -> Memoizer<u32, u64, String> {
        Memoizer::new("test", NonZeroUsize::new(capacity).unwrap(), ttl)
    }

    #[test]
    fn second_call_is_a_hit() {
        let m = memo(4, Duration::from_secs(60));
        assert_eq!(m.get_or_compute(1, || Ok(10)), Ok(10));
        assert_eq!(m.get_or_compute(1, || Ok(99)), Ok(10));
        let s = m.stats();
        assert_eq!((s.hits, s.misses, s.computations), (1, 1, 1));
    }

    #[test]
    fn concurrent_callers_share_one_computation() {
        let m = Arc::new(memo(4, Duration::from_secs(60)));
        let runs = Arc::new(AtomicU32::new(0));
        let n = 8;
        let barrier = Arc::new(Barrier::new(n));
        let handles: Vec<_> = (0..n)
            .map(|_| {
                let m = Arc::clone(&m);
                let runs = Arc::clone(&runs);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    m.get_or_compute(7, || {
                        runs.fetch_add(1, Ordering::SeqCst);
                        thread::sleep(Duration::from_millis(100));
                        Ok(42)
                    })
                })
            })
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), Ok(42));
        }
        assert_eq!(runs.load(Ordering::SeqCst), 1);
        assert_eq!(m.stats().computations, 1);
    }

    #[test]
    fn errors_reach_waiters_but_are_not_cached() {
        let m = Arc::new(memo(4, Duration::from_secs(60)));
        let barrier = Arc::new(Barrier::new(2));
        let waiter = {
            let m = Arc::clone(&m);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                thread::sleep(Duration::from_millis(20));
                m.get_or_compute(3, || Ok(1))
            })
        };
        let leader = m.get_or_compute(3, || {
            barrier.wait();
            thread::sleep(Duration::from_millis(150));
            Err("provider down".to_string())
        });
        assert_eq!(leader, Err("provider down".to_string()));
        assert_eq!(waiter.join().unwrap(), Err("provider down".to_string()));
        assert!(m.is_empty());
        assert_eq!(m.get_or_compute(3, || Ok(5)), Ok(5));
        assert_eq!(m.stats().computations, 2);
    }

    #[test]
    fn expired_entries_are_recomputed() {
        let m = memo(4, Duration::from_millis(30));
        assert_eq!(m.get_or_compute(1, || Ok(1)), Ok(1));
        thread::sleep(Duration::from_millis(60));
        assert_eq!(m.get_or_compute(1, || Ok(2)), Ok(2));
        assert_eq!(m.stats().computations, 2);
    }

    #[test]
    fn least_recently_used_is_evicted() {
        let m = memo(2, Duration::from_secs(60));
        m.get_or_compute(1, || Ok(1)).unwrap();
        m.get_or_compute(2, || Ok(2)).unwrap();
        // touch 1 so 2 becomes the eviction candidate
        m.get_or_compute(1, || Ok(0)).unwrap();
        m.get_or_compute(3, || Ok(3)).unwrap();
        assert_eq!(m.len(), 2);
        assert_eq!(m.get_or_compute(1, || Ok(0)), Ok(1));
        assert_eq!(m.get_or_compute(2, || Ok(20)), Ok(20));
    }

    #[test]
    fn panicking_leader_releases_the_key() {
        let m = Arc::new(memo(4, Duration::from_secs(60)));
        let panicked = {
            let m = Arc::clone(&m);
            thread::spawn(move || m.get_or_compute(9, || -> Result<u64, String> { panic!("boom") }))
                .join()
        };
        assert!(panicked.is_err());
        assert_eq!(m.get_or_compute(9, || Ok(4)), Ok(4));
    }

    #[test]
    fn clear_empties_the_cache() {
        let m = memo(4, Duration::from_secs(60));
        m.get_or_compute(1, || Ok(1)).unwrap();
        m.clear();
        assert!(m.is_empty());
    }
}
