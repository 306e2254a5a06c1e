use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Time-bounded memoization keyed by the exact arguments of a page fetch.
///
/// Entries older than `max_age` count as absent and are evicted lazily on
/// the next lookup; there is no capacity bound. The key space (page number
/// times search parameters) stays small over a process lifetime, so nothing
/// more is needed.
pub struct ExpiringCache<K, V> {
    max_age: Duration,
    entries: Mutex<HashMap<K, (V, Instant)>>,
}

impl<K, V> ExpiringCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    pub fn new(max_age: Duration) -> Self {
        Self {
            max_age,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Return the cached value for `key` if fresh, otherwise run `fetch`
    /// and store its result. Errors are never cached.
    ///
    /// The lock is released while `fetch` runs; two racing misses may both
    /// fetch, and the later insert wins.
    pub fn get_or_fetch<E, F>(&self, key: K, fetch: F) -> Result<V, E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        if let Some(value) = self.lookup(&key) {
            return Ok(value);
        }

        let value = fetch()?;

        let mut entries = self.entries.lock().unwrap();
        entries.insert(key, (value.clone(), Instant::now()));
        Ok(value)
    }

    fn lookup(&self, key: &K) -> Option<V> {
        let mut entries = self.entries.lock().unwrap();
        match entries.get(key) {
            Some((value, inserted_at)) if inserted_at.elapsed() < self.max_age => {
                Some(value.clone())
            }
            Some(_) => {
                // expired, evict now rather than sweeping
                entries.remove(key);
                None
            }
            None => None,
        }
    }
}
