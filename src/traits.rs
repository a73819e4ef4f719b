//! # Cache trait hierarchy
//!
//! Defines the policy interface that cache engines implement, so callers can
//! be written against the contract instead of a concrete eviction policy.
//!
//! ```text
//!   ┌─────────────────────────────────────────┐
//!   │            CoreCache<K, V>              │
//!   │                                         │
//!   │  insert(&mut, K, V) → Option<V>         │
//!   │  get(&mut, &K) → Option<&V>             │
//!   │  contains(&, &K) → bool                 │
//!   │  len / is_empty / capacity / clear      │
//!   └──────────────────┬──────────────────────┘
//!                      │
//!                      ▼
//!   ┌─────────────────────────────────────────┐
//!   │           MutableCache<K, V>            │
//!   │  remove(&K) → Option<V>                 │
//!   │  remove_batch(&[K])                     │
//!   └──────────────────┬──────────────────────┘
//!                      │
//!                      ▼
//!   ┌─────────────────────────────────────────┐
//!   │          LruCacheTrait<K, V>           │
//!   │  pop_lru() → (K, V)                     │
//!   │  peek_lru() → (&K, &V)                  │
//!   │  touch(&K) → bool                       │
//!   │  recency_rank(&K) → usize               │
//!   └─────────────────────────────────────────┘
//! ```
//!
//! `CoreCache` carries the operations every policy supports regardless of
//! how it evicts. `MutableCache` adds arbitrary key removal for policies
//! whose semantics tolerate it. `LruCacheTrait` adds recency-specific
//! eviction and refresh operations. A frequency-based sibling policy would
//! extend `MutableCache` with its own trait alongside `LruCacheTrait`
//! rather than widening this one.

/// Core cache operations that all eviction policies support.
///
/// # Type Parameters
///
/// - `K`: Key type (implementations typically require `Eq + Hash`)
/// - `V`: Value type
///
/// # Example
///
/// ```
/// use lrukit::traits::CoreCache;
/// use lrukit::policy::lru::LruCache;
///
/// fn warm_cache<C: CoreCache<u64, String>>(cache: &mut C, data: &[(u64, String)]) {
///     for (key, value) in data {
///         cache.insert(*key, value.clone());
///     }
/// }
///
/// let mut cache = LruCache::new(100);
/// warm_cache(&mut cache, &[(1, "one".to_string()), (2, "two".to_string())]);
/// assert_eq!(cache.len(), 2);
/// ```
pub trait CoreCache<K, V> {
    /// Inserts a key-value pair, returning the previous value if the key
    /// already existed.
    ///
    /// If the cache is at capacity, an entry may be evicted according to the
    /// eviction policy before the new entry is stored. Inserting always
    /// succeeds in the sense that it never errors; a zero-capacity cache
    /// silently stores nothing.
    ///
    /// # Example
    ///
    /// ```
    /// use lrukit::traits::CoreCache;
    /// use lrukit::policy::lru::LruCache;
    ///
    /// let mut cache = LruCache::new(10);
    /// assert_eq!(cache.insert(1, "first"), None);
    /// assert_eq!(cache.insert(1, "second"), Some("first"));
    /// ```
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    /// Gets a reference to a value by key.
    ///
    /// This is the two-result lookup: the `Option` reports hit or miss and
    /// the reference carries the value without forcing a clone. May update
    /// internal policy state (recency, access counts); use
    /// [`contains`](Self::contains) to test existence without affecting
    /// eviction order.
    ///
    /// # Example
    ///
    /// ```
    /// use lrukit::traits::CoreCache;
    /// use lrukit::policy::lru::LruCache;
    ///
    /// let mut cache = LruCache::new(10);
    /// cache.insert(1, "value");
    ///
    /// assert_eq!(cache.get(&1), Some(&"value"));
    /// assert_eq!(cache.get(&99), None);
    /// ```
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Checks if a key exists without updating access state.
    fn contains(&self, key: &K) -> bool;

    /// Returns the current number of entries.
    fn len(&self) -> usize;

    /// Returns `true` if the cache contains no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the maximum capacity, fixed at construction.
    fn capacity(&self) -> usize;

    /// Removes all entries. Capacity is unchanged.
    fn clear(&mut self);
}

/// Caches that support arbitrary key-based removal.
///
/// Appropriate for recency- and frequency-ordered policies, where removing
/// an arbitrary entry does not corrupt the eviction order.
///
/// # Example
///
/// ```
/// use lrukit::traits::{CoreCache, MutableCache};
/// use lrukit::policy::lru::LruCache;
///
/// fn invalidate_keys<C: MutableCache<u64, String>>(cache: &mut C, keys: &[u64]) {
///     for key in keys {
///         cache.remove(key);
///     }
/// }
///
/// let mut cache = LruCache::new(100);
/// cache.insert(1, "one".to_string());
/// cache.insert(2, "two".to_string());
///
/// invalidate_keys(&mut cache, &[1]);
/// assert!(!cache.contains(&1));
/// assert!(cache.contains(&2));
/// ```
pub trait MutableCache<K, V>: CoreCache<K, V> {
    /// Removes a specific key-value pair.
    ///
    /// Returns the removed value if the key existed; removing an absent key
    /// is a no-op returning `None`.
    fn remove(&mut self, key: &K) -> Option<V>;

    /// Removes multiple keys, returning each outcome in input order.
    ///
    /// The default implementation loops over [`remove`](Self::remove).
    fn remove_batch(&mut self, keys: &[K]) -> Vec<Option<V>> {
        keys.iter().map(|k| self.remove(k)).collect()
    }
}

/// LRU-specific operations that respect access order.
///
/// Entries are ordered by recency; the least recently accessed entry is
/// always the unique eviction victim, because every access imposes a strict
/// total order of use.
///
/// # Example
///
/// ```
/// use lrukit::traits::{CoreCache, LruCacheTrait};
/// use lrukit::policy::lru::LruCache;
///
/// let mut cache = LruCache::new(3);
/// cache.insert(1, "first");
/// cache.insert(2, "second");
/// cache.insert(3, "third");
///
/// // Access key 1 to make it MRU; key 2 becomes the victim.
/// cache.get(&1);
/// assert_eq!(cache.peek_lru().map(|(k, _)| *k), Some(2));
///
/// let (key, _) = cache.pop_lru().unwrap();
/// assert_eq!(key, 2);
/// ```
pub trait LruCacheTrait<K, V>: MutableCache<K, V> {
    /// Removes and returns the least recently used entry, or `None` if the
    /// cache is empty.
    fn pop_lru(&mut self) -> Option<(K, V)>;

    /// Peeks at the least recently used entry without removing it or
    /// refreshing its recency.
    fn peek_lru(&self) -> Option<(&K, &V)>;

    /// Marks an entry as recently used without retrieving the value.
    ///
    /// Returns `true` if the key was found. Counts as an access for the
    /// entry's access counter.
    ///
    /// # Example
    ///
    /// ```
    /// use lrukit::traits::{CoreCache, LruCacheTrait};
    /// use lrukit::policy::lru::LruCache;
    ///
    /// let mut cache = LruCache::new(2);
    /// cache.insert(1, "first");
    /// cache.insert(2, "second");
    ///
    /// assert!(cache.touch(&1));
    /// cache.insert(3, "third"); // evicts key 2, not the touched key 1
    /// assert!(cache.contains(&1));
    /// assert!(!cache.contains(&2));
    /// ```
    fn touch(&mut self, key: &K) -> bool;

    /// Gets the recency rank of a key (0 = most recent).
    ///
    /// Returns `None` if the key is not present. O(n): walks the recency
    /// order.
    fn recency_rank(&self, key: &K) -> Option<usize>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Minimal stand-in to exercise the trait defaults independently of any
    // real policy.
    struct VecCache {
        data: Vec<(i32, String)>,
        capacity: usize,
    }

    impl CoreCache<i32, String> for VecCache {
        fn insert(&mut self, key: i32, value: String) -> Option<String> {
            if let Some((_, existing)) = self.data.iter_mut().find(|(k, _)| *k == key) {
                return Some(std::mem::replace(existing, value));
            }
            if self.data.len() >= self.capacity {
                self.data.remove(0);
            }
            self.data.push((key, value));
            None
        }

        fn get(&mut self, key: &i32) -> Option<&String> {
            self.data.iter().find(|(k, _)| k == key).map(|(_, v)| v)
        }

        fn contains(&self, key: &i32) -> bool {
            self.data.iter().any(|(k, _)| k == key)
        }

        fn len(&self) -> usize {
            self.data.len()
        }

        fn capacity(&self) -> usize {
            self.capacity
        }

        fn clear(&mut self) {
            self.data.clear();
        }
    }

    impl MutableCache<i32, String> for VecCache {
        fn remove(&mut self, key: &i32) -> Option<String> {
            let pos = self.data.iter().position(|(k, _)| k == key)?;
            Some(self.data.remove(pos).1)
        }
    }

    #[test]
    fn is_empty_default_tracks_len() {
        let mut cache = VecCache {
            data: Vec::new(),
            capacity: 2,
        };
        assert!(cache.is_empty());
        cache.insert(1, "a".to_string());
        assert!(!cache.is_empty());
    }

    #[test]
    fn remove_batch_default_preserves_order() {
        let mut cache = VecCache {
            data: Vec::new(),
            capacity: 4,
        };
        cache.insert(1, "one".to_string());
        cache.insert(2, "two".to_string());
        cache.insert(3, "three".to_string());

        let removed = cache.remove_batch(&[1, 99, 3]);
        assert_eq!(
            removed,
            vec![Some("one".to_string()), None, Some("three".to_string())]
        );
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn insert_returns_previous_value() {
        let mut cache = VecCache {
            data: Vec::new(),
            capacity: 2,
        };
        assert_eq!(cache.insert(1, "first".to_string()), None);
        assert_eq!(
            cache.insert(1, "second".to_string()),
            Some("first".to_string())
        );
        assert_eq!(cache.get(&1), Some(&"second".to_string()));
    }
}
