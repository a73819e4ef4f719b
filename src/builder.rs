//! Unified cache builder with construction-time policy selection.
//!
//! Callers pick an eviction policy as a [`CachePolicy`] variant and get back
//! a policy-erased [`Cache`], so swapping strategies never touches call
//! sites. The enum is `#[non_exhaustive]`: frequency-based siblings (LFU and
//! friends) slot in as new variants without breaking existing matches.
//!
//! ## Example
//!
//! ```
//! use lrukit::builder::{CacheBuilder, CachePolicy};
//!
//! let mut cache = CacheBuilder::new(100).build::<u64, String>(CachePolicy::Lru);
//! cache.insert(1, "hello".to_string());
//! assert_eq!(cache.get(&1), Some(&"hello".to_string()));
//! ```

use std::hash::Hash;

use crate::error::ConfigError;
use crate::policy::lru::LruCache;
use crate::traits::{CoreCache, LruCacheTrait, MutableCache};

/// Available cache eviction policies.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub enum CachePolicy {
    /// Least Recently Used eviction.
    Lru,
}

/// Policy-erased cache wrapper with a uniform API.
#[derive(Debug)]
pub struct Cache<K, V>
where
    K: Eq + Hash + Clone,
{
    inner: CacheInner<K, V>,
}

#[derive(Debug)]
enum CacheInner<K, V>
where
    K: Eq + Hash + Clone,
{
    Lru(LruCache<K, V>),
}

impl<K, V> Cache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Insert a key-value pair. Returns the previous value if the key
    /// existed.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match &mut self.inner {
            CacheInner::Lru(lru) => lru.insert(key, value),
        }
    }

    /// Get a reference to a value by key, updating policy state on a hit.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        match &mut self.inner {
            CacheInner::Lru(lru) => lru.get(key),
        }
    }

    /// Remove a key-value pair, returning the value if it was present.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        match &mut self.inner {
            CacheInner::Lru(lru) => lru.remove(key),
        }
    }

    /// Check if a key exists without updating policy state.
    pub fn contains(&self, key: &K) -> bool {
        match &self.inner {
            CacheInner::Lru(lru) => lru.contains(key),
        }
    }

    /// Return the number of entries.
    pub fn len(&self) -> usize {
        match &self.inner {
            CacheInner::Lru(lru) => lru.len(),
        }
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Return the maximum capacity.
    pub fn capacity(&self) -> usize {
        match &self.inner {
            CacheInner::Lru(lru) => lru.capacity(),
        }
    }

    /// Remove and return the policy's current eviction victim.
    pub fn pop_victim(&mut self) -> Option<(K, V)> {
        match &mut self.inner {
            CacheInner::Lru(lru) => lru.pop_lru(),
        }
    }

    /// Clear all entries.
    pub fn clear(&mut self) {
        match &mut self.inner {
            CacheInner::Lru(lru) => lru.clear(),
        }
    }
}

/// Builder for creating cache instances.
pub struct CacheBuilder {
    capacity: usize,
}

impl CacheBuilder {
    /// Create a new cache builder with the specified capacity.
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    /// Build a cache with the specified policy.
    ///
    /// Total: capacity 0 yields a valid no-op cache rather than an error.
    /// Use [`try_build`](Self::try_build) for strict validation.
    pub fn build<K, V>(self, policy: CachePolicy) -> Cache<K, V>
    where
        K: Eq + Hash + Clone,
    {
        let inner = match policy {
            CachePolicy::Lru => CacheInner::Lru(LruCache::new(self.capacity)),
        };
        Cache { inner }
    }

    /// Build a cache, rejecting configurations that cannot store anything.
    ///
    /// # Example
    ///
    /// ```
    /// use lrukit::builder::{CacheBuilder, CachePolicy};
    ///
    /// let cache = CacheBuilder::new(16).try_build::<u64, String>(CachePolicy::Lru);
    /// assert!(cache.is_ok());
    ///
    /// let empty = CacheBuilder::new(0).try_build::<u64, String>(CachePolicy::Lru);
    /// assert!(empty.is_err());
    /// ```
    pub fn try_build<K, V>(self, policy: CachePolicy) -> Result<Cache<K, V>, ConfigError>
    where
        K: Eq + Hash + Clone,
    {
        if self.capacity == 0 {
            return Err(ConfigError::new("capacity must be > 0"));
        }
        Ok(self.build(policy))
    }
}
