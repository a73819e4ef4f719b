//! # Least Recently Used (LRU) cache
//!
//! A fixed-capacity cache that evicts the entry whose last access is oldest.
//! All operations are O(1) expected time.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────┐
//!   │                      LruCache<K, V>                          │
//!   │                                                              │
//!   │   ┌──────────────────────────────────────────────────────┐   │
//!   │   │  FxHashMap<K, SlotId>  (key index)                   │   │
//!   │   │                                                      │   │
//!   │   │   key ──► SlotId ──────────────────────┐             │   │
//!   │   └────────────────────────────────────────┼─────────────┘   │
//!   │                                            ▼                 │
//!   │   ┌──────────────────────────────────────────────────────┐   │
//!   │   │  RecencyList<Entry<K, V>>  (recency order)           │   │
//!   │   │                                                      │   │
//!   │   │  lru ─► [entry] ◄──► [entry] ◄──► [entry] ◄─ mru     │   │
//!   │   │         eviction                    refresh          │   │
//!   │   │         victim                      target           │   │
//!   │   └──────────────────────────────────────────────────────┘   │
//!   │                                                              │
//!   │   capacity: usize  (fixed at construction)                   │
//!   └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Entries live in a slot arena inside the recency list and are addressed by
//! stable [`SlotId`] handles. The index never owns an entry; `prev`/`next`
//! inside the list are handle fields, not references, so there is nothing to
//! reference-count and no ownership cycle to break.
//!
//! ## Operations
//!
//! | Method            | Complexity | Recency refresh | Access count |
//! |-------------------|------------|-----------------|--------------|
//! | `insert(k, v)`    | O(1)*      | yes             | 1 on create  |
//! | `get(&k)`         | O(1)       | yes             | +1           |
//! | `peek(&k)`        | O(1)       | no              | unchanged    |
//! | `touch(&k)`       | O(1)       | yes             | +1           |
//! | `remove(&k)`      | O(1)       | -               | -            |
//! | `pop_lru()`       | O(1)       | -               | -            |
//! | `recency_rank()`  | O(n)       | no              | unchanged    |
//!
//! \* expected time; the index is an `FxHashMap`.
//!
//! ## Capacity semantics
//!
//! Capacity is fixed at construction and cannot be resized. `new(0)` is not
//! an error: the cache degrades to a no-op sink where every insert of a new
//! key stores nothing and every get misses. Callers that want construction
//! to fail on zero capacity use
//! [`CacheBuilder::try_build`](crate::builder::CacheBuilder::try_build).
//!
//! ## Access counting
//!
//! Every entry carries an access counter, set to 1 on creation and bumped on
//! each `get`/`touch` hit. LRU eviction never consults it; it is shared
//! state that a frequency-aware sibling policy can reuse, exposed read-only
//! through [`LruCache::access_count`].
//!
//! ## Thread safety
//!
//! - [`LruCache`]: single-threaded; requires `&mut self` for mutation.
//! - [`SharedLruCache`]: cloneable handle serializing every operation
//!   through one `parking_lot::Mutex`. Even reads take the exclusive lock,
//!   because a hit rewires the recency order.

use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::ds::recency_list::RecencyList;
use crate::ds::SlotId;
use crate::error::InvariantError;
use crate::traits::{CoreCache, LruCacheTrait, MutableCache};

/// A stored record: key, value, and the inert access counter.
#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
    access_count: u64,
}

/// Fixed-capacity LRU cache core: an `FxHashMap` index over an arena-backed
/// recency list.
///
/// The index maps each key to the stable handle of its list node; the list
/// owns every entry. The two structures are kept in lockstep by every
/// operation, so `index.len() == list.len() <= capacity` holds after any
/// completed call.
///
/// # Example
///
/// ```
/// use lrukit::policy::lru::LruCache;
/// use lrukit::traits::CoreCache;
///
/// let mut cache: LruCache<u32, String> = LruCache::new(2);
/// cache.insert(1, "a".to_string());
/// cache.insert(2, "b".to_string());
///
/// cache.get(&1); // key 2 is now the eviction victim
/// cache.insert(3, "c".to_string());
///
/// assert!(cache.contains(&1));
/// assert!(!cache.contains(&2));
/// assert!(cache.contains(&3));
/// ```
pub struct LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    index: FxHashMap<K, SlotId>,
    list: RecencyList<Entry<K, V>>,
    capacity: usize,
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates an LRU cache holding at most `capacity` entries.
    ///
    /// Never panics. A capacity of 0 creates a cache that stores nothing:
    /// inserts of new keys are no-ops and every get is a miss.
    ///
    /// # Example
    ///
    /// ```
    /// use lrukit::policy::lru::LruCache;
    ///
    /// let cache: LruCache<u32, String> = LruCache::new(100);
    /// ```
    pub fn new(capacity: usize) -> Self {
        Self {
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            list: RecencyList::with_capacity(capacity),
            capacity,
        }
    }

    /// Read-only lookup: returns the value without refreshing recency or
    /// bumping the access counter.
    ///
    /// # Example
    ///
    /// ```
    /// use lrukit::policy::lru::LruCache;
    /// use lrukit::traits::CoreCache;
    ///
    /// let mut cache = LruCache::new(2);
    /// cache.insert(1, "first");
    /// cache.insert(2, "second");
    ///
    /// // Peek leaves key 1 as the eviction victim.
    /// assert_eq!(cache.peek(&1), Some(&"first"));
    /// cache.insert(3, "third");
    /// assert!(!cache.contains(&1));
    /// ```
    pub fn peek(&self, key: &K) -> Option<&V> {
        let id = *self.index.get(key)?;
        self.list.get(id).map(|entry| &entry.value)
    }

    /// Convenience lookup returning a default-constructed `V` on miss.
    ///
    /// This is lossy: a cache that legitimately stores `V::default()` is
    /// indistinguishable from a miss. Callers that need to tell the two
    /// apart use [`get`](CoreCache::get), whose `Option` reports the hit.
    /// A hit refreshes recency and bumps the access counter exactly like
    /// `get`.
    ///
    /// # Example
    ///
    /// ```
    /// use lrukit::policy::lru::LruCache;
    /// use lrukit::traits::CoreCache;
    ///
    /// let mut cache: LruCache<u32, u64> = LruCache::new(10);
    /// cache.insert(1, 42);
    ///
    /// assert_eq!(cache.get_or_default(&1), 42);
    /// assert_eq!(cache.get_or_default(&99), 0); // miss -> default
    /// ```
    pub fn get_or_default(&mut self, key: &K) -> V
    where
        V: Default + Clone,
    {
        self.get(key).cloned().unwrap_or_default()
    }

    /// Returns the access counter for a key: 1 at creation plus 1 per
    /// `get`/`touch` hit. Not consulted by eviction.
    ///
    /// # Example
    ///
    /// ```
    /// use lrukit::policy::lru::LruCache;
    /// use lrukit::traits::CoreCache;
    ///
    /// let mut cache = LruCache::new(10);
    /// cache.insert(1, "value");
    /// assert_eq!(cache.access_count(&1), Some(1));
    ///
    /// cache.get(&1);
    /// assert_eq!(cache.access_count(&1), Some(2));
    /// assert_eq!(cache.access_count(&99), None);
    /// ```
    pub fn access_count(&self, key: &K) -> Option<u64> {
        let id = *self.index.get(key)?;
        self.list.get(id).map(|entry| entry.access_count)
    }

    /// Checks every structural invariant, returning a description of the
    /// first violation found.
    ///
    /// O(n); intended for tests and debug assertions, not hot paths.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.index.len() != self.list.len() {
            return Err(InvariantError::new(format!(
                "index length {} != list length {}",
                self.index.len(),
                self.list.len()
            )));
        }
        if self.capacity > 0 && self.list.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "occupancy {} exceeds capacity {}",
                self.list.len(),
                self.capacity
            )));
        }
        if self.capacity == 0 && !self.list.is_empty() {
            return Err(InvariantError::new(
                "zero-capacity cache holds entries".to_string(),
            ));
        }
        for (key, &id) in &self.index {
            match self.list.get(id) {
                Some(entry) if entry.key == *key => {}
                Some(_) => {
                    return Err(InvariantError::new(
                        "index handle resolves to a node with a different key".to_string(),
                    ));
                }
                None => {
                    return Err(InvariantError::new(
                        "index handle dangles into the arena".to_string(),
                    ));
                }
            }
        }
        Ok(())
    }

    /// Validate internal invariants (debug builds only).
    fn validate_invariants(&self) {
        #[cfg(debug_assertions)]
        {
            self.list.debug_validate();
            debug_assert_eq!(self.index.len(), self.list.len());
            if self.capacity > 0 {
                debug_assert!(self.list.len() <= self.capacity);
            }
        }
    }
}

impl<K, V> CoreCache<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Inserts or updates, evicting the LRU entry when a new key would
    /// exceed capacity. An update replaces the value in place and makes the
    /// key most-recently-used without changing the occupancy.
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(&id) = self.index.get(&key) {
            if let Some(entry) = self.list.get_mut(id) {
                let previous = std::mem::replace(&mut entry.value, value);
                self.list.move_to_mru(id);
                self.validate_invariants();
                return Some(previous);
            }
        }

        // Zero capacity: the cache is a no-op sink.
        if self.capacity == 0 {
            return None;
        }

        if self.index.len() >= self.capacity {
            if let Some(evicted) = self.list.pop_lru() {
                self.index.remove(&evicted.key);
            }
        }

        let id = self.list.push_mru(Entry {
            key: key.clone(),
            value,
            access_count: 1,
        });
        self.index.insert(key, id);

        self.validate_invariants();
        None
    }

    /// Hit: refresh recency, bump the access counter, return the value.
    fn get(&mut self, key: &K) -> Option<&V> {
        let id = *self.index.get(key)?;
        self.list.move_to_mru(id);
        self.validate_invariants();
        let entry = self.list.get_mut(id)?;
        entry.access_count += 1;
        Some(&entry.value)
    }

    fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    fn len(&self) -> usize {
        self.index.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn clear(&mut self) {
        self.list.clear();
        self.index.clear();
        self.validate_invariants();
    }
}

impl<K, V> MutableCache<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn remove(&mut self, key: &K) -> Option<V> {
        let id = self.index.remove(key)?;
        let entry = self.list.remove(id);
        self.validate_invariants();
        entry.map(|e| e.value)
    }
}

impl<K, V> LruCacheTrait<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn pop_lru(&mut self) -> Option<(K, V)> {
        let entry = self.list.pop_lru()?;
        self.index.remove(&entry.key);
        self.validate_invariants();
        Some((entry.key, entry.value))
    }

    fn peek_lru(&self) -> Option<(&K, &V)> {
        self.list.peek_lru().map(|entry| (&entry.key, &entry.value))
    }

    fn touch(&mut self, key: &K) -> bool {
        let id = match self.index.get(key) {
            Some(&id) => id,
            None => return false,
        };
        self.list.move_to_mru(id);
        if let Some(entry) = self.list.get_mut(id) {
            entry.access_count += 1;
        }
        self.validate_invariants();
        true
    }

    fn recency_rank(&self, key: &K) -> Option<usize> {
        if !self.index.contains_key(key) {
            return None;
        }
        // The list iterates LRU -> MRU; rank 0 is the MRU end.
        let pos = self.list.iter().position(|entry| entry.key == *key)?;
        Some(self.list.len() - 1 - pos)
    }
}

impl<K, V> fmt::Debug for LruCache<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .finish_non_exhaustive()
    }
}

impl<K, V> Default for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates an LRU cache with a default capacity of 16.
    fn default() -> Self {
        Self::new(16)
    }
}

impl<K, V> Extend<(K, V)> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

/// Thread-safe LRU cache: a cloneable handle serializing every operation
/// through a single exclusive lock.
///
/// Each method acquires the lock for exactly the duration of one core
/// operation and never re-enters it, so no deadlock is possible within one
/// instance. There is no reader path: a read that hits must rewire the
/// recency order, so even `get` takes the exclusive lock. Values are cloned
/// out under the lock; wrap expensive payloads in `Arc` at the call site if
/// cloning matters.
///
/// # Example
///
/// ```
/// use lrukit::policy::lru::SharedLruCache;
///
/// let cache: SharedLruCache<u32, String> = SharedLruCache::new(100);
/// cache.insert(1, "value".to_string());
///
/// let worker = cache.clone();
/// std::thread::spawn(move || {
///     worker.insert(2, "from another thread".to_string());
/// })
/// .join()
/// .unwrap();
///
/// assert_eq!(cache.get(&1), Some("value".to_string()));
/// ```
#[derive(Clone)]
pub struct SharedLruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    inner: Arc<Mutex<LruCache<K, V>>>,
}

impl<K, V> SharedLruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a new thread-safe LRU cache with the given capacity.
    ///
    /// Same capacity semantics as [`LruCache::new`]: 0 is a valid no-op
    /// sink, not an error.
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(LruCache::new(capacity))),
        }
    }

    /// Inserts a value, returning the previous value if the key existed.
    pub fn insert(&self, key: K, value: V) -> Option<V> {
        let mut cache = self.inner.lock();
        cache.insert(key, value)
    }

    /// Gets a clone of the value, moving the entry to MRU position.
    pub fn get(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        let mut cache = self.inner.lock();
        cache.get(key).cloned()
    }

    /// Convenience lookup returning `V::default()` on miss.
    ///
    /// Lossy like [`LruCache::get_or_default`]: cannot distinguish a miss
    /// from a stored default value.
    pub fn get_or_default(&self, key: &K) -> V
    where
        V: Default + Clone,
    {
        let mut cache = self.inner.lock();
        cache.get_or_default(key)
    }

    /// Gets a clone of the value without refreshing recency.
    pub fn peek(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        let cache = self.inner.lock();
        cache.peek(key).cloned()
    }

    /// Removes an entry and returns its value. Absent keys are a no-op.
    pub fn remove(&self, key: &K) -> Option<V> {
        let mut cache = self.inner.lock();
        cache.remove(key)
    }

    /// Marks an entry as recently used without retrieving its value.
    ///
    /// Returns `true` if the key was found.
    pub fn touch(&self, key: &K) -> bool {
        let mut cache = self.inner.lock();
        cache.touch(key)
    }

    /// Removes and returns the least recently used entry.
    pub fn pop_lru(&self) -> Option<(K, V)> {
        let mut cache = self.inner.lock();
        cache.pop_lru()
    }

    /// Returns the access counter for a key.
    pub fn access_count(&self, key: &K) -> Option<u64> {
        let cache = self.inner.lock();
        cache.access_count(key)
    }

    /// Returns the current number of entries.
    pub fn len(&self) -> usize {
        let cache = self.inner.lock();
        cache.len()
    }

    /// Returns `true` if the cache is empty.
    pub fn is_empty(&self) -> bool {
        let cache = self.inner.lock();
        cache.is_empty()
    }

    /// Returns the maximum capacity.
    pub fn capacity(&self) -> usize {
        let cache = self.inner.lock();
        cache.capacity()
    }

    /// Returns `true` if the key exists; does not affect recency.
    pub fn contains(&self, key: &K) -> bool {
        let cache = self.inner.lock();
        cache.contains(key)
    }

    /// Removes all entries.
    pub fn clear(&self) {
        let mut cache = self.inner.lock();
        cache.clear()
    }
}

impl<K, V> fmt::Debug for SharedLruCache<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cache = self.inner.lock();
        f.debug_struct("SharedLruCache")
            .field("len", &cache.len())
            .field("capacity", &cache.capacity())
            .finish_non_exhaustive()
    }
}

impl<K, V> Default for SharedLruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a shared LRU cache with a default capacity of 16.
    fn default() -> Self {
        Self::new(16)
    }
}
