//! lrukit: a fixed-capacity, thread-safe LRU cache built on stable-handle
//! data structures.
//!
//! The core is [`policy::lru::LruCache`]: an `FxHashMap` key index over an
//! arena-backed recency list, giving O(1) insert, get, remove, and eviction
//! without reference counting or raw pointers. [`policy::lru::SharedLruCache`]
//! wraps the core in a single exclusive lock for use across threads.
//!
//! See `DESIGN.md` for internal architecture and invariants.

pub mod builder;
pub mod ds;
pub mod error;
pub mod policy;
pub mod prelude;
pub mod traits;
