// ==============================================
// SHARED LRU CACHE CONCURRENCY TESTS
// ==============================================
//
// Stress tests for SharedLruCache: multiple threads hammering one
// handle with a mixed read/write workload, then post-join consistency
// checks. The lock serializes everything, so after the threads finish
// the cache must still satisfy all structural invariants.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;

use lrukit::policy::lru::SharedLruCache;

#[test]
fn concurrent_inserts_respect_capacity() {
    let capacity = 100;
    let cache: SharedLruCache<u64, u64> = SharedLruCache::new(capacity);
    let threads = 8;
    let per_thread = 1_000u64;

    let mut handles = Vec::new();
    for t in 0..threads {
        let cache = cache.clone();
        handles.push(thread::spawn(move || {
            for i in 0..per_thread {
                let key = t * per_thread + i;
                cache.insert(key, key * 2);
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(cache.len(), capacity);
    assert_eq!(cache.capacity(), capacity);
}

#[test]
fn concurrent_mixed_workload_stays_consistent() {
    let cache: SharedLruCache<u64, u64> = SharedLruCache::new(64);
    let hits = Arc::new(AtomicU64::new(0));
    let misses = Arc::new(AtomicU64::new(0));
    let threads = 6;
    let ops = 2_000u64;

    let mut handles = Vec::new();
    for t in 0..threads {
        let cache = cache.clone();
        let hits = Arc::clone(&hits);
        let misses = Arc::clone(&misses);
        handles.push(thread::spawn(move || {
            for i in 0..ops {
                let key = (t * 31 + i * 7) % 128;
                match i % 4 {
                    0 | 1 => {
                        cache.insert(key, key);
                    }
                    2 => match cache.get(&key) {
                        Some(value) => {
                            assert_eq!(value, key, "value must match its key");
                            hits.fetch_add(1, Ordering::Relaxed);
                        }
                        None => {
                            misses.fetch_add(1, Ordering::Relaxed);
                        }
                    },
                    _ => {
                        cache.remove(&key);
                    }
                }
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    let total = hits.load(Ordering::Relaxed) + misses.load(Ordering::Relaxed);
    assert_eq!(total, threads * ops / 4);
    assert!(cache.len() <= 64);

    // Survivors still read back correctly after the storm.
    for key in 0..128u64 {
        if let Some(value) = cache.peek(&key) {
            assert_eq!(value, key);
        }
    }
}

#[test]
fn clones_share_one_cache() {
    let cache: SharedLruCache<&'static str, u64> = SharedLruCache::new(10);
    let writer = cache.clone();

    let handle = thread::spawn(move || {
        writer.insert("from-thread", 42);
    });
    handle.join().unwrap();

    assert_eq!(cache.get(&"from-thread"), Some(42));
}

#[test]
fn concurrent_get_or_default_materializes_entries() {
    let cache: SharedLruCache<u64, u64> = SharedLruCache::new(256);
    let threads = 4;

    let mut handles = Vec::new();
    for _ in 0..threads {
        let cache = cache.clone();
        handles.push(thread::spawn(move || {
            for key in 0..100u64 {
                // Either an earlier insert's value or the default.
                let value = cache.get_or_default(&key);
                assert!(value == 0 || value == key);
                cache.insert(key, key);
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(cache.len(), 100);
    for key in 0..100u64 {
        assert_eq!(cache.get(&key), Some(key));
    }
}

#[test]
fn concurrent_eviction_drains_to_empty() {
    let cache: SharedLruCache<u64, u64> = SharedLruCache::new(50);
    for i in 0..50 {
        cache.insert(i, i);
    }

    let popped = Arc::new(AtomicU64::new(0));
    let mut handles = Vec::new();
    for _ in 0..4 {
        let cache = cache.clone();
        let popped = Arc::clone(&popped);
        handles.push(thread::spawn(move || {
            while cache.pop_lru().is_some() {
                popped.fetch_add(1, Ordering::Relaxed);
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(popped.load(Ordering::Relaxed), 50);
    assert!(cache.is_empty());
}
