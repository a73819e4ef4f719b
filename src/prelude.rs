pub use crate::builder::{Cache, CacheBuilder, CachePolicy};
pub use crate::ds::{RecencyList, SlotArena, SlotId};
pub use crate::error::{ConfigError, InvariantError};
pub use crate::policy::lru::{LruCache, SharedLruCache};
pub use crate::traits::{CoreCache, LruCacheTrait, MutableCache};
