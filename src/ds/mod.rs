pub mod arena;
pub mod recency_list;

pub use arena::{SlotArena, SlotId};
pub use recency_list::RecencyList;
