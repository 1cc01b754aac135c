//! Cache infrastructure - bounded read-through caching

mod read_through;

pub use read_through::{CacheConfig, ReadThroughCache};
