//! Cache-aside infrastructure for the eligibility read path.
//!
//! Values cached here are idempotent pure functions of the store state at
//! the instant of the miss, so concurrent misses that both compute and
//! both write are harmless (last write wins). There is no read-through
//! locking.

mod cache_interface;
pub mod cache_keys;
mod redis_cache;

pub use cache_interface::{CacheExt, CacheInterface};
pub use redis_cache::{RedisCacheService, RedisCacheServiceParameters, DEFAULT_TTL};
