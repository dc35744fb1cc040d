// Cidre storefront core library

pub mod cache;
pub mod config;
pub mod errors;
pub mod kv;
pub mod observability;
pub mod rate_limit;

pub use cache::Cache;
pub use config::Config;
pub use errors::{AppError, Result};
pub use kv::{KeyValueStore, MemoryStore, RedisStore};
pub use rate_limit::{Decision, RateLimitPolicy, SlidingWindowRateLimiter};
