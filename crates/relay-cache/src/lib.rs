//! # relay-cache
//!
//! Redis caching layer holding a bounded window over the newest messages.
//!
//! ## Features
//!
//! - **Connection Pool**: Managed Redis connection pool with deadpool
//! - **Message Cache**: Keyed records plus a timestamp-ordered index, trimmed
//!   to a fixed capacity on every insert
//!
//! ## Example
//!
//! ```ignore
//! use relay_cache::{MessageCache, RedisPool, RedisPoolConfig};
//!
//! // Create Redis pool
//! let config = RedisPoolConfig::default();
//! let pool = RedisPool::new(config)?;
//!
//! // Create the cache with a ten-message window
//! let cache = MessageCache::new(pool, 10);
//!
//! // Mirror a freshly persisted message
//! cache.insert(&message).await?;
//!
//! // Newest-first window
//! let hot = cache.list().await?;
//! ```

pub mod messages;
pub mod pool;

// Re-export pool types
pub use pool::{
    create_shared_pool, CacheError, CacheResult, RedisPool, RedisPoolConfig, SharedRedisPool,
};

// Re-export message cache types
pub use messages::MessageCache;
