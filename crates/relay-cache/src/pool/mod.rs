//! Redis connection pooling

mod redis_pool;

pub use redis_pool::{
    create_shared_pool, CacheError, CacheResult, RedisPool, RedisPoolConfig, SharedRedisPool,
};
