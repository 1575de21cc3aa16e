//! Service context - dependency container for services
//!
//! Holds the repositories, the message cache, and the connection pools
//! needed by services.

use std::sync::Arc;

use relay_cache::{MessageCache, SharedRedisPool};
use relay_core::traits::{MessageRepository, ReactionRepository};
use relay_db::PgPool;

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It provides access to:
/// - Durable-store repositories
/// - The Redis-backed message cache
/// - The underlying pools (for health checks)
#[derive(Clone)]
pub struct ServiceContext {
    // Database pool
    pool: PgPool,

    // Redis pool
    redis_pool: SharedRedisPool,

    // Repositories
    message_repo: Arc<dyn MessageRepository>,
    reaction_repo: Arc<dyn ReactionRepository>,

    // Cache store
    message_cache: MessageCache,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        pool: PgPool,
        redis_pool: SharedRedisPool,
        message_repo: Arc<dyn MessageRepository>,
        reaction_repo: Arc<dyn ReactionRepository>,
        message_cache: MessageCache,
    ) -> Self {
        Self {
            pool,
            redis_pool,
            message_repo,
            reaction_repo,
            message_cache,
        }
    }

    /// Get the PostgreSQL connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Get the Redis connection pool
    pub fn redis_pool(&self) -> &SharedRedisPool {
        &self.redis_pool
    }

    /// Get the message repository
    pub fn message_repo(&self) -> &dyn MessageRepository {
        self.message_repo.as_ref()
    }

    /// Get the reaction repository
    pub fn reaction_repo(&self) -> &dyn ReactionRepository {
        self.reaction_repo.as_ref()
    }

    /// Get the message cache
    pub fn message_cache(&self) -> &MessageCache {
        &self.message_cache
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &"PgPool")
            .field("redis_pool", &"SharedRedisPool")
            .field("message_cache", &self.message_cache)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    redis_pool: Option<SharedRedisPool>,
    message_repo: Option<Arc<dyn MessageRepository>>,
    reaction_repo: Option<Arc<dyn ReactionRepository>>,
    message_cache: Option<MessageCache>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            pool: None,
            redis_pool: None,
            message_repo: None,
            reaction_repo: None,
            message_cache: None,
        }
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn redis_pool(mut self, redis_pool: SharedRedisPool) -> Self {
        self.redis_pool = Some(redis_pool);
        self
    }

    pub fn message_repo(mut self, repo: Arc<dyn MessageRepository>) -> Self {
        self.message_repo = Some(repo);
        self
    }

    pub fn reaction_repo(mut self, repo: Arc<dyn ReactionRepository>) -> Self {
        self.reaction_repo = Some(repo);
        self
    }

    pub fn message_cache(mut self, cache: MessageCache) -> Self {
        self.message_cache = Some(cache);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> super::error::ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.pool
                .ok_or_else(|| super::error::ServiceError::validation("pool is required"))?,
            self.redis_pool
                .ok_or_else(|| super::error::ServiceError::validation("redis_pool is required"))?,
            self.message_repo
                .ok_or_else(|| super::error::ServiceError::validation("message_repo is required"))?,
            self.reaction_repo
                .ok_or_else(|| super::error::ServiceError::validation("reaction_repo is required"))?,
            self.message_cache
                .ok_or_else(|| super::error::ServiceError::validation("message_cache is required"))?,
        ))
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
