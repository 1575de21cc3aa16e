//! Repository traits (ports) - define the interface for durable storage
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;
use uuid::Uuid;

use crate::entities::{Message, MessageDraft, Reaction, ReactionDraft};
use crate::error::DomainError;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Message Repository
// ============================================================================

#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// List messages newest-first, skipping `offset` and returning at most
    /// `limit`. Messages whose id appears in `exclude_ids` are filtered out
    /// before offset and limit apply; an empty slice excludes nothing.
    async fn list(&self, limit: i64, offset: i64, exclude_ids: &[Uuid]) -> RepoResult<Vec<Message>>;

    /// Insert a message. The returned entity carries the store-assigned
    /// id and creation timestamp.
    async fn insert(&self, draft: MessageDraft) -> RepoResult<Message>;
}

// ============================================================================
// Reaction Repository
// ============================================================================

#[async_trait]
pub trait ReactionRepository: Send + Sync {
    /// Insert a reaction. The returned entity carries the store-assigned
    /// id and creation timestamp.
    ///
    /// Returns `DomainError::ReactionAlreadyExists` when the user has
    /// already reacted to the message.
    async fn insert(&self, draft: ReactionDraft) -> RepoResult<Reaction>;
}
