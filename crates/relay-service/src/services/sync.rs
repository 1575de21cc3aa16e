//! Reaction count synchronization into the message cache
//!
//! After a reaction has been durably committed, the cached copy of the
//! message (if any) gets its aggregate counts brought up to date. Failure
//! here never invalidates the committed reaction.

use tracing::{debug, instrument};
use uuid::Uuid;

use relay_cache::{CacheError, MessageCache};

/// Error raised when the post-commit cache update fails.
///
/// Distinct from persistence failures: the durable reaction is already
/// committed when this is produced, so callers log it and move on.
#[derive(Debug, thiserror::Error)]
#[error("Cache synchronization failed: {0}")]
pub struct CacheSyncError(#[from] CacheError);

/// Synchronizes a cached message's reaction aggregates
pub struct ReactionCacheSync<'a> {
    cache: &'a MessageCache,
}

impl<'a> ReactionCacheSync<'a> {
    /// Create a new ReactionCacheSync
    pub fn new(cache: &'a MessageCache) -> Self {
        Self { cache }
    }

    /// Fold a committed reaction of `kind` into the cached message's
    /// aggregates.
    ///
    /// Returns `Ok(false)` when the message is not cached — expected once
    /// it has aged out of the hot window, nothing to update. On a hit the
    /// full record is rewritten as delete-then-reinsert, keeping a single
    /// code path responsible for the cached representation; a concurrent
    /// reader missing the entry in between falls back to the durable store.
    #[instrument(skip(self))]
    pub async fn apply(&self, message_id: Uuid, kind: &str) -> Result<bool, CacheSyncError> {
        let Some(mut message) = self.cache.get(message_id).await? else {
            debug!(message_id = %message_id, "Message not cached, skipping count sync");
            return Ok(false);
        };

        message.record_reaction(kind);

        self.cache.delete(message_id).await?;
        self.cache.insert(&message).await?;

        debug!(
            message_id = %message_id,
            kind = %kind,
            "Updated cached reaction counts"
        );

        Ok(true)
    }
}
