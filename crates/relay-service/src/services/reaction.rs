//! Reaction service
//!
//! Handles reaction creation and post-commit cache synchronization.

use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use relay_core::entities::ReactionDraft;

use crate::dto::{CreateReactionRequest, ReactionResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::sync::ReactionCacheSync;

/// Reaction service
pub struct ReactionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReactionService<'a> {
    /// Create a new ReactionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// React to a message
    ///
    /// The durable insert commits first and enforces the one-reaction-per-
    /// user constraint; a duplicate surfaces as a conflict. The cached
    /// aggregate update that follows is best-effort — once the reaction is
    /// committed, no cache failure can undo it.
    #[instrument(skip(self, request))]
    pub async fn create_reaction(
        &self,
        message_id: Uuid,
        request: CreateReactionRequest,
    ) -> ServiceResult<ReactionResponse> {
        let draft = ReactionDraft::new(message_id, request.kind, request.user_id)
            .with_score(request.score.unwrap_or(1));

        let reaction = self.ctx.reaction_repo().insert(draft).await?;

        info!(
            reaction_id = %reaction.id,
            message_id = %message_id,
            kind = %reaction.kind,
            "Reaction created"
        );

        let sync = ReactionCacheSync::new(self.ctx.message_cache());
        match sync.apply(message_id, &reaction.kind).await {
            Ok(updated) => {
                debug!(message_id = %message_id, updated, "Reaction count sync finished");
            }
            Err(e) => {
                warn!(
                    message_id = %message_id,
                    error = %e,
                    "Reaction count sync failed, durable reaction stands"
                );
            }
        }

        Ok(ReactionResponse::from(&reaction))
    }
}
