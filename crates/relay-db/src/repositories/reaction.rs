//! PostgreSQL implementation of ReactionRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use relay_core::entities::{Reaction, ReactionDraft};
use relay_core::traits::{ReactionRepository, RepoResult};

use crate::models::ReactionModel;

use super::error::map_reaction_insert_error;

/// PostgreSQL implementation of ReactionRepository
#[derive(Clone)]
pub struct PgReactionRepository {
    pool: PgPool,
}

impl PgReactionRepository {
    /// Create a new PgReactionRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReactionRepository for PgReactionRepository {
    #[instrument(skip(self, draft))]
    async fn insert(&self, draft: ReactionDraft) -> RepoResult<Reaction> {
        let result = sqlx::query_as::<_, ReactionModel>(
            r#"
            INSERT INTO message_reactions (message_id, type, score, user_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, message_id, type, score, user_id, created_at
            "#,
        )
        .bind(draft.message_id)
        .bind(&draft.kind)
        .bind(draft.score)
        .bind(&draft.user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_reaction_insert_error(e, draft.message_id))?;

        Ok(Reaction::from(result))
    }
}
