//! PostgreSQL implementation of MessageRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use relay_core::entities::{Message, MessageDraft, ReactionCount};
use relay_core::traits::{MessageRepository, RepoResult};

use crate::models::{MessageModel, ReactionCountModel};

use super::error::map_db_error;

/// PostgreSQL implementation of MessageRepository
#[derive(Clone)]
pub struct PgMessageRepository {
    pool: PgPool,
}

impl PgMessageRepository {
    /// Create a new PgMessageRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Load reaction aggregates for the given messages and attach them,
    /// per message ordered by the kind's first occurrence.
    async fn attach_reaction_counts(&self, messages: &mut [Message]) -> RepoResult<()> {
        if messages.is_empty() {
            return Ok(());
        }

        let ids: Vec<Uuid> = messages.iter().map(|m| m.id).collect();

        let counts = sqlx::query_as::<_, ReactionCountModel>(
            r#"
            SELECT message_id, type, COUNT(*) AS count
            FROM message_reactions
            WHERE message_id = ANY($1)
            GROUP BY message_id, type
            ORDER BY MIN(created_at)
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        for row in counts {
            if let Some(message) = messages.iter_mut().find(|m| m.id == row.message_id) {
                message
                    .reaction_counts
                    .push(ReactionCount::new(row.kind, row.count));
            }
        }

        Ok(())
    }
}

#[async_trait]
impl MessageRepository for PgMessageRepository {
    #[instrument(skip(self))]
    async fn list(
        &self,
        limit: i64,
        offset: i64,
        exclude_ids: &[Uuid],
    ) -> RepoResult<Vec<Message>> {
        let limit = limit.clamp(1, 100);
        let offset = offset.max(0);

        // `!= ALL` is vacuously true for an empty exclusion list, so a
        // single query covers both cases.
        let results = sqlx::query_as::<_, MessageModel>(
            r#"
            SELECT id, message_text, user_id, created_at
            FROM messages
            WHERE id != ALL($1)
            ORDER BY created_at DESC, id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(exclude_ids)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        let mut messages: Vec<Message> = results.into_iter().map(Message::from).collect();
        self.attach_reaction_counts(&mut messages).await?;

        Ok(messages)
    }

    #[instrument(skip(self, draft))]
    async fn insert(&self, draft: MessageDraft) -> RepoResult<Message> {
        let result = sqlx::query_as::<_, MessageModel>(
            r#"
            INSERT INTO messages (message_text, user_id)
            VALUES ($1, $2)
            RETURNING id, message_text, user_id, created_at
            "#,
        )
        .bind(&draft.text)
        .bind(&draft.user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(Message::from(result))
    }
}
