//! Reaction database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for message_reactions table
#[derive(Debug, Clone, FromRow)]
pub struct ReactionModel {
    pub id: Uuid,
    pub message_id: Uuid,
    /// Reaction kind: 'like', 'love', ... (stored in the `type` column)
    #[sqlx(rename = "type")]
    pub kind: String,
    pub score: i32,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}

/// Row shape for reaction counts grouped by kind
#[derive(Debug, Clone, FromRow)]
pub struct ReactionCountModel {
    pub message_id: Uuid,
    #[sqlx(rename = "type")]
    pub kind: String,
    pub count: i64,
}
