//! Reaction entity - represents a user's reaction to a message

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Reaction entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reaction {
    pub id: Uuid,
    pub message_id: Uuid,
    pub kind: String,
    /// Positive weight of the reaction, 1 unless the client says otherwise.
    pub score: i32,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}

impl Reaction {
    /// Check if reaction is of a specific kind
    #[inline]
    pub fn is_kind(&self, kind: &str) -> bool {
        self.kind == kind
    }
}

/// Input for creating a reaction; the durable store assigns id and timestamp
/// and enforces the one-reaction-per-user-per-message constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionDraft {
    pub message_id: Uuid,
    pub kind: String,
    pub score: i32,
    pub user_id: String,
}

impl ReactionDraft {
    /// Create a draft with the default score of 1
    pub fn new(message_id: Uuid, kind: String, user_id: String) -> Self {
        Self {
            message_id,
            kind,
            score: 1,
            user_id,
        }
    }

    /// Override the reaction score
    #[must_use]
    pub fn with_score(mut self, score: i32) -> Self {
        self.score = score;
        self
    }
}
