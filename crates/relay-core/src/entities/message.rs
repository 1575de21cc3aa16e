//! Message entity - represents a persisted message

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Message entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: Uuid,
    pub text: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    /// Aggregated reaction counts, ordered by first occurrence.
    /// At most one entry per reaction kind.
    pub reaction_counts: Vec<ReactionCount>,
}

impl Message {
    /// Create a new Message with no reactions
    pub fn new(id: Uuid, text: String, user_id: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            text,
            user_id,
            created_at,
            reaction_counts: Vec::new(),
        }
    }

    /// Fold a single reaction of the given kind into the aggregates.
    ///
    /// Increments the existing entry for the kind, or appends a fresh
    /// `{kind, count: 1}` entry when the kind has not been seen yet.
    pub fn record_reaction(&mut self, kind: &str) {
        if let Some(entry) = self.reaction_counts.iter_mut().find(|c| c.kind == kind) {
            entry.count += 1;
        } else {
            self.reaction_counts.push(ReactionCount {
                kind: kind.to_string(),
                count: 1,
            });
        }
    }

    /// Total number of reactions across all kinds
    #[inline]
    pub fn reaction_total(&self) -> i64 {
        self.reaction_counts.iter().map(|c| c.count).sum()
    }

    /// Check if message text is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Aggregated reaction count for a single kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionCount {
    pub kind: String,
    pub count: i64,
}

impl ReactionCount {
    /// Create a new ReactionCount
    pub fn new(kind: String, count: i64) -> Self {
        Self { kind, count }
    }
}

/// Input for creating a message; the durable store assigns id and timestamp
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageDraft {
    pub text: String,
    pub user_id: String,
}
