//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output. Timestamps are
//! rendered in RFC 1123 form.

use chrono::{DateTime, Utc};
use serde::Serialize;

use relay_core::entities::{Message, Reaction, ReactionCount};

/// Render a timestamp the way the API presents creation times
fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

// ============================================================================
// Message Responses
// ============================================================================

/// Reaction aggregate as returned in message payloads
#[derive(Debug, Clone, Serialize)]
pub struct ReactionCountResponse {
    #[serde(rename = "type")]
    pub kind: String,
    pub count: i64,
}

impl From<&ReactionCount> for ReactionCountResponse {
    fn from(count: &ReactionCount) -> Self {
        Self {
            kind: count.kind.clone(),
            count: count.count,
        }
    }
}

/// Message response
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub id: String,
    pub text: String,
    pub user_id: String,
    pub created_at: String,
    pub message_reactions: Vec<ReactionCountResponse>,
}

impl From<&Message> for MessageResponse {
    fn from(message: &Message) -> Self {
        Self {
            id: message.id.to_string(),
            text: message.text.clone(),
            user_id: message.user_id.clone(),
            created_at: format_timestamp(message.created_at),
            message_reactions: message
                .reaction_counts
                .iter()
                .map(ReactionCountResponse::from)
                .collect(),
        }
    }
}

/// Message listing response
#[derive(Debug, Serialize)]
pub struct MessageListResponse {
    pub messages: Vec<MessageResponse>,
}

// ============================================================================
// Reaction Responses
// ============================================================================

/// Reaction response
#[derive(Debug, Clone, Serialize)]
pub struct ReactionResponse {
    pub id: String,
    pub message_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub score: i32,
    pub user_id: String,
    pub created_at: String,
}

impl From<&Reaction> for ReactionResponse {
    fn from(reaction: &Reaction) -> Self {
        Self {
            id: reaction.id.to_string(),
            message_id: reaction.message_id.to_string(),
            kind: reaction.kind.clone(),
            score: reaction.score,
            user_id: reaction.user_id.clone(),
            created_at: format_timestamp(reaction.created_at),
        }
    }
}

// ============================================================================
// Health Responses
// ============================================================================

/// Liveness response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self { status: "ok" }
    }
}

/// Readiness response with dependency health
#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub status: &'static str,
    pub database: bool,
    pub cache: bool,
}

impl ReadinessResponse {
    pub fn ready(database: bool, cache: bool) -> Self {
        Self {
            status: if database && cache { "ready" } else { "degraded" },
            database,
            cache,
        }
    }
}
