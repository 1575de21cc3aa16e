//! Test fixtures and data generators
//!
//! Provides reusable test data for integration tests.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Create message request
#[derive(Debug, Serialize)]
pub struct CreateMessageRequest {
    pub text: String,
    pub user_id: String,
}

impl CreateMessageRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            text: format!("test message {suffix}"),
            user_id: format!("testuser{suffix}"),
        }
    }
}

/// Create reaction request
#[derive(Debug, Serialize)]
pub struct CreateReactionRequest {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<i32>,
    pub user_id: String,
}

impl CreateReactionRequest {
    pub fn like(user_id: impl Into<String>) -> Self {
        Self {
            kind: "like".to_string(),
            score: None,
            user_id: user_id.into(),
        }
    }
}

/// Message response
#[derive(Debug, Deserialize)]
pub struct MessageResponse {
    pub id: String,
    pub text: String,
    pub user_id: String,
    pub created_at: String,
    #[serde(default)]
    pub message_reactions: Vec<ReactionCountResponse>,
}

/// Reaction aggregate in message payloads
#[derive(Debug, Deserialize)]
pub struct ReactionCountResponse {
    #[serde(rename = "type")]
    pub kind: String,
    pub count: i64,
}

/// Message listing response
#[derive(Debug, Deserialize)]
pub struct MessageListResponse {
    pub messages: Vec<MessageResponse>,
}

/// Reaction response
#[derive(Debug, Deserialize)]
pub struct ReactionResponse {
    pub id: String,
    pub message_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub score: i32,
    pub user_id: String,
    pub created_at: String,
}
