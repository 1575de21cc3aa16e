//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use serde::Deserialize;
use validator::{Validate, ValidationError};

/// Reaction kinds accepted by the API
pub const REACTION_KINDS: [&str; 6] = ["like", "love", "laugh", "sad", "clap", "wow"];

fn validate_reaction_kind(kind: &str) -> Result<(), ValidationError> {
    if REACTION_KINDS.contains(&kind) {
        Ok(())
    } else {
        Err(ValidationError::new("unknown_reaction_kind"))
    }
}

// ============================================================================
// Message Requests
// ============================================================================

/// Create message request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMessageRequest {
    #[validate(length(min = 1, max = 2000, message = "Text must be 1-2000 characters"))]
    pub text: String,

    #[validate(length(min = 1, message = "user_id is required"))]
    pub user_id: String,
}

// ============================================================================
// Reaction Requests
// ============================================================================

/// Create reaction request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateReactionRequest {
    /// Reaction kind, e.g. 'like' or 'clap'
    #[serde(rename = "type")]
    #[validate(custom(function = validate_reaction_kind))]
    pub kind: String,

    /// Reaction weight; defaults to 1 when omitted
    #[validate(range(min = 1, message = "Score must be a positive integer"))]
    pub score: Option<i32>,

    #[validate(length(min = 1, message = "user_id is required"))]
    pub user_id: String,
}
