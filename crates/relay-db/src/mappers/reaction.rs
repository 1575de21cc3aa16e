//! Reaction entity <-> model mapper

use relay_core::entities::{Reaction, ReactionCount};

use crate::models::{ReactionCountModel, ReactionModel};

/// Convert ReactionModel to Reaction entity
impl From<ReactionModel> for Reaction {
    fn from(model: ReactionModel) -> Self {
        Reaction {
            id: model.id,
            message_id: model.message_id,
            kind: model.kind,
            score: model.score,
            user_id: model.user_id,
            created_at: model.created_at,
        }
    }
}

/// Convert a grouped count row to the domain aggregate
impl From<ReactionCountModel> for ReactionCount {
    fn from(model: ReactionCountModel) -> Self {
        ReactionCount::new(model.kind, model.count)
    }
}
