//! Reaction handlers
//!
//! Endpoints for reaction operations.

use axum::{
    extract::{Path, State},
    Json,
};
use relay_service::{CreateReactionRequest, ReactionResponse, ReactionService};
use uuid::Uuid;

use crate::extractors::ValidatedJson;
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// React to a message
///
/// POST /messages/{message_id}/reactions
pub async fn create_reaction(
    State(state): State<AppState>,
    Path(message_id): Path<String>,
    ValidatedJson(request): ValidatedJson<CreateReactionRequest>,
) -> ApiResult<Created<Json<ReactionResponse>>> {
    let message_id = message_id
        .parse::<Uuid>()
        .map_err(|_| crate::response::ApiError::invalid_path("Invalid message_id format"))?;

    let service = ReactionService::new(state.service_context());
    let response = service.create_reaction(message_id, request).await?;
    Ok(Created(Json(response)))
}
