//! Message handlers
//!
//! Endpoints for message operations.

use axum::{extract::State, Json};
use relay_service::{CreateMessageRequest, MessageListResponse, MessageResponse, MessageService};

use crate::extractors::{Pagination, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// List messages, newest first
///
/// GET /messages
pub async fn list_messages(
    State(state): State<AppState>,
    pagination: Pagination,
) -> ApiResult<Json<MessageListResponse>> {
    let service = MessageService::new(state.service_context());
    let messages = service
        .list_page(pagination.page, pagination.page_size)
        .await?;
    Ok(Json(MessageListResponse { messages }))
}

/// Create message
///
/// POST /messages
pub async fn create_message(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateMessageRequest>,
) -> ApiResult<Created<Json<MessageResponse>>> {
    let service = MessageService::new(state.service_context());
    let response = service.create_message(request).await?;
    Ok(Created(Json(response)))
}
