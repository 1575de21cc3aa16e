//! Message entity <-> model mapper

use relay_core::entities::Message;

use crate::models::MessageModel;

/// Convert MessageModel to Message entity (no aggregates attached yet)
impl From<MessageModel> for Message {
    fn from(model: MessageModel) -> Self {
        Message::new(model.id, model.message_text, model.user_id, model.created_at)
    }
}
