//! Message entity <-> model mapper

use social_core::entities::{AttachmentRef, Message};
use social_core::value_objects::Snowflake;

use crate::models::MessageModel;

/// Convert MessageModel to Message entity
impl From<MessageModel> for Message {
    fn from(model: MessageModel) -> Self {
        Message {
            id: Snowflake::new(model.id),
            chatroom_id: Snowflake::new(model.chatroom_id),
            author_id: Snowflake::new(model.author_id),
            content: model.content,
            attachment: model.attachment.map(AttachmentRef::new),
            created_at: model.created_at,
        }
    }
}
