//! Chatroom entity <-> model mapper

use social_core::entities::Chatroom;
use social_core::value_objects::Snowflake;

use crate::models::ChatroomModel;

impl From<ChatroomModel> for Chatroom {
    fn from(model: ChatroomModel) -> Self {
        Chatroom {
            id: Snowflake::new(model.id),
            name: model.name,
            is_group: model.is_group,
            owner_id: Snowflake::new(model.owner_id),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
