//! Comment entity <-> model mapper

use social_core::entities::{AttachmentRef, Comment};
use social_core::value_objects::Snowflake;

use crate::models::CommentModel;

impl From<CommentModel> for Comment {
    fn from(model: CommentModel) -> Self {
        Comment {
            id: Snowflake::new(model.id),
            feed_id: Snowflake::new(model.feed_id),
            author_id: Snowflake::new(model.author_id),
            content: model.content,
            attachment: model.attachment.map(AttachmentRef::new),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
