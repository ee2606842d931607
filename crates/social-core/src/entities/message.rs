//! Message entity - a chat message inside a chatroom

use chrono::{DateTime, Utc};

use super::AttachmentRef;
use crate::value_objects::Snowflake;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: Snowflake,
    pub chatroom_id: Snowflake,
    pub author_id: Snowflake,
    pub content: String,
    pub attachment: Option<AttachmentRef>,
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub fn new(
        id: Snowflake,
        chatroom_id: Snowflake,
        author_id: Snowflake,
        content: String,
        attachment: Option<AttachmentRef>,
    ) -> Self {
        Self {
            id,
            chatroom_id,
            author_id,
            content,
            attachment,
            created_at: Utc::now(),
        }
    }

    #[inline]
    pub fn is_authored_by(&self, user_id: Snowflake) -> bool {
        self.author_id == user_id
    }

    #[inline]
    pub fn has_attachment(&self) -> bool {
        self.attachment.is_some()
    }

    /// Truncated preview of the content, cut on a char boundary
    pub fn preview(&self, max_len: usize) -> &str {
        if self.content.len() <= max_len {
            return &self.content;
        }
        let mut end = max_len;
        while end > 0 && !self.content.is_char_boundary(end) {
            end -= 1;
        }
        &self.content[..end]
    }
}
