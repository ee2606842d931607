//! Comment entity - a reply on a feed

use chrono::{DateTime, Utc};

use super::AttachmentRef;
use crate::value_objects::Snowflake;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: Snowflake,
    pub feed_id: Snowflake,
    pub author_id: Snowflake,
    pub content: String,
    pub attachment: Option<AttachmentRef>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(
        id: Snowflake,
        feed_id: Snowflake,
        author_id: Snowflake,
        content: String,
        attachment: Option<AttachmentRef>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            feed_id,
            author_id,
            content,
            attachment,
            created_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn is_authored_by(&self, user_id: Snowflake) -> bool {
        self.author_id == user_id
    }

    /// Replace the text; the attachment is kept
    pub fn edit(&mut self, content: String) {
        self.content = content;
        self.updated_at = Utc::now();
    }
}
