//! Feed entity - a post with ordered attachments

use chrono::{DateTime, Utc};

use super::AttachmentRef;
use crate::value_objects::Snowflake;

/// A post on the global feed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feed {
    pub id: Snowflake,
    pub author_id: Snowflake,
    pub content: String,
    /// Attachments in upload order
    pub attachments: Vec<AttachmentRef>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Feed {
    pub fn new(
        id: Snowflake,
        author_id: Snowflake,
        content: String,
        attachments: Vec<AttachmentRef>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            author_id,
            content,
            attachments,
            created_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn is_authored_by(&self, user_id: Snowflake) -> bool {
        self.author_id == user_id
    }

    /// Replace the text and, when new files were uploaded, the whole attachment list
    ///
    /// An empty `attachments` keeps the current list.
    pub fn edit(&mut self, content: String, attachments: Vec<AttachmentRef>) {
        self.content = content;
        if !attachments.is_empty() {
            self.attachments = attachments;
        }
        self.updated_at = Utc::now();
    }
}
