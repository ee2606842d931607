//! Feed database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct FeedModel {
    pub id: i64,
    pub author_id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl FeedModel {
    #[inline]
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Row of `feed_attachments`; `position` orders attachments within a feed
#[derive(Debug, Clone, FromRow)]
pub struct FeedAttachmentModel {
    pub feed_id: i64,
    pub position: i32,
    pub path: String,
}
