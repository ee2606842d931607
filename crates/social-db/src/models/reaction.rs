//! Reaction database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Row of `feed_reactions`; `kind` is `like` or `dislike`
#[derive(Debug, Clone, FromRow)]
pub struct ReactionModel {
    pub id: i64,
    pub feed_id: i64,
    pub user_id: i64,
    pub kind: String,
    pub created_at: DateTime<Utc>,
}

/// Aggregated totals for one feed
#[derive(Debug, Clone, Copy, FromRow)]
pub struct ReactionCountModel {
    pub likes: i64,
    pub dislikes: i64,
}
