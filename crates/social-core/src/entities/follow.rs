//! Follow entity - a directed edge in the social graph

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// `follower_id` follows `followed_id`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Follow {
    pub follower_id: Snowflake,
    pub followed_id: Snowflake,
    pub created_at: DateTime<Utc>,
}

impl Follow {
    pub fn new(follower_id: Snowflake, followed_id: Snowflake) -> Self {
        Self {
            follower_id,
            followed_id,
            created_at: Utc::now(),
        }
    }

    #[inline]
    pub fn is_self_follow(&self) -> bool {
        self.follower_id == self.followed_id
    }
}
