//! Chatroom entity - a direct (two-person) or group conversation

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Chatroom; membership lives in the repository's join table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chatroom {
    pub id: Snowflake,
    /// Required for group rooms, absent for direct rooms
    pub name: Option<String>,
    pub is_group: bool,
    /// Creator. Only meaningful for authorization on group rooms.
    pub owner_id: Snowflake,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Chatroom {
    /// Create a direct room
    pub fn new_direct(id: Snowflake, creator_id: Snowflake) -> Self {
        Self::build(id, None, false, creator_id)
    }

    /// Create a named group room owned by its creator
    pub fn new_group(id: Snowflake, owner_id: Snowflake, name: String) -> Self {
        Self::build(id, Some(name), true, owner_id)
    }

    fn build(id: Snowflake, name: Option<String>, is_group: bool, owner_id: Snowflake) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            is_group,
            owner_id,
            created_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn is_direct(&self) -> bool {
        !self.is_group
    }

    #[inline]
    pub fn is_owned_by(&self, user_id: Snowflake) -> bool {
        self.owner_id == user_id
    }
}
