//! Path parameter extractors
//!
//! Each struct deserializes the raw segment and parses it on demand, so a
//! malformed ID becomes `INVALID_PATH_PARAMETER` instead of a 404.

use serde::Deserialize;
use social_core::Snowflake;

use crate::response::ApiError;

fn parse_id(raw: &str, name: &str) -> Result<Snowflake, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::invalid_path(format!("Invalid {name} format")))
}

/// Path parameters with user_id
#[derive(Debug, Deserialize)]
pub struct UserIdPath {
    pub user_id: String,
}

impl UserIdPath {
    /// Parse user_id as Snowflake
    pub fn user_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.user_id, "user_id")
    }
}

/// Path parameters with feed_id
#[derive(Debug, Deserialize)]
pub struct FeedIdPath {
    pub feed_id: String,
}

impl FeedIdPath {
    /// Parse feed_id as Snowflake
    pub fn feed_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.feed_id, "feed_id")
    }
}

/// Path parameters with comment_id
#[derive(Debug, Deserialize)]
pub struct CommentIdPath {
    pub comment_id: String,
}

impl CommentIdPath {
    /// Parse comment_id as Snowflake
    pub fn comment_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.comment_id, "comment_id")
    }
}

/// Path parameters with chatroom_id
#[derive(Debug, Deserialize)]
pub struct ChatroomIdPath {
    pub chatroom_id: String,
}

impl ChatroomIdPath {
    /// Parse chatroom_id as Snowflake
    pub fn chatroom_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.chatroom_id, "chatroom_id")
    }
}

/// Path parameters with message_id
#[derive(Debug, Deserialize)]
pub struct MessageIdPath {
    pub message_id: String,
}

impl MessageIdPath {
    /// Parse message_id as Snowflake
    pub fn message_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.message_id, "message_id")
    }
}
