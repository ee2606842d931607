//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(Snowflake),

    #[error("Feed not found: {0}")]
    FeedNotFound(Snowflake),

    #[error("Comment not found: {0}")]
    CommentNotFound(Snowflake),

    #[error("Chatroom not found: {0}")]
    ChatroomNotFound(Snowflake),

    #[error("Message not found: {0}")]
    MessageNotFound(Snowflake),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Content must not be empty")]
    EmptyContent,

    #[error("Direct chat requires exactly one other member, got {0}")]
    DirectChatMemberCount(usize),

    #[error("Group chat requires a name")]
    GroupNameRequired,

    #[error("Cannot start a direct chat with yourself")]
    DirectChatWithSelf,

    #[error("Cannot follow yourself")]
    CannotFollowSelf,

    #[error("File too large: max {max_bytes} bytes")]
    FileTooLarge { max_bytes: u64 },

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Not the author of this feed")]
    NotFeedAuthor,

    #[error("Not the author of this comment")]
    NotCommentAuthor,

    #[error("Not the author of this message")]
    NotMessageAuthor,

    #[error("Not the owner of this chatroom")]
    NotChatroomOwner,

    #[error("Not a member of this chatroom")]
    NotChatroomMember,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Email already in use")]
    EmailAlreadyExists,

    #[error("Username already taken")]
    UsernameAlreadyExists,

    #[error("Already following this user")]
    AlreadyFollowing,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::FeedNotFound(_) => "UNKNOWN_FEED",
            Self::CommentNotFound(_) => "UNKNOWN_COMMENT",
            Self::ChatroomNotFound(_) => "UNKNOWN_CHATROOM",
            Self::MessageNotFound(_) => "UNKNOWN_MESSAGE",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::EmptyContent => "EMPTY_CONTENT",
            Self::DirectChatMemberCount(_) => "DIRECT_CHAT_MEMBER_COUNT",
            Self::GroupNameRequired => "GROUP_NAME_REQUIRED",
            Self::DirectChatWithSelf => "DIRECT_CHAT_WITH_SELF",
            Self::CannotFollowSelf => "CANNOT_FOLLOW_SELF",
            Self::FileTooLarge { .. } => "FILE_TOO_LARGE",

            // Authorization
            Self::NotFeedAuthor => "NOT_FEED_AUTHOR",
            Self::NotCommentAuthor => "NOT_COMMENT_AUTHOR",
            Self::NotMessageAuthor => "NOT_MESSAGE_AUTHOR",
            Self::NotChatroomOwner => "NOT_CHATROOM_OWNER",
            Self::NotChatroomMember => "NOT_CHATROOM_MEMBER",

            // Conflict
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::UsernameAlreadyExists => "USERNAME_ALREADY_EXISTS",
            Self::AlreadyFollowing => "ALREADY_FOLLOWING",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::StorageError(_) => "STORAGE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::FeedNotFound(_)
                | Self::CommentNotFound(_)
                | Self::ChatroomNotFound(_)
                | Self::MessageNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::EmptyContent
                | Self::DirectChatMemberCount(_)
                | Self::GroupNameRequired
                | Self::DirectChatWithSelf
                | Self::CannotFollowSelf
                | Self::FileTooLarge { .. }
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(
            self,
            Self::NotFeedAuthor
                | Self::NotCommentAuthor
                | Self::NotMessageAuthor
                | Self::NotChatroomOwner
                | Self::NotChatroomMember
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::EmailAlreadyExists | Self::UsernameAlreadyExists | Self::AlreadyFollowing
        )
    }
}
