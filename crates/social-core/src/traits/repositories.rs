//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. Every finder ignores soft-deleted rows.

use async_trait::async_trait;

use crate::entities::{
    Chatroom, Comment, Feed, Follow, Message, Reaction, ReactionCounts, ReactionOutcome, User,
};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>>;

    /// Find user whose email or username equals `login`
    async fn find_by_login(&self, login: &str) -> RepoResult<Option<User>>;

    /// List every active user, oldest first
    async fn find_all(&self) -> RepoResult<Vec<User>>;

    /// Resolve many users at once; unknown or deactivated IDs are omitted
    async fn find_many(&self, ids: &[Snowflake]) -> RepoResult<Vec<User>>;

    /// Check if email is already taken (deactivated accounts included)
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// Check if username is already taken (deactivated accounts included)
    async fn username_exists(&self, username: &str) -> RepoResult<bool>;

    /// Create a new user
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()>;

    /// Update profile fields of an existing user
    async fn update(&self, user: &User) -> RepoResult<()>;

    /// Soft delete a user
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>>;

    /// Update password hash
    async fn update_password(&self, id: Snowflake, password_hash: &str) -> RepoResult<()>;
}

// ============================================================================
// Follow Repository
// ============================================================================

#[async_trait]
pub trait FollowRepository: Send + Sync {
    /// Insert an edge; fails with `AlreadyFollowing` when it already exists
    async fn create(&self, follow: &Follow) -> RepoResult<()>;

    /// Remove an edge. Returns whether an edge was removed.
    async fn delete(&self, follower_id: Snowflake, followed_id: Snowflake) -> RepoResult<bool>;

    async fn exists(&self, follower_id: Snowflake, followed_id: Snowflake) -> RepoResult<bool>;

    /// Active users following `user_id`
    async fn find_followers(&self, user_id: Snowflake) -> RepoResult<Vec<User>>;

    /// Active users followed by `user_id`
    async fn find_following(&self, user_id: Snowflake) -> RepoResult<Vec<User>>;
}

// ============================================================================
// Feed Repository
// ============================================================================

/// Cursor options for feed listings (newest first)
#[derive(Debug, Clone, Default)]
pub struct FeedQuery {
    /// Only feeds with an ID lower than this
    pub before: Option<Snowflake>,
    pub limit: Option<i64>,
}

impl FeedQuery {
    pub const DEFAULT_LIMIT: i64 = 50;
    pub const MAX_LIMIT: i64 = 100;

    /// Effective limit clamped to `1..=MAX_LIMIT`
    pub fn limit(&self) -> i64 {
        self.limit
            .unwrap_or(Self::DEFAULT_LIMIT)
            .clamp(1, Self::MAX_LIMIT)
    }
}

#[async_trait]
pub trait FeedRepository: Send + Sync {
    /// Find a feed with its attachments
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Feed>>;

    /// List feeds newest first, with attachments
    async fn list(&self, query: FeedQuery) -> RepoResult<Vec<Feed>>;

    /// Insert the feed and its ordered attachments atomically
    async fn create(&self, feed: &Feed) -> RepoResult<()>;

    /// Update content and replace the attachment list atomically
    async fn update(&self, feed: &Feed) -> RepoResult<()>;

    /// Soft delete a feed
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Comment Repository
// ============================================================================

#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Comment>>;

    /// Comments of several feeds, oldest first
    async fn find_by_feeds(&self, feed_ids: &[Snowflake]) -> RepoResult<Vec<Comment>>;

    async fn create(&self, comment: &Comment) -> RepoResult<()>;

    async fn update(&self, comment: &Comment) -> RepoResult<()>;

    /// Soft delete a comment
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Reaction Repository
// ============================================================================

#[async_trait]
pub trait ReactionRepository: Send + Sync {
    async fn find(&self, feed_id: Snowflake, user_id: Snowflake) -> RepoResult<Option<Reaction>>;

    /// Reactions of several feeds
    async fn find_by_feeds(&self, feed_ids: &[Snowflake]) -> RepoResult<Vec<Reaction>>;

    async fn count_by_feed(&self, feed_id: Snowflake) -> RepoResult<ReactionCounts>;

    /// Apply the toggle for `proposed.kind` on (`proposed.feed_id`, `proposed.user_id`)
    ///
    /// Must be atomic with respect to concurrent toggles on the same pair.
    /// `proposed.id` and `proposed.created_at` are used only when a new row is inserted.
    async fn toggle(&self, proposed: &Reaction) -> RepoResult<ReactionOutcome>;
}

// ============================================================================
// Chatroom Repository
// ============================================================================

#[async_trait]
pub trait ChatroomRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Chatroom>>;

    /// Rooms the user belongs to, newest first
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<Chatroom>>;

    /// Insert the room with the owner and then `members`, in that join order
    ///
    /// Nothing is written unless every membership row is.
    async fn create(&self, room: &Chatroom, members: &[Snowflake]) -> RepoResult<()>;

    /// Member IDs in join order
    async fn get_members(&self, room_id: Snowflake) -> RepoResult<Vec<Snowflake>>;

    async fn is_member(&self, room_id: Snowflake, user_id: Snowflake) -> RepoResult<bool>;

    /// Soft delete a room
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Message Repository
// ============================================================================

/// Cursor options for message listings (oldest first)
#[derive(Debug, Clone, Default)]
pub struct MessageQuery {
    /// Only messages with an ID lower than this
    pub before: Option<Snowflake>,
    /// Only messages with an ID greater than this
    pub after: Option<Snowflake>,
    pub limit: Option<i64>,
}

impl MessageQuery {
    pub const DEFAULT_LIMIT: i64 = 50;
    pub const MAX_LIMIT: i64 = 100;

    pub fn limit(&self) -> i64 {
        self.limit
            .unwrap_or(Self::DEFAULT_LIMIT)
            .clamp(1, Self::MAX_LIMIT)
    }
}

#[async_trait]
pub trait MessageRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Message>>;

    /// Messages of a room in chronological order
    async fn find_by_chatroom(
        &self,
        chatroom_id: Snowflake,
        query: MessageQuery,
    ) -> RepoResult<Vec<Message>>;

    async fn create(&self, message: &Message) -> RepoResult<()>;

    /// Soft delete a message
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;
}
