//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.
//! Responses that need related rows are built from the helper structs below.

use social_core::entities::{
    Chatroom, Comment, Feed, Message, Reaction, ReactionCounts, ReactionOutcome, User,
};
use social_core::Snowflake;

use super::responses::{
    ChatroomResponse, CommentResponse, CurrentUserResponse, FeedResponse, MessageResponse,
    ReactionCountsResponse, ReactionResponse, ReactionToggleResponse, UserResponse,
};

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            display_name: user.display_name.clone(),
            photo: user.photo.as_ref().map(ToString::to_string),
            created_at: user.created_at,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

impl From<&User> for CurrentUserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            email: user.email.clone(),
            display_name: user.display_name.clone(),
            photo: user.photo.as_ref().map(ToString::to_string),
            gender: user.gender.clone(),
            birth_date: user.birth_date,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<User> for CurrentUserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

// ============================================================================
// Reaction Mappers
// ============================================================================

impl From<ReactionCounts> for ReactionCountsResponse {
    fn from(counts: ReactionCounts) -> Self {
        Self {
            likes: counts.likes,
            dislikes: counts.dislikes,
        }
    }
}

impl From<&Reaction> for ReactionResponse {
    fn from(reaction: &Reaction) -> Self {
        Self {
            user_id: reaction.user_id.to_string(),
            kind: reaction.kind,
            created_at: reaction.created_at,
        }
    }
}

/// Helper struct for creating ReactionToggleResponse
pub struct ReactionToggle {
    pub feed_id: Snowflake,
    pub outcome: ReactionOutcome,
    pub counts: ReactionCounts,
}

impl From<ReactionToggle> for ReactionToggleResponse {
    fn from(toggle: ReactionToggle) -> Self {
        Self {
            feed_id: toggle.feed_id.to_string(),
            action: toggle.outcome.action().to_string(),
            reaction: toggle.outcome.current(),
            counts: toggle.counts.into(),
        }
    }
}

// ============================================================================
// Feed / Comment Mappers
// ============================================================================

/// Helper struct for creating CommentResponse
pub struct CommentWithAuthor {
    pub comment: Comment,
    pub author: Option<User>,
}

impl From<CommentWithAuthor> for CommentResponse {
    fn from(cwa: CommentWithAuthor) -> Self {
        Self {
            id: cwa.comment.id.to_string(),
            feed_id: cwa.comment.feed_id.to_string(),
            author_id: cwa.comment.author_id.to_string(),
            author: cwa.author.as_ref().map(UserResponse::from),
            content: cwa.comment.content,
            attachment: cwa.comment.attachment.map(|a| a.into_inner()),
            created_at: cwa.comment.created_at,
            updated_at: cwa.comment.updated_at,
        }
    }
}

/// Helper struct for creating FeedResponse
pub struct FeedWithDetails {
    pub feed: Feed,
    pub author: Option<User>,
    pub comments: Vec<CommentWithAuthor>,
    pub reactions: Vec<Reaction>,
    /// User the response is rendered for
    pub viewer_id: Snowflake,
}

impl From<FeedWithDetails> for FeedResponse {
    fn from(details: FeedWithDetails) -> Self {
        let counts = ReactionCounts::tally(&details.reactions);
        let my_reaction = details
            .reactions
            .iter()
            .find(|r| r.user_id == details.viewer_id)
            .map(|r| r.kind);

        Self {
            id: details.feed.id.to_string(),
            author_id: details.feed.author_id.to_string(),
            author: details.author.as_ref().map(UserResponse::from),
            content: details.feed.content,
            attachments: details
                .feed
                .attachments
                .into_iter()
                .map(|a| a.into_inner())
                .collect(),
            comments: details.comments.into_iter().map(CommentResponse::from).collect(),
            reactions: details.reactions.iter().map(ReactionResponse::from).collect(),
            reaction_counts: counts.into(),
            my_reaction,
            created_at: details.feed.created_at,
            updated_at: details.feed.updated_at,
        }
    }
}

// ============================================================================
// Chat Mappers
// ============================================================================

/// Helper struct for creating ChatroomResponse
pub struct ChatroomWithMembers {
    pub room: Chatroom,
    pub members: Vec<Snowflake>,
    pub skipped: Vec<Snowflake>,
}

impl From<ChatroomWithMembers> for ChatroomResponse {
    fn from(cwm: ChatroomWithMembers) -> Self {
        Self {
            id: cwm.room.id.to_string(),
            name: cwm.room.name,
            is_group: cwm.room.is_group,
            owner_id: cwm.room.owner_id.to_string(),
            member_ids: cwm.members.iter().map(ToString::to_string).collect(),
            skipped_member_ids: cwm.skipped.iter().map(ToString::to_string).collect(),
            created_at: cwm.room.created_at,
        }
    }
}

/// Helper struct for creating MessageResponse
pub struct MessageWithAuthor {
    pub message: Message,
    pub author: Option<User>,
}

impl From<MessageWithAuthor> for MessageResponse {
    fn from(mwa: MessageWithAuthor) -> Self {
        Self {
            id: mwa.message.id.to_string(),
            chatroom_id: mwa.message.chatroom_id.to_string(),
            author_id: mwa.message.author_id.to_string(),
            author: mwa.author.as_ref().map(UserResponse::from),
            content: mwa.message.content,
            attachment: mwa.message.attachment.map(|a| a.into_inner()),
            created_at: mwa.message.created_at,
        }
    }
}
