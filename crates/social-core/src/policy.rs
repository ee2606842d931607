//! Authorization and request-shape rules shared by every service
//!
//! Each check assumes the target entity was already loaded (existence is the
//! caller's concern) and returns a domain error describing why the actor is
//! refused.

use crate::entities::{Chatroom, Comment, Feed, Message};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Only the author may edit or delete a feed
pub fn ensure_feed_author(feed: &Feed, actor: Snowflake) -> Result<(), DomainError> {
    if feed.is_authored_by(actor) {
        Ok(())
    } else {
        Err(DomainError::NotFeedAuthor)
    }
}

/// Only the author may edit or delete a comment. Owning the feed grants nothing.
pub fn ensure_comment_author(comment: &Comment, actor: Snowflake) -> Result<(), DomainError> {
    if comment.is_authored_by(actor) {
        Ok(())
    } else {
        Err(DomainError::NotCommentAuthor)
    }
}

/// Only the author may delete a message, group owners included
pub fn ensure_message_author(message: &Message, actor: Snowflake) -> Result<(), DomainError> {
    if message.is_authored_by(actor) {
        Ok(())
    } else {
        Err(DomainError::NotMessageAuthor)
    }
}

/// Reading or posting in a room requires membership
///
/// `is_member` is the result of the membership lookup for the actor.
pub fn ensure_chatroom_member(is_member: bool) -> Result<(), DomainError> {
    if is_member {
        Ok(())
    } else {
        Err(DomainError::NotChatroomMember)
    }
}

/// Group rooms may only be deleted by their owner, direct rooms by either member
pub fn ensure_can_delete_chatroom(
    room: &Chatroom,
    is_member: bool,
    actor: Snowflake,
) -> Result<(), DomainError> {
    if room.is_group {
        if room.is_owned_by(actor) {
            Ok(())
        } else {
            Err(DomainError::NotChatroomOwner)
        }
    } else {
        ensure_chatroom_member(is_member)
    }
}

pub fn ensure_not_self_follow(actor: Snowflake, target: Snowflake) -> Result<(), DomainError> {
    if actor == target {
        Err(DomainError::CannotFollowSelf)
    } else {
        Ok(())
    }
}

/// Validate the cardinality and naming rules of a room creation request
///
/// Checks run in order: direct-room member count, direct-room self target,
/// then group name. Returns the trimmed group name, if any.
pub fn validate_chatroom_request(
    is_group: bool,
    name: Option<&str>,
    member_ids: &[Snowflake],
    creator: Snowflake,
) -> Result<Option<String>, DomainError> {
    if !is_group {
        if member_ids.len() != 1 {
            return Err(DomainError::DirectChatMemberCount(member_ids.len()));
        }
        if member_ids[0] == creator {
            return Err(DomainError::DirectChatWithSelf);
        }
        return Ok(None);
    }

    match name.map(str::trim) {
        Some(name) if !name.is_empty() => Ok(Some(name.to_string())),
        _ => Err(DomainError::GroupNameRequired),
    }
}

/// Reject blank text content
pub fn ensure_content(content: &str) -> Result<(), DomainError> {
    if content.trim().is_empty() {
        Err(DomainError::EmptyContent)
    } else {
        Ok(())
    }
}
