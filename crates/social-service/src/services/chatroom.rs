//! Chatroom service
//!
//! Direct rooms pair the creator with exactly one other active user. Group
//! rooms are named, owned by their creator, and silently drop requested
//! members that do not resolve (they are reported back instead).

use std::collections::HashSet;

use social_core::entities::Chatroom;
use social_core::policy::{
    ensure_can_delete_chatroom, ensure_chatroom_member, validate_chatroom_request,
};
use social_core::{DomainError, Snowflake};
use tracing::{info, instrument, warn};

use crate::dto::{ChatroomResponse, ChatroomWithMembers, CreateChatroomRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Chatroom service
pub struct ChatroomService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ChatroomService<'a> {
    /// Create a new ChatroomService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a direct or group room with the creator as first member
    #[instrument(skip(self, request), fields(is_group = request.is_group))]
    pub async fn create_chatroom(
        &self,
        creator_id: Snowflake,
        request: CreateChatroomRequest,
    ) -> ServiceResult<ChatroomResponse> {
        let name = validate_chatroom_request(
            request.is_group,
            request.name.as_deref(),
            &request.member_ids,
            creator_id,
        )?;

        let requested = distinct_others(&request.member_ids, creator_id);
        let (to_add, skipped) = if request.is_group {
            self.resolve_group_members(&requested).await?
        } else {
            let target = requested
                .first()
                .copied()
                .ok_or(DomainError::DirectChatWithSelf)?;
            self.ctx
                .user_repo()
                .find_by_id(target)
                .await?
                .ok_or_else(|| ServiceError::not_found("User", target.to_string()))?;
            (vec![target], Vec::new())
        };

        let room = match name {
            Some(name) => Chatroom::new_group(self.ctx.generate_id(), creator_id, name),
            None => Chatroom::new_direct(self.ctx.generate_id(), creator_id),
        };

        self.ctx.chatroom_repo().create(&room, &to_add).await?;

        if !skipped.is_empty() {
            warn!(
                chatroom_id = %room.id,
                skipped = ?skipped,
                "Skipped unknown members while creating chatroom"
            );
        }

        let members = self.ctx.chatroom_repo().get_members(room.id).await?;

        info!(
            chatroom_id = %room.id,
            owner_id = %creator_id,
            members = members.len(),
            "Chatroom created"
        );

        Ok(ChatroomWithMembers { room, members, skipped }.into())
    }

    /// Rooms the user belongs to, newest first, with member IDs
    #[instrument(skip(self))]
    pub async fn list_chatrooms(&self, user_id: Snowflake) -> ServiceResult<Vec<ChatroomResponse>> {
        let rooms = self.ctx.chatroom_repo().find_by_user(user_id).await?;

        let mut responses = Vec::with_capacity(rooms.len());
        for room in rooms {
            let members = self.ctx.chatroom_repo().get_members(room.id).await?;
            responses.push(ChatroomResponse::from(ChatroomWithMembers {
                room,
                members,
                skipped: Vec::new(),
            }));
        }
        Ok(responses)
    }

    /// Soft delete a room; group rooms by their owner, direct rooms by either member
    #[instrument(skip(self))]
    pub async fn delete_chatroom(&self, actor_id: Snowflake, chatroom_id: Snowflake) -> ServiceResult<()> {
        let room = self.get_chatroom_entity(chatroom_id).await?;
        let is_member = self.ctx.chatroom_repo().is_member(room.id, actor_id).await?;
        ensure_can_delete_chatroom(&room, is_member, actor_id)?;

        self.ctx.chatroom_repo().delete(room.id).await?;

        info!(chatroom_id = %room.id, deleted_by = %actor_id, "Chatroom deleted");

        Ok(())
    }

    /// Get chatroom entity by ID
    #[instrument(skip(self))]
    pub async fn get_chatroom_entity(&self, chatroom_id: Snowflake) -> ServiceResult<Chatroom> {
        self.ctx
            .chatroom_repo()
            .find_by_id(chatroom_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Chatroom", chatroom_id.to_string()))
    }

    /// Load a room the actor belongs to
    #[instrument(skip(self))]
    pub async fn get_member_chatroom(
        &self,
        actor_id: Snowflake,
        chatroom_id: Snowflake,
    ) -> ServiceResult<Chatroom> {
        let room = self.get_chatroom_entity(chatroom_id).await?;
        let is_member = self.ctx.chatroom_repo().is_member(room.id, actor_id).await?;
        ensure_chatroom_member(is_member)?;
        Ok(room)
    }

    /// Split requested IDs into active users and the rest, keeping request order
    async fn resolve_group_members(
        &self,
        requested: &[Snowflake],
    ) -> ServiceResult<(Vec<Snowflake>, Vec<Snowflake>)> {
        if requested.is_empty() {
            return Ok((Vec::new(), Vec::new()));
        }

        let found: HashSet<Snowflake> = self
            .ctx
            .user_repo()
            .find_many(requested)
            .await?
            .into_iter()
            .map(|u| u.id)
            .collect();

        Ok(requested.iter().copied().partition(|id| found.contains(id)))
    }
}

/// Drop duplicates and the creator, preserving first occurrence order
fn distinct_others(ids: &[Snowflake], creator_id: Snowflake) -> Vec<Snowflake> {
    let mut seen = HashSet::new();
    ids.iter()
        .copied()
        .filter(|id| *id != creator_id && seen.insert(*id))
        .collect()
}
