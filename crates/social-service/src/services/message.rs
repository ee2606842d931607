//! Message service
//!
//! Reading and posting require membership of the room. Only a message's
//! author may delete it.

use std::collections::HashMap;

use social_core::entities::{Message, User};
use social_core::policy::{ensure_content, ensure_message_author};
use social_core::traits::MessageQuery;
use social_core::Snowflake;
use tracing::{info, instrument};

use crate::dto::{MessageResponse, MessageWithAuthor, SendMessageRequest};

use super::chatroom::ChatroomService;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::files;

/// Message service
pub struct MessageService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MessageService<'a> {
    /// Create a new MessageService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Messages of a room in chronological order
    #[instrument(skip(self, query))]
    pub async fn list_messages(
        &self,
        actor_id: Snowflake,
        chatroom_id: Snowflake,
        query: MessageQuery,
    ) -> ServiceResult<Vec<MessageResponse>> {
        let room = ChatroomService::new(self.ctx)
            .get_member_chatroom(actor_id, chatroom_id)
            .await?;

        let messages = self.ctx.message_repo().find_by_chatroom(room.id, query).await?;

        let mut author_ids: Vec<Snowflake> = messages.iter().map(|m| m.author_id).collect();
        author_ids.sort_unstable();
        author_ids.dedup();

        let authors: HashMap<Snowflake, User> = self
            .ctx
            .user_repo()
            .find_many(&author_ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();

        Ok(messages
            .into_iter()
            .map(|message| {
                let author = authors.get(&message.author_id).cloned();
                MessageResponse::from(MessageWithAuthor { message, author })
            })
            .collect())
    }

    /// Post a message, optionally with one attachment
    #[instrument(skip(self, request))]
    pub async fn send_message(
        &self,
        author_id: Snowflake,
        chatroom_id: Snowflake,
        request: SendMessageRequest,
    ) -> ServiceResult<MessageResponse> {
        ensure_content(&request.content)?;
        files::check_sizes(self.ctx, &request.file)?;

        let room = ChatroomService::new(self.ctx)
            .get_member_chatroom(author_id, chatroom_id)
            .await?;

        let attachment = files::store_one(self.ctx, request.file).await?;
        let message = Message::new(
            self.ctx.generate_id(),
            room.id,
            author_id,
            request.content,
            attachment,
        );

        if let Err(e) = self.ctx.message_repo().create(&message).await {
            files::discard(self.ctx, message.attachment.as_slice()).await;
            return Err(e.into());
        }

        info!(
            message_id = %message.id,
            chatroom_id = %room.id,
            has_attachment = message.has_attachment(),
            "Message sent"
        );

        let author = self.ctx.user_repo().find_by_id(author_id).await?;
        Ok(MessageWithAuthor { message, author }.into())
    }

    /// Soft delete a message; room owners cannot delete others' messages
    #[instrument(skip(self))]
    pub async fn delete_message(&self, actor_id: Snowflake, message_id: Snowflake) -> ServiceResult<()> {
        let message = self
            .ctx
            .message_repo()
            .find_by_id(message_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Message", message_id.to_string()))?;

        ensure_message_author(&message, actor_id)?;

        self.ctx.message_repo().delete(message.id).await?;

        info!(message_id = %message.id, chatroom_id = %message.chatroom_id, "Message deleted");

        Ok(())
    }
}
