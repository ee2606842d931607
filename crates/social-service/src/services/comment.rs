//! Comment service

use social_core::entities::Comment;
use social_core::policy::{ensure_comment_author, ensure_content};
use social_core::Snowflake;
use tracing::{info, instrument};

use crate::dto::{CommentResponse, CommentWithAuthor, CreateCommentRequest, UpdateCommentRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::files;

/// Comment service
pub struct CommentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CommentService<'a> {
    /// Create a new CommentService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Comment on an existing feed, optionally with one attachment
    #[instrument(skip(self, request))]
    pub async fn create_comment(
        &self,
        author_id: Snowflake,
        feed_id: Snowflake,
        request: CreateCommentRequest,
    ) -> ServiceResult<CommentResponse> {
        ensure_content(&request.content)?;
        files::check_sizes(self.ctx, &request.file)?;

        self.ctx
            .feed_repo()
            .find_by_id(feed_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Feed", feed_id.to_string()))?;

        let attachment = files::store_one(self.ctx, request.file).await?;
        let comment = Comment::new(
            self.ctx.generate_id(),
            feed_id,
            author_id,
            request.content,
            attachment,
        );

        if let Err(e) = self.ctx.comment_repo().create(&comment).await {
            files::discard(self.ctx, comment.attachment.as_slice()).await;
            return Err(e.into());
        }

        info!(comment_id = %comment.id, feed_id = %feed_id, "Comment created");

        self.render(comment).await
    }

    /// Edit the text of a comment; the attachment is kept
    #[instrument(skip(self, request))]
    pub async fn update_comment(
        &self,
        actor_id: Snowflake,
        comment_id: Snowflake,
        request: UpdateCommentRequest,
    ) -> ServiceResult<CommentResponse> {
        ensure_content(&request.content)?;

        let mut comment = self.get_comment_entity(comment_id).await?;
        ensure_comment_author(&comment, actor_id)?;

        comment.edit(request.content);
        self.ctx.comment_repo().update(&comment).await?;

        info!(comment_id = %comment.id, "Comment updated");

        self.render(comment).await
    }

    /// Soft delete a comment; the feed's author has no say
    #[instrument(skip(self))]
    pub async fn delete_comment(&self, actor_id: Snowflake, comment_id: Snowflake) -> ServiceResult<()> {
        let comment = self.get_comment_entity(comment_id).await?;
        ensure_comment_author(&comment, actor_id)?;

        self.ctx.comment_repo().delete(comment.id).await?;

        info!(comment_id = %comment.id, "Comment deleted");

        Ok(())
    }

    /// Get comment entity by ID
    #[instrument(skip(self))]
    pub async fn get_comment_entity(&self, comment_id: Snowflake) -> ServiceResult<Comment> {
        self.ctx
            .comment_repo()
            .find_by_id(comment_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Comment", comment_id.to_string()))
    }

    async fn render(&self, comment: Comment) -> ServiceResult<CommentResponse> {
        let author = self.ctx.user_repo().find_by_id(comment.author_id).await?;
        Ok(CommentResponse::from(CommentWithAuthor { comment, author }))
    }
}
