//! Feed service
//!
//! Posts with ordered attachments. Listings are rendered with their author,
//! comments, reactions and the viewer's own reaction, loaded in batches.

use std::collections::{HashMap, HashSet};

use social_core::entities::{Feed, User};
use social_core::policy::{ensure_content, ensure_feed_author};
use social_core::traits::FeedQuery;
use social_core::Snowflake;
use tracing::{info, instrument};

use crate::dto::{CommentWithAuthor, FeedRequest, FeedResponse, FeedWithDetails};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::files;

/// Feed service
pub struct FeedService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> FeedService<'a> {
    /// Create a new FeedService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// List feeds newest first, as seen by `viewer_id`
    #[instrument(skip(self, query))]
    pub async fn list_feeds(
        &self,
        viewer_id: Snowflake,
        query: FeedQuery,
    ) -> ServiceResult<Vec<FeedResponse>> {
        let feeds = self.ctx.feed_repo().list(query).await?;
        self.render(viewer_id, feeds).await
    }

    /// Get a single feed
    #[instrument(skip(self))]
    pub async fn get_feed(&self, viewer_id: Snowflake, feed_id: Snowflake) -> ServiceResult<FeedResponse> {
        let feed = self.get_feed_entity(feed_id).await?;
        self.render_one(viewer_id, feed).await
    }

    /// Get feed entity by ID
    #[instrument(skip(self))]
    pub async fn get_feed_entity(&self, feed_id: Snowflake) -> ServiceResult<Feed> {
        self.ctx
            .feed_repo()
            .find_by_id(feed_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Feed", feed_id.to_string()))
    }

    /// Create a feed; files are stored in upload order
    #[instrument(skip(self, request), fields(files = request.files.len()))]
    pub async fn create_feed(
        &self,
        author_id: Snowflake,
        request: FeedRequest,
    ) -> ServiceResult<FeedResponse> {
        ensure_content(&request.content)?;

        let attachments = files::store_all(self.ctx, request.files).await?;
        let feed = Feed::new(self.ctx.generate_id(), author_id, request.content, attachments);

        if let Err(e) = self.ctx.feed_repo().create(&feed).await {
            files::discard(self.ctx, &feed.attachments).await;
            return Err(e.into());
        }

        info!(feed_id = %feed.id, author_id = %author_id, "Feed created");

        self.render_one(author_id, feed).await
    }

    /// Edit a feed; new files replace the whole attachment list
    #[instrument(skip(self, request), fields(files = request.files.len()))]
    pub async fn update_feed(
        &self,
        actor_id: Snowflake,
        feed_id: Snowflake,
        request: FeedRequest,
    ) -> ServiceResult<FeedResponse> {
        ensure_content(&request.content)?;
        files::check_sizes(self.ctx, &request.files)?;

        let mut feed = self.get_feed_entity(feed_id).await?;
        ensure_feed_author(&feed, actor_id)?;

        let attachments = files::store_all(self.ctx, request.files).await?;
        feed.edit(request.content, attachments.clone());

        if let Err(e) = self.ctx.feed_repo().update(&feed).await {
            files::discard(self.ctx, &attachments).await;
            return Err(e.into());
        }

        info!(feed_id = %feed.id, replaced_attachments = !attachments.is_empty(), "Feed updated");

        self.render_one(actor_id, feed).await
    }

    /// Soft delete a feed; only its author may
    #[instrument(skip(self))]
    pub async fn delete_feed(&self, actor_id: Snowflake, feed_id: Snowflake) -> ServiceResult<()> {
        let feed = self.get_feed_entity(feed_id).await?;
        ensure_feed_author(&feed, actor_id)?;

        self.ctx.feed_repo().delete(feed.id).await?;

        info!(feed_id = %feed.id, "Feed deleted");

        Ok(())
    }

    async fn render_one(&self, viewer_id: Snowflake, feed: Feed) -> ServiceResult<FeedResponse> {
        let feed_id = feed.id;
        self.render(viewer_id, vec![feed])
            .await?
            .pop()
            .ok_or_else(|| ServiceError::internal(format!("feed {feed_id} vanished while rendering")))
    }

    /// Attach comments, reactions and authors, keeping the order of `feeds`
    async fn render(&self, viewer_id: Snowflake, feeds: Vec<Feed>) -> ServiceResult<Vec<FeedResponse>> {
        if feeds.is_empty() {
            return Ok(Vec::new());
        }

        let feed_ids: Vec<Snowflake> = feeds.iter().map(|f| f.id).collect();
        let comments = self.ctx.comment_repo().find_by_feeds(&feed_ids).await?;
        let reactions = self.ctx.reaction_repo().find_by_feeds(&feed_ids).await?;

        let author_ids: Vec<Snowflake> = feeds
            .iter()
            .map(|f| f.author_id)
            .chain(comments.iter().map(|c| c.author_id))
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let authors: HashMap<Snowflake, User> = self
            .ctx
            .user_repo()
            .find_many(&author_ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();

        let mut comments_by_feed: HashMap<Snowflake, Vec<CommentWithAuthor>> = HashMap::new();
        for comment in comments {
            let author = authors.get(&comment.author_id).cloned();
            comments_by_feed
                .entry(comment.feed_id)
                .or_default()
                .push(CommentWithAuthor { comment, author });
        }

        let mut reactions_by_feed: HashMap<Snowflake, Vec<_>> = HashMap::new();
        for reaction in reactions {
            reactions_by_feed.entry(reaction.feed_id).or_default().push(reaction);
        }

        Ok(feeds
            .into_iter()
            .map(|feed| {
                FeedResponse::from(FeedWithDetails {
                    author: authors.get(&feed.author_id).cloned(),
                    comments: comments_by_feed.remove(&feed.id).unwrap_or_default(),
                    reactions: reactions_by_feed.remove(&feed.id).unwrap_or_default(),
                    viewer_id,
                    feed,
                })
            })
            .collect())
    }
}
