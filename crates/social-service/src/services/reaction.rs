//! Reaction service
//!
//! Like/dislike toggles on feeds. Repeating the current reaction removes it,
//! the opposite one replaces it.

use social_core::entities::{Reaction, ReactionKind};
use social_core::Snowflake;
use tracing::{info, instrument};

use crate::dto::{ReactionToggle, ReactionToggleResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Reaction service
pub struct ReactionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReactionService<'a> {
    /// Create a new ReactionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Toggle a like
    pub async fn like(&self, user_id: Snowflake, feed_id: Snowflake) -> ServiceResult<ReactionToggleResponse> {
        self.react(user_id, feed_id, ReactionKind::Like).await
    }

    /// Toggle a dislike
    pub async fn dislike(&self, user_id: Snowflake, feed_id: Snowflake) -> ServiceResult<ReactionToggleResponse> {
        self.react(user_id, feed_id, ReactionKind::Dislike).await
    }

    /// Apply `kind` to the user's reaction on a feed and report the new totals
    #[instrument(skip(self), fields(kind = kind.as_str()))]
    pub async fn react(
        &self,
        user_id: Snowflake,
        feed_id: Snowflake,
        kind: ReactionKind,
    ) -> ServiceResult<ReactionToggleResponse> {
        self.ctx
            .feed_repo()
            .find_by_id(feed_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Feed", feed_id.to_string()))?;

        let proposed = Reaction::new(self.ctx.generate_id(), feed_id, user_id, kind);
        let outcome = self.ctx.reaction_repo().toggle(&proposed).await?;
        let counts = self.ctx.reaction_repo().count_by_feed(feed_id).await?;

        info!(
            feed_id = %feed_id,
            user_id = %user_id,
            action = outcome.action(),
            "Reaction toggled"
        );

        Ok(ReactionToggle { feed_id, outcome, counts }.into())
    }
}
