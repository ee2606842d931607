//! Follow service
//!
//! Maintains the directed follower graph between users.

use social_core::entities::Follow;
use social_core::policy::ensure_not_self_follow;
use social_core::Snowflake;
use tracing::{debug, info, instrument};

use crate::dto::UserResponse;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Follow service
pub struct FollowService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> FollowService<'a> {
    /// Create a new FollowService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Follow another active user
    #[instrument(skip(self))]
    pub async fn follow(&self, follower_id: Snowflake, target_id: Snowflake) -> ServiceResult<()> {
        ensure_not_self_follow(follower_id, target_id)?;

        self.ctx
            .user_repo()
            .find_by_id(target_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", target_id.to_string()))?;

        // the insert itself detects a duplicate edge
        self.ctx
            .follow_repo()
            .create(&Follow::new(follower_id, target_id))
            .await?;

        info!(follower_id = %follower_id, followed_id = %target_id, "User followed");

        Ok(())
    }

    /// Stop following a user; a missing edge is not an error
    #[instrument(skip(self))]
    pub async fn unfollow(&self, follower_id: Snowflake, target_id: Snowflake) -> ServiceResult<()> {
        let removed = self.ctx.follow_repo().delete(follower_id, target_id).await?;

        if removed {
            info!(follower_id = %follower_id, followed_id = %target_id, "User unfollowed");
        } else {
            debug!(follower_id = %follower_id, followed_id = %target_id, "Unfollow without edge");
        }

        Ok(())
    }

    /// Active users following `user_id`
    #[instrument(skip(self))]
    pub async fn followers(&self, user_id: Snowflake) -> ServiceResult<Vec<UserResponse>> {
        let users = self.ctx.follow_repo().find_followers(user_id).await?;
        Ok(users.iter().map(UserResponse::from).collect())
    }

    /// Active users `user_id` follows
    #[instrument(skip(self))]
    pub async fn following(&self, user_id: Snowflake) -> ServiceResult<Vec<UserResponse>> {
        let users = self.ctx.follow_repo().find_following(user_id).await?;
        Ok(users.iter().map(UserResponse::from).collect())
    }
}
