//! PostgreSQL implementation of FollowRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use social_core::entities::{Follow, User};
use social_core::error::DomainError;
use social_core::traits::{FollowRepository, RepoResult};
use social_core::value_objects::Snowflake;

use crate::models::UserModel;

use super::error::map_db_error;

/// PostgreSQL implementation of FollowRepository
#[derive(Clone)]
pub struct PgFollowRepository {
    pool: PgPool,
}

impl PgFollowRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FollowRepository for PgFollowRepository {
    #[instrument(skip(self))]
    async fn create(&self, follow: &Follow) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            INSERT INTO follows (follower_id, followed_id, created_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (follower_id, followed_id) DO NOTHING
            ",
        )
        .bind(follow.follower_id.into_inner())
        .bind(follow.followed_id.into_inner())
        .bind(follow.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::AlreadyFollowing);
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, follower_id: Snowflake, followed_id: Snowflake) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            DELETE FROM follows
            WHERE follower_id = $1 AND followed_id = $2
            ",
        )
        .bind(follower_id.into_inner())
        .bind(followed_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn exists(&self, follower_id: Snowflake, followed_id: Snowflake) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(SELECT 1 FROM follows WHERE follower_id = $1 AND followed_id = $2)
            ",
        )
        .bind(follower_id.into_inner())
        .bind(followed_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn find_followers(&self, user_id: Snowflake) -> RepoResult<Vec<User>> {
        let results = sqlx::query_as::<_, UserModel>(
            r"
            SELECT u.id, u.username, u.email, u.display_name, u.photo, u.gender, u.birth_date,
                   u.created_at, u.updated_at, u.deleted_at
            FROM follows f
            INNER JOIN users u ON u.id = f.follower_id
            WHERE f.followed_id = $1 AND u.deleted_at IS NULL
            ORDER BY f.created_at ASC
            ",
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(User::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_following(&self, user_id: Snowflake) -> RepoResult<Vec<User>> {
        let results = sqlx::query_as::<_, UserModel>(
            r"
            SELECT u.id, u.username, u.email, u.display_name, u.photo, u.gender, u.birth_date,
                   u.created_at, u.updated_at, u.deleted_at
            FROM follows f
            INNER JOIN users u ON u.id = f.followed_id
            WHERE f.follower_id = $1 AND u.deleted_at IS NULL
            ORDER BY f.created_at ASC
            ",
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(User::from).collect())
    }
}
