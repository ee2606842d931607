//! PostgreSQL implementation of FeedRepository

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::instrument;

use social_core::entities::{AttachmentRef, Feed};
use social_core::traits::{FeedQuery, FeedRepository, RepoResult};
use social_core::value_objects::Snowflake;

use crate::mappers::{assemble_feed, assemble_feeds};
use crate::models::{FeedAttachmentModel, FeedModel};

use super::error::{feed_not_found, map_db_error};

/// PostgreSQL implementation of FeedRepository
///
/// Attachments live in `feed_attachments`, ordered by `position`.
#[derive(Clone)]
pub struct PgFeedRepository {
    pool: PgPool,
}

impl PgFeedRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_attachments(&self, feed_ids: &[i64]) -> RepoResult<Vec<FeedAttachmentModel>> {
        if feed_ids.is_empty() {
            return Ok(Vec::new());
        }

        sqlx::query_as::<_, FeedAttachmentModel>(
            r"
            SELECT feed_id, position, path
            FROM feed_attachments
            WHERE feed_id = ANY($1)
            ORDER BY feed_id, position
            ",
        )
        .bind(feed_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)
    }
}

async fn insert_attachments(
    tx: &mut Transaction<'_, Postgres>,
    feed_id: Snowflake,
    attachments: &[AttachmentRef],
) -> RepoResult<()> {
    for (position, attachment) in attachments.iter().enumerate() {
        sqlx::query(
            r"
            INSERT INTO feed_attachments (feed_id, position, path)
            VALUES ($1, $2, $3)
            ",
        )
        .bind(feed_id.into_inner())
        .bind(position as i32)
        .bind(attachment.as_str())
        .execute(&mut **tx)
        .await
        .map_err(map_db_error)?;
    }
    Ok(())
}

#[async_trait]
impl FeedRepository for PgFeedRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Feed>> {
        let model = sqlx::query_as::<_, FeedModel>(
            r"
            SELECT id, author_id, content, created_at, updated_at, deleted_at
            FROM feeds
            WHERE id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        let Some(model) = model else {
            return Ok(None);
        };

        let attachments = self.fetch_attachments(&[model.id]).await?;
        Ok(Some(assemble_feed(model, attachments)))
    }

    #[instrument(skip(self))]
    async fn list(&self, query: FeedQuery) -> RepoResult<Vec<Feed>> {
        let limit = query.limit();

        let models = match query.before {
            Some(before) => {
                sqlx::query_as::<_, FeedModel>(
                    r"
                    SELECT id, author_id, content, created_at, updated_at, deleted_at
                    FROM feeds
                    WHERE id < $1 AND deleted_at IS NULL
                    ORDER BY id DESC
                    LIMIT $2
                    ",
                )
                .bind(before.into_inner())
                .bind(limit)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, FeedModel>(
                    r"
                    SELECT id, author_id, content, created_at, updated_at, deleted_at
                    FROM feeds
                    WHERE deleted_at IS NULL
                    ORDER BY id DESC
                    LIMIT $1
                    ",
                )
                .bind(limit)
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(map_db_error)?;

        let ids: Vec<i64> = models.iter().map(|m| m.id).collect();
        let attachments = self.fetch_attachments(&ids).await?;

        Ok(assemble_feeds(models, attachments))
    }

    #[instrument(skip(self, feed), fields(feed_id = %feed.id))]
    async fn create(&self, feed: &Feed) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            r"
            INSERT INTO feeds (id, author_id, content, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(feed.id.into_inner())
        .bind(feed.author_id.into_inner())
        .bind(&feed.content)
        .bind(feed.created_at)
        .bind(feed.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        insert_attachments(&mut tx, feed.id, &feed.attachments).await?;

        tx.commit().await.map_err(map_db_error)?;
        Ok(())
    }

    #[instrument(skip(self, feed), fields(feed_id = %feed.id))]
    async fn update(&self, feed: &Feed) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let result = sqlx::query(
            r"
            UPDATE feeds
            SET content = $2, updated_at = $3
            WHERE id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(feed.id.into_inner())
        .bind(&feed.content)
        .bind(feed.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(feed_not_found(feed.id));
        }

        // rewrite the list so positions stay dense
        sqlx::query(
            r"
            DELETE FROM feed_attachments WHERE feed_id = $1
            ",
        )
        .bind(feed.id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        insert_attachments(&mut tx, feed.id, &feed.attachments).await?;

        tx.commit().await.map_err(map_db_error)?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE feeds
            SET deleted_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(feed_not_found(id));
        }

        Ok(())
    }
}
