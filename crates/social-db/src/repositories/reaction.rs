//! PostgreSQL implementation of ReactionRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use social_core::entities::{
    Reaction, ReactionCounts, ReactionKind, ReactionOutcome, ReactionTransition,
};
use social_core::error::DomainError;
use social_core::traits::{ReactionRepository, RepoResult};
use social_core::value_objects::Snowflake;

use crate::models::{ReactionCountModel, ReactionModel};

use super::error::{id_array, map_db_error};

/// Attempts before giving up on a row that keeps disappearing under us
const TOGGLE_ATTEMPTS: usize = 3;

/// PostgreSQL implementation of ReactionRepository
#[derive(Clone)]
pub struct PgReactionRepository {
    pool: PgPool,
}

impl PgReactionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReactionRepository for PgReactionRepository {
    #[instrument(skip(self))]
    async fn find(&self, feed_id: Snowflake, user_id: Snowflake) -> RepoResult<Option<Reaction>> {
        let result = sqlx::query_as::<_, ReactionModel>(
            r"
            SELECT id, feed_id, user_id, kind, created_at
            FROM feed_reactions
            WHERE feed_id = $1 AND user_id = $2
            ",
        )
        .bind(feed_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Reaction::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_feeds(&self, feed_ids: &[Snowflake]) -> RepoResult<Vec<Reaction>> {
        if feed_ids.is_empty() {
            return Ok(Vec::new());
        }

        let results = sqlx::query_as::<_, ReactionModel>(
            r"
            SELECT id, feed_id, user_id, kind, created_at
            FROM feed_reactions
            WHERE feed_id = ANY($1)
            ORDER BY id ASC
            ",
        )
        .bind(id_array(feed_ids))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(Reaction::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn count_by_feed(&self, feed_id: Snowflake) -> RepoResult<ReactionCounts> {
        let counts = sqlx::query_as::<_, ReactionCountModel>(
            r"
            SELECT COUNT(*) FILTER (WHERE kind = 'like')    AS likes,
                   COUNT(*) FILTER (WHERE kind = 'dislike') AS dislikes
            FROM feed_reactions
            WHERE feed_id = $1
            ",
        )
        .bind(feed_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(counts.into())
    }

    #[instrument(skip(self, proposed), fields(feed_id = %proposed.feed_id, user_id = %proposed.user_id, kind = %proposed.kind))]
    async fn toggle(&self, proposed: &Reaction) -> RepoResult<ReactionOutcome> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        for attempt in 1..=TOGGLE_ATTEMPTS {
            // the unique (feed_id, user_id) constraint serializes concurrent first reactions
            let inserted = sqlx::query_scalar::<_, i64>(
                r"
                INSERT INTO feed_reactions (id, feed_id, user_id, kind, created_at)
                VALUES ($1, $2, $3, $4, $5)
                ON CONFLICT (feed_id, user_id) DO NOTHING
                RETURNING id
                ",
            )
            .bind(proposed.id.into_inner())
            .bind(proposed.feed_id.into_inner())
            .bind(proposed.user_id.into_inner())
            .bind(proposed.kind.as_str())
            .bind(proposed.created_at)
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_db_error)?;

            if inserted.is_some() {
                tx.commit().await.map_err(map_db_error)?;
                return Ok(ReactionTransition::Insert(proposed.kind).outcome(None));
            }

            let current = sqlx::query_scalar::<_, String>(
                r"
                SELECT kind FROM feed_reactions
                WHERE feed_id = $1 AND user_id = $2
                FOR UPDATE
                ",
            )
            .bind(proposed.feed_id.into_inner())
            .bind(proposed.user_id.into_inner())
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_db_error)?;

            let Some(current) = current else {
                debug!(attempt, "Reaction row vanished between insert and lock, retrying");
                continue;
            };
            let current: ReactionKind = current.parse()?;

            let transition = ReactionTransition::resolve(Some(current), proposed.kind);
            match transition {
                ReactionTransition::Delete => {
                    sqlx::query(
                        r"
                        DELETE FROM feed_reactions WHERE feed_id = $1 AND user_id = $2
                        ",
                    )
                    .bind(proposed.feed_id.into_inner())
                    .bind(proposed.user_id.into_inner())
                    .execute(&mut *tx)
                    .await
                    .map_err(map_db_error)?;
                }
                ReactionTransition::Update(kind) | ReactionTransition::Insert(kind) => {
                    sqlx::query(
                        r"
                        UPDATE feed_reactions SET kind = $3
                        WHERE feed_id = $1 AND user_id = $2
                        ",
                    )
                    .bind(proposed.feed_id.into_inner())
                    .bind(proposed.user_id.into_inner())
                    .bind(kind.as_str())
                    .execute(&mut *tx)
                    .await
                    .map_err(map_db_error)?;
                }
            }

            tx.commit().await.map_err(map_db_error)?;
            return Ok(transition.outcome(Some(current)));
        }

        Err(DomainError::DatabaseError(
            "reaction toggle did not converge".to_string(),
        ))
    }
}
