//! PostgreSQL implementation of ChatroomRepository

use async_trait::async_trait;
use chrono::Duration;
use sqlx::PgPool;
use tracing::instrument;

use social_core::entities::Chatroom;
use social_core::traits::{ChatroomRepository, RepoResult};
use social_core::value_objects::Snowflake;

use crate::models::ChatroomModel;

use super::error::{chatroom_not_found, map_db_error};

/// PostgreSQL implementation of ChatroomRepository
///
/// Membership is kept in `chatroom_members`; every member row is inserted in
/// the same transaction as the room.
#[derive(Clone)]
pub struct PgChatroomRepository {
    pool: PgPool,
}

impl PgChatroomRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChatroomRepository for PgChatroomRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Chatroom>> {
        let result = sqlx::query_as::<_, ChatroomModel>(
            r"
            SELECT id, name, is_group, owner_id, created_at, updated_at, deleted_at
            FROM chatrooms
            WHERE id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Chatroom::from))
    }

    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<Chatroom>> {
        let results = sqlx::query_as::<_, ChatroomModel>(
            r"
            SELECT c.id, c.name, c.is_group, c.owner_id, c.created_at, c.updated_at, c.deleted_at
            FROM chatrooms c
            INNER JOIN chatroom_members m ON m.chatroom_id = c.id
            WHERE m.user_id = $1 AND c.deleted_at IS NULL
            ORDER BY c.id DESC
            ",
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Chatroom::from).collect())
    }

    #[instrument(skip(self, room, members), fields(chatroom_id = %room.id, members = members.len()))]
    async fn create(&self, room: &Chatroom, members: &[Snowflake]) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            r"
            INSERT INTO chatrooms (id, name, is_group, owner_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(room.id.into_inner())
        .bind(&room.name)
        .bind(room.is_group)
        .bind(room.owner_id.into_inner())
        .bind(room.created_at)
        .bind(room.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        // Join times step by a microsecond so listings keep owner-then-request order
        let joined = std::iter::once(room.owner_id).chain(members.iter().copied());
        for (position, user_id) in (0_i64..).zip(joined) {
            sqlx::query(
                r"
                INSERT INTO chatroom_members (chatroom_id, user_id, joined_at)
                VALUES ($1, $2, $3)
                ON CONFLICT (chatroom_id, user_id) DO NOTHING
                ",
            )
            .bind(room.id.into_inner())
            .bind(user_id.into_inner())
            .bind(room.created_at + Duration::microseconds(position))
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;
        }

        tx.commit().await.map_err(map_db_error)?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_members(&self, room_id: Snowflake) -> RepoResult<Vec<Snowflake>> {
        let ids = sqlx::query_scalar::<_, i64>(
            r"
            SELECT user_id FROM chatroom_members
            WHERE chatroom_id = $1
            ORDER BY joined_at ASC, user_id ASC
            ",
        )
        .bind(room_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(ids.into_iter().map(Snowflake::new).collect())
    }

    #[instrument(skip(self))]
    async fn is_member(&self, room_id: Snowflake, user_id: Snowflake) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(
                SELECT 1 FROM chatroom_members WHERE chatroom_id = $1 AND user_id = $2
            )
            ",
        )
        .bind(room_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE chatrooms
            SET deleted_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(chatroom_not_found(id));
        }

        Ok(())
    }
}
