//! PostgreSQL implementation of MessageRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use social_core::entities::Message;
use social_core::traits::{MessageQuery, MessageRepository, RepoResult};
use social_core::value_objects::Snowflake;

use crate::models::MessageModel;

use super::error::{map_db_error, message_not_found};

/// PostgreSQL implementation of MessageRepository
#[derive(Clone)]
pub struct PgMessageRepository {
    pool: PgPool,
}

impl PgMessageRepository {
    /// Create a new PgMessageRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageRepository for PgMessageRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Message>> {
        let result = sqlx::query_as::<_, MessageModel>(
            r"
            SELECT id, chatroom_id, author_id, content, attachment, created_at, deleted_at
            FROM messages
            WHERE id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Message::from))
    }

    #[instrument(skip(self))]
    async fn find_by_chatroom(
        &self,
        chatroom_id: Snowflake,
        query: MessageQuery,
    ) -> RepoResult<Vec<Message>> {
        let limit = query.limit();

        let (results, descending) = match (query.before, query.after) {
            (Some(before), None) => {
                // Page of older messages (scrolling up)
                let rows = sqlx::query_as::<_, MessageModel>(
                    r"
                    SELECT id, chatroom_id, author_id, content, attachment, created_at, deleted_at
                    FROM messages
                    WHERE chatroom_id = $1 AND id < $2 AND deleted_at IS NULL
                    ORDER BY id DESC
                    LIMIT $3
                    ",
                )
                .bind(chatroom_id.into_inner())
                .bind(before.into_inner())
                .bind(limit)
                .fetch_all(&self.pool)
                .await;
                (rows, true)
            }
            (None, Some(after)) => {
                // Page of newer messages (scrolling down)
                let rows = sqlx::query_as::<_, MessageModel>(
                    r"
                    SELECT id, chatroom_id, author_id, content, attachment, created_at, deleted_at
                    FROM messages
                    WHERE chatroom_id = $1 AND id > $2 AND deleted_at IS NULL
                    ORDER BY id ASC
                    LIMIT $3
                    ",
                )
                .bind(chatroom_id.into_inner())
                .bind(after.into_inner())
                .bind(limit)
                .fetch_all(&self.pool)
                .await;
                (rows, false)
            }
            _ => {
                // Latest page (no cursor)
                let rows = sqlx::query_as::<_, MessageModel>(
                    r"
                    SELECT id, chatroom_id, author_id, content, attachment, created_at, deleted_at
                    FROM messages
                    WHERE chatroom_id = $1 AND deleted_at IS NULL
                    ORDER BY id DESC
                    LIMIT $2
                    ",
                )
                .bind(chatroom_id.into_inner())
                .bind(limit)
                .fetch_all(&self.pool)
                .await;
                (rows, true)
            }
        };

        let mut results = results.map_err(map_db_error)?;
        if descending {
            results.reverse();
        }

        Ok(results.into_iter().map(Message::from).collect())
    }

    #[instrument(skip(self, message), fields(message_id = %message.id))]
    async fn create(&self, message: &Message) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO messages (id, chatroom_id, author_id, content, attachment, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(message.id.into_inner())
        .bind(message.chatroom_id.into_inner())
        .bind(message.author_id.into_inner())
        .bind(&message.content)
        .bind(message.attachment.as_ref().map(|a| a.as_str()))
        .bind(message.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE messages
            SET deleted_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(message_not_found(id));
        }

        Ok(())
    }
}
