//! Error handling utilities for repositories

use social_core::error::DomainError;
use social_core::value_objects::Snowflake;
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Map a unique violation on `users` to the conflicting field
///
/// Falls back to `EmailAlreadyExists` when the constraint name is unavailable.
pub fn map_user_unique_violation(e: SqlxError) -> DomainError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return match db_err.constraint() {
                Some("users_username_key") => DomainError::UsernameAlreadyExists,
                _ => DomainError::EmailAlreadyExists,
            };
        }
    }
    DomainError::DatabaseError(e.to_string())
}

/// Create a "user not found" error
pub fn user_not_found(id: Snowflake) -> DomainError {
    DomainError::UserNotFound(id)
}

/// Create a "feed not found" error
pub fn feed_not_found(id: Snowflake) -> DomainError {
    DomainError::FeedNotFound(id)
}

/// Create a "comment not found" error
pub fn comment_not_found(id: Snowflake) -> DomainError {
    DomainError::CommentNotFound(id)
}

/// Create a "chatroom not found" error
pub fn chatroom_not_found(id: Snowflake) -> DomainError {
    DomainError::ChatroomNotFound(id)
}

/// Create a "message not found" error
pub fn message_not_found(id: Snowflake) -> DomainError {
    DomainError::MessageNotFound(id)
}

/// Convert a slice of IDs into the `BIGINT[]` bind value used with `= ANY($n)`
pub fn id_array(ids: &[Snowflake]) -> Vec<i64> {
    ids.iter().map(|id| id.into_inner()).collect()
}
