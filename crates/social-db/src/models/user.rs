//! User database model

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

/// Row of the `users` table
///
/// `password_hash` is deliberately not selected into the model.
#[derive(Debug, Clone, FromRow)]
pub struct UserModel {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub display_name: String,
    pub photo: Option<String>,
    pub gender: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl UserModel {
    /// Check if user is deactivated
    #[inline]
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}
