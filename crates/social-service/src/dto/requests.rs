//! Request DTOs for API endpoints
//!
//! JSON bodies implement `Deserialize` and `Validate`. Requests that carry
//! files are assembled from multipart forms by the API layer; their file
//! fields are skipped by serde.

use chrono::NaiveDate;
use serde::Deserialize;
use social_core::{FileUpload, Snowflake};
use validator::Validate;

use crate::services::{ServiceError, ServiceResult};

/// Accepted format for birth dates
pub const BIRTH_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse an optional `YYYY-MM-DD` string; blank counts as absent
pub fn parse_birth_date(value: Option<&str>) -> ServiceResult<Option<NaiveDate>> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => NaiveDate::parse_from_str(raw, BIRTH_DATE_FORMAT)
            .map(Some)
            .map_err(|_| ServiceError::validation("birth_date must use the YYYY-MM-DD format")),
    }
}

// ============================================================================
// Auth Requests
// ============================================================================

/// User registration request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 32, message = "Username must be 3-32 characters"))]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 6, max = 128, message = "Password must be 6-128 characters"))]
    pub password: String,

    #[validate(length(min = 1, max = 100, message = "Display name must be 1-100 characters"))]
    #[serde(alias = "fullname")]
    pub display_name: String,

    #[validate(length(max = 20, message = "Gender must be at most 20 characters"))]
    pub gender: Option<String>,

    /// `YYYY-MM-DD`
    pub birth_date: Option<String>,
}

/// Login request; `login` is an email address or a username
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Login is required"))]
    #[serde(alias = "email", alias = "username")]
    pub login: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Token refresh request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

// ============================================================================
// User Requests
// ============================================================================

/// Partial profile update, sent as a multipart form
///
/// Blank text fields are treated as absent.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 100, message = "Display name must be 1-100 characters"))]
    pub display_name: Option<String>,

    #[validate(length(min = 3, max = 32, message = "Username must be 3-32 characters"))]
    pub username: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    #[validate(length(max = 20, message = "Gender must be at most 20 characters"))]
    pub gender: Option<String>,

    /// `YYYY-MM-DD`
    pub birth_date: Option<String>,

    #[serde(skip)]
    pub photo: Option<FileUpload>,
}

/// Change password request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "Current password is required"))]
    #[serde(alias = "old_password")]
    pub current_password: String,

    #[validate(length(min = 6, max = 128, message = "Password must be 6-128 characters"))]
    pub new_password: String,
}

// ============================================================================
// Feed Requests
// ============================================================================

/// Create or update a feed; `files` keep their upload order
#[derive(Debug, Clone, Default, Validate)]
pub struct FeedRequest {
    #[validate(length(min = 1, max = 5000, message = "Content must be 1-5000 characters"))]
    pub content: String,

    pub files: Vec<FileUpload>,
}

/// Create a comment with an optional attachment
#[derive(Debug, Clone, Default, Validate)]
pub struct CreateCommentRequest {
    #[validate(length(min = 1, max = 2000, message = "Comment must be 1-2000 characters"))]
    pub content: String,

    pub file: Option<FileUpload>,
}

/// Edit a comment's text
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateCommentRequest {
    #[validate(length(min = 1, max = 2000, message = "Comment must be 1-2000 characters"))]
    #[serde(alias = "comment")]
    pub content: String,
}

// ============================================================================
// Chat Requests
// ============================================================================

/// Create a direct or group chatroom
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateChatroomRequest {
    #[serde(default)]
    pub is_group: bool,

    #[validate(length(max = 100, message = "Chatroom name must be at most 100 characters"))]
    pub name: Option<String>,

    /// Members besides the creator
    #[validate(length(max = 100, message = "At most 100 members can be added at once"))]
    #[serde(default, alias = "user_ids")]
    pub member_ids: Vec<Snowflake>,
}

/// Send a message with an optional attachment
#[derive(Debug, Clone, Default, Validate)]
pub struct SendMessageRequest {
    #[validate(length(min = 1, max = 2000, message = "Message must be 1-2000 characters"))]
    pub content: String,

    pub file: Option<FileUpload>,
}
