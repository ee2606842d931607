//! Test fixtures and data generators
//!
//! Provides reusable test data for integration tests.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
///
/// Combines the process ID with a counter so reruns against the same
/// database do not collide on usernames.
pub fn unique_suffix() -> String {
    format!("{}x{}", std::process::id(), COUNTER.fetch_add(1, Ordering::SeqCst))
}

/// Registration request
#[derive(Debug, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub display_name: String,
}

impl RegisterRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            username: format!("user{suffix}"),
            email: format!("test{suffix}@example.com"),
            password: "secret123".to_string(),
            display_name: format!("Test User {suffix}"),
        }
    }
}

/// Login request; `login` is an email address or a username
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub login: String,
    pub password: String,
}

impl LoginRequest {
    pub fn by_email(reg: &RegisterRequest) -> Self {
        Self {
            login: reg.email.clone(),
            password: reg.password.clone(),
        }
    }

    pub fn by_username(reg: &RegisterRequest) -> Self {
        Self {
            login: reg.username.clone(),
            password: reg.password.clone(),
        }
    }
}

/// Refresh token request
#[derive(Debug, Serialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

/// Change password request
#[derive(Debug, Serialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// Auth response
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub access_token: String,
    pub refresh_token: String,
}

/// User response; `email` only appears on the caller's own profile
#[derive(Debug, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub display_name: String,
    pub email: Option<String>,
    pub photo: Option<String>,
}

/// Feed response
#[derive(Debug, Deserialize)]
pub struct FeedResponse {
    pub id: String,
    pub author_id: String,
    pub content: String,
    pub attachments: Vec<String>,
    pub comments: Vec<CommentResponse>,
    pub reaction_counts: ReactionCounts,
    pub my_reaction: Option<String>,
}

/// Comment response
#[derive(Debug, Deserialize)]
pub struct CommentResponse {
    pub id: String,
    pub feed_id: String,
    pub author_id: String,
    pub content: String,
    pub attachment: Option<String>,
}

/// Comment edit request
#[derive(Debug, Serialize)]
pub struct UpdateCommentRequest {
    pub content: String,
}

/// Like and dislike totals
#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct ReactionCounts {
    pub likes: i64,
    pub dislikes: i64,
}

/// Result of a like/dislike toggle
#[derive(Debug, Deserialize)]
pub struct ReactionToggleResponse {
    pub action: String,
    pub reaction: Option<String>,
    pub counts: ReactionCounts,
}

/// Create chatroom request
#[derive(Debug, Serialize)]
pub struct CreateChatroomRequest {
    pub is_group: bool,
    pub name: Option<String>,
    pub member_ids: Vec<String>,
}

impl CreateChatroomRequest {
    pub fn direct(member_ids: Vec<String>) -> Self {
        Self {
            is_group: false,
            name: None,
            member_ids,
        }
    }

    pub fn group(member_ids: Vec<String>) -> Self {
        Self {
            is_group: true,
            name: Some(format!("Room {}", unique_suffix())),
            member_ids,
        }
    }
}

/// Chatroom response
#[derive(Debug, Deserialize)]
pub struct ChatroomResponse {
    pub id: String,
    pub name: Option<String>,
    pub is_group: bool,
    pub owner_id: String,
    pub member_ids: Vec<String>,
    #[serde(default)]
    pub skipped_member_ids: Vec<String>,
}

/// Message response
#[derive(Debug, Deserialize)]
pub struct MessageResponse {
    pub id: String,
    pub chatroom_id: String,
    pub author_id: String,
    pub content: String,
    pub attachment: Option<String>,
}

/// Error response body
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}
