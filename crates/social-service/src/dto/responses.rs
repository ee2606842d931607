//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Snowflake IDs are serialized as strings for JavaScript compatibility.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use social_core::ReactionKind;

// ============================================================================
// Auth Responses
// ============================================================================

/// Authentication response with tokens
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: CurrentUserResponse,
}

impl AuthResponse {
    pub fn new(
        access_token: String,
        refresh_token: String,
        expires_in: i64,
        user: CurrentUserResponse,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in,
            user,
        }
    }
}

// ============================================================================
// User Responses
// ============================================================================

/// Public profile
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Current authenticated user (includes private fields)
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Feed Responses
// ============================================================================

/// Feed with everything a timeline needs
#[derive(Debug, Clone, Serialize)]
pub struct FeedResponse {
    pub id: String,
    pub author_id: String,
    /// Absent when the author deactivated their account
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<UserResponse>,
    pub content: String,
    pub attachments: Vec<String>,
    pub comments: Vec<CommentResponse>,
    pub reactions: Vec<ReactionResponse>,
    pub reaction_counts: ReactionCountsResponse,
    /// The caller's own reaction
    #[serde(skip_serializing_if = "Option::is_none")]
    pub my_reaction: Option<ReactionKind>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommentResponse {
    pub id: String,
    pub feed_id: String,
    pub author_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<UserResponse>,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReactionResponse {
    pub user_id: String,
    pub kind: ReactionKind,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReactionCountsResponse {
    pub likes: i64,
    pub dislikes: i64,
}

/// Result of a like/dislike toggle
#[derive(Debug, Clone, Serialize)]
pub struct ReactionToggleResponse {
    pub feed_id: String,
    /// `added`, `switched` or `removed`
    pub action: String,
    /// Reaction held after the toggle, `null` when none
    pub reaction: Option<ReactionKind>,
    pub counts: ReactionCountsResponse,
}

// ============================================================================
// Chat Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ChatroomResponse {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub is_group: bool,
    pub owner_id: String,
    /// Member IDs in join order
    pub member_ids: Vec<String>,
    /// Requested members that could not be resolved (creation only)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped_member_ids: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub id: String,
    pub chatroom_id: String,
    pub author_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<UserResponse>,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment: Option<String>,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

impl ReadinessResponse {
    pub fn ready(database: bool) -> Self {
        let label = |ok: bool| if ok { "healthy" } else { "unhealthy" }.to_string();
        Self {
            status: if database { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: label(database),
            },
        }
    }
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_readiness_labels() {
        let ready = ReadinessResponse::ready(true);
        assert_eq!(ready.status, "ready");
        assert_eq!(ready.checks.database, "healthy");

        let down = ReadinessResponse::ready(false);
        assert_eq!(down.status, "not_ready");
        assert_eq!(down.checks.database, "unhealthy");
    }

    #[test]
    fn test_toggle_response_serializes_null_reaction() {
        let response = ReactionToggleResponse {
            feed_id: "1".to_string(),
            action: "removed".to_string(),
            reaction: None,
            counts: ReactionCountsResponse::default(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert!(json["reaction"].is_null());
        assert_eq!(json["counts"]["likes"], 0);
    }
}
