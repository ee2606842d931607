//! Follow handlers

use axum::{
    extract::{Path, State},
    Json,
};
use social_service::{FollowService, UserResponse};

use crate::extractors::{AuthUser, UserIdPath};
use crate::response::{ApiResult, NoContent};
use crate::state::AppState;

/// Follow a user
///
/// POST /users/{user_id}/follow
pub async fn follow_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<UserIdPath>,
) -> ApiResult<NoContent> {
    let target_id = path.user_id()?;

    let service = FollowService::new(state.service_context());
    service.follow(auth.user_id, target_id).await?;
    Ok(NoContent)
}

/// Unfollow a user; succeeds when no edge exists
///
/// DELETE /users/{user_id}/follow
pub async fn unfollow_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<UserIdPath>,
) -> ApiResult<NoContent> {
    let target_id = path.user_id()?;

    let service = FollowService::new(state.service_context());
    service.unfollow(auth.user_id, target_id).await?;
    Ok(NoContent)
}

/// Users following the caller
///
/// GET /users/@me/followers
pub async fn list_followers(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<UserResponse>>> {
    let service = FollowService::new(state.service_context());
    Ok(Json(service.followers(auth.user_id).await?))
}

/// Users the caller follows
///
/// GET /users/@me/following
pub async fn list_following(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<UserResponse>>> {
    let service = FollowService::new(state.service_context());
    Ok(Json(service.following(auth.user_id).await?))
}
