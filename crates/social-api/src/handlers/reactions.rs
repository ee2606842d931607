//! Reaction handlers
//!
//! Both endpoints toggle: repeating the current reaction clears it.

use axum::{
    extract::{Path, State},
    Json,
};
use social_service::{ReactionService, ReactionToggleResponse};

use crate::extractors::{AuthUser, FeedIdPath};
use crate::response::ApiResult;
use crate::state::AppState;

/// Toggle a like on a feed
///
/// POST /feeds/{feed_id}/like
pub async fn like_feed(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<FeedIdPath>,
) -> ApiResult<Json<ReactionToggleResponse>> {
    let feed_id = path.feed_id()?;

    let service = ReactionService::new(state.service_context());
    Ok(Json(service.like(auth.user_id, feed_id).await?))
}

/// Toggle a dislike on a feed
///
/// POST /feeds/{feed_id}/dislike
pub async fn dislike_feed(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<FeedIdPath>,
) -> ApiResult<Json<ReactionToggleResponse>> {
    let feed_id = path.feed_id()?;

    let service = ReactionService::new(state.service_context());
    Ok(Json(service.dislike(auth.user_id, feed_id).await?))
}
