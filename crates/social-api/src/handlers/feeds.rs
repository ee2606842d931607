//! Feed handlers
//!
//! Feeds are written as multipart forms: a `content` field plus any number
//! of `file` parts, kept in upload order.

use axum::{
    extract::{Path, State},
    Json,
};
use social_service::{FeedRequest, FeedResponse, FeedService};
use validator::Validate;

use crate::extractors::{AuthUser, FeedIdPath, MultipartForm, Pagination};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Field names accepted for feed attachments
const FILE_FIELDS: &[&str] = &["file", "files"];

fn feed_request(mut form: MultipartForm) -> ApiResult<FeedRequest> {
    let request = FeedRequest {
        content: form.text_or_default("content"),
        files: form.take_files(FILE_FIELDS),
    };
    request.validate()?;
    Ok(request)
}

/// List feeds, newest first
///
/// GET /feeds?before=&limit=
pub async fn list_feeds(
    State(state): State<AppState>,
    auth: AuthUser,
    pagination: Pagination,
) -> ApiResult<Json<Vec<FeedResponse>>> {
    let service = FeedService::new(state.service_context());
    let feeds = service.list_feeds(auth.user_id, pagination.feed_query()?).await?;
    Ok(Json(feeds))
}

/// Get a feed
///
/// GET /feeds/{feed_id}
pub async fn get_feed(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<FeedIdPath>,
) -> ApiResult<Json<FeedResponse>> {
    let feed_id = path.feed_id()?;

    let service = FeedService::new(state.service_context());
    Ok(Json(service.get_feed(auth.user_id, feed_id).await?))
}

/// Create a feed
///
/// POST /feeds (multipart `content`, repeated `file`)
pub async fn create_feed(
    State(state): State<AppState>,
    auth: AuthUser,
    form: MultipartForm,
) -> ApiResult<Created<Json<FeedResponse>>> {
    let request = feed_request(form)?;

    let service = FeedService::new(state.service_context());
    let feed = service.create_feed(auth.user_id, request).await?;
    Ok(Created(Json(feed)))
}

/// Update a feed; new files replace all existing attachments
///
/// PUT /feeds/{feed_id} (multipart)
pub async fn update_feed(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<FeedIdPath>,
    form: MultipartForm,
) -> ApiResult<Json<FeedResponse>> {
    let feed_id = path.feed_id()?;
    let request = feed_request(form)?;

    let service = FeedService::new(state.service_context());
    let feed = service.update_feed(auth.user_id, feed_id, request).await?;
    Ok(Json(feed))
}

/// Delete a feed
///
/// DELETE /feeds/{feed_id}
pub async fn delete_feed(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<FeedIdPath>,
) -> ApiResult<NoContent> {
    let feed_id = path.feed_id()?;

    let service = FeedService::new(state.service_context());
    service.delete_feed(auth.user_id, feed_id).await?;
    Ok(NoContent)
}
