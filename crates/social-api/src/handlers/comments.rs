//! Comment handlers

use axum::{
    extract::{Path, State},
    Json,
};
use social_service::{CommentResponse, CommentService, CreateCommentRequest, UpdateCommentRequest};
use validator::Validate;

use crate::extractors::{AuthUser, CommentIdPath, FeedIdPath, MultipartForm, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Comment on a feed
///
/// POST /feeds/{feed_id}/comments (multipart `content`, optional `file`)
pub async fn create_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<FeedIdPath>,
    mut form: MultipartForm,
) -> ApiResult<Created<Json<CommentResponse>>> {
    let feed_id = path.feed_id()?;
    let request = CreateCommentRequest {
        content: form
            .text("content")
            .or_else(|| form.text("comment"))
            .unwrap_or_default()
            .to_string(),
        file: form.take_file(&["file"])?,
    };
    request.validate()?;

    let service = CommentService::new(state.service_context());
    let comment = service.create_comment(auth.user_id, feed_id, request).await?;
    Ok(Created(Json(comment)))
}

/// Edit a comment's text
///
/// PATCH /comments/{comment_id}
pub async fn update_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<CommentIdPath>,
    ValidatedJson(request): ValidatedJson<UpdateCommentRequest>,
) -> ApiResult<Json<CommentResponse>> {
    let comment_id = path.comment_id()?;

    let service = CommentService::new(state.service_context());
    let comment = service.update_comment(auth.user_id, comment_id, request).await?;
    Ok(Json(comment))
}

/// Delete a comment; only its author may
///
/// DELETE /comments/{comment_id}
pub async fn delete_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<CommentIdPath>,
) -> ApiResult<NoContent> {
    let comment_id = path.comment_id()?;

    let service = CommentService::new(state.service_context());
    service.delete_comment(auth.user_id, comment_id).await?;
    Ok(NoContent)
}
