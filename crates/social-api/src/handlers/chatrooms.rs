//! Chatroom handlers

use axum::{
    extract::{Path, State},
    Json,
};
use social_service::{ChatroomResponse, ChatroomService, CreateChatroomRequest};

use crate::extractors::{AuthUser, ChatroomIdPath, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Create a direct or group chatroom
///
/// POST /chatrooms
pub async fn create_chatroom(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateChatroomRequest>,
) -> ApiResult<Created<Json<ChatroomResponse>>> {
    let service = ChatroomService::new(state.service_context());
    let room = service.create_chatroom(auth.user_id, request).await?;
    Ok(Created(Json(room)))
}

/// Rooms the caller belongs to
///
/// GET /chatrooms
pub async fn list_chatrooms(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<ChatroomResponse>>> {
    let service = ChatroomService::new(state.service_context());
    Ok(Json(service.list_chatrooms(auth.user_id).await?))
}

/// Delete a chatroom
///
/// DELETE /chatrooms/{chatroom_id}
pub async fn delete_chatroom(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<ChatroomIdPath>,
) -> ApiResult<NoContent> {
    let chatroom_id = path.chatroom_id()?;

    let service = ChatroomService::new(state.service_context());
    service.delete_chatroom(auth.user_id, chatroom_id).await?;
    Ok(NoContent)
}
