//! Message handlers

use axum::{
    extract::{Path, State},
    Json,
};
use social_service::{MessageResponse, MessageService, SendMessageRequest};
use validator::Validate;

use crate::extractors::{AuthUser, ChatroomIdPath, MessageIdPath, MultipartForm, Pagination};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Messages in a room, oldest first
///
/// GET /chatrooms/{chatroom_id}/messages?before=&after=&limit=
pub async fn get_messages(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<ChatroomIdPath>,
    pagination: Pagination,
) -> ApiResult<Json<Vec<MessageResponse>>> {
    let chatroom_id = path.chatroom_id()?;

    let service = MessageService::new(state.service_context());
    let messages = service
        .list_messages(auth.user_id, chatroom_id, pagination.message_query())
        .await?;
    Ok(Json(messages))
}

/// Send a message
///
/// POST /chatrooms/{chatroom_id}/messages (multipart `content`, optional `file`)
pub async fn create_message(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<ChatroomIdPath>,
    mut form: MultipartForm,
) -> ApiResult<Created<Json<MessageResponse>>> {
    let chatroom_id = path.chatroom_id()?;
    let request = SendMessageRequest {
        content: form.text_or_default("content"),
        file: form.take_file(&["file"])?,
    };
    request.validate()?;

    let service = MessageService::new(state.service_context());
    let message = service.send_message(auth.user_id, chatroom_id, request).await?;
    Ok(Created(Json(message)))
}

/// Delete a message; only its author may
///
/// DELETE /messages/{message_id}
pub async fn delete_message(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<MessageIdPath>,
) -> ApiResult<NoContent> {
    let message_id = path.message_id()?;

    let service = MessageService::new(state.service_context());
    service.delete_message(auth.user_id, message_id).await?;
    Ok(NoContent)
}
