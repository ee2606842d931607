//! User handlers
//!
//! Endpoints for the caller's own profile, password and account, plus
//! public user lookups.

use axum::{
    extract::{Path, State},
    Json,
};
use social_service::{
    ChangePasswordRequest, CurrentUserResponse, UpdateProfileRequest, UserResponse, UserService,
};
use validator::Validate;

use crate::extractors::{AuthUser, MultipartForm, UserIdPath, ValidatedJson};
use crate::response::{ApiResult, NoContent};
use crate::state::AppState;

/// Get current user
///
/// GET /users/@me
pub async fn get_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<CurrentUserResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.get_current_user(auth.user_id).await?;
    Ok(Json(response))
}

/// Update current user's profile
///
/// PATCH /users/@me (multipart, optional `photo`)
pub async fn update_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
    mut form: MultipartForm,
) -> ApiResult<Json<CurrentUserResponse>> {
    let request = UpdateProfileRequest {
        display_name: form.non_blank("display_name").or_else(|| form.non_blank("fullname")),
        username: form.non_blank("username"),
        email: form.non_blank("email"),
        gender: form.non_blank("gender"),
        birth_date: form.non_blank("birth_date"),
        photo: form.take_file(&["photo"])?,
    };
    request.validate()?;

    let service = UserService::new(state.service_context());
    let response = service.update_profile(auth.user_id, request).await?;
    Ok(Json(response))
}

/// Change current user's password
///
/// PUT /users/@me/password
pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<ChangePasswordRequest>,
) -> ApiResult<NoContent> {
    let service = UserService::new(state.service_context());
    service.change_password(auth.user_id, request).await?;
    Ok(NoContent)
}

/// Deactivate current user's account
///
/// DELETE /users/@me
pub async fn deactivate_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<NoContent> {
    let service = UserService::new(state.service_context());
    service.deactivate(auth.user_id).await?;
    Ok(NoContent)
}

/// List all active users
///
/// GET /users
pub async fn list_users(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> ApiResult<Json<Vec<UserResponse>>> {
    let service = UserService::new(state.service_context());
    let users = service.list_users().await?;
    Ok(Json(users))
}

/// Get user by ID (public profile)
///
/// GET /users/{user_id}
pub async fn get_user(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(path): Path<UserIdPath>,
) -> ApiResult<Json<UserResponse>> {
    let user_id = path.user_id()?;

    let service = UserService::new(state.service_context());
    let response = service.get_user(user_id).await?;
    Ok(Json(response))
}
