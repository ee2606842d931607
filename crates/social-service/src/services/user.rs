//! User service
//!
//! Handles profile reads and updates, password changes, and deactivation.

use social_common::auth::validate_password_strength;
use social_core::entities::{ProfileChanges, User};
use social_core::{DomainError, Snowflake};
use tracing::{info, instrument, warn};

use crate::dto::{
    parse_birth_date, ChangePasswordRequest, CurrentUserResponse, UpdateProfileRequest,
    UserResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::files;

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Get user by ID (public profile)
    #[instrument(skip(self))]
    pub async fn get_user(&self, user_id: Snowflake) -> ServiceResult<UserResponse> {
        let user = self.get_user_entity(user_id).await?;
        Ok(UserResponse::from(&user))
    }

    /// Get current authenticated user (full profile)
    #[instrument(skip(self))]
    pub async fn get_current_user(&self, user_id: Snowflake) -> ServiceResult<CurrentUserResponse> {
        let user = self.get_user_entity(user_id).await?;
        Ok(CurrentUserResponse::from(&user))
    }

    /// Get user entity by ID
    #[instrument(skip(self))]
    pub async fn get_user_entity(&self, user_id: Snowflake) -> ServiceResult<User> {
        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))
    }

    /// List every active user
    #[instrument(skip(self))]
    pub async fn list_users(&self) -> ServiceResult<Vec<UserResponse>> {
        let users = self.ctx.user_repo().find_all().await?;
        Ok(users.iter().map(UserResponse::from).collect())
    }

    /// Apply a partial profile update, optionally replacing the photo
    #[instrument(skip(self, request))]
    pub async fn update_profile(
        &self,
        user_id: Snowflake,
        request: UpdateProfileRequest,
    ) -> ServiceResult<CurrentUserResponse> {
        let mut user = self.get_user_entity(user_id).await?;

        let birth_date = parse_birth_date(request.birth_date.as_deref())?;
        let username = non_blank(request.username);
        let email = non_blank(request.email).map(|e| e.to_lowercase());

        if let Some(username) = username.as_deref() {
            if username != user.username
                && self.ctx.user_repo().username_exists(username).await?
            {
                return Err(DomainError::UsernameAlreadyExists.into());
            }
        }
        if let Some(email) = email.as_deref() {
            if email != user.email && self.ctx.user_repo().email_exists(email).await? {
                return Err(DomainError::EmailAlreadyExists.into());
            }
        }

        let new_photo = files::store_one(self.ctx, request.photo).await?;
        let old_photo = user.photo.clone();

        let changed = user.apply_profile(ProfileChanges {
            display_name: non_blank(request.display_name),
            username,
            email,
            gender: non_blank(request.gender),
            birth_date,
            photo: new_photo.clone(),
        });

        if !changed {
            return Ok(CurrentUserResponse::from(&user));
        }

        if let Err(e) = self.ctx.user_repo().update(&user).await {
            if let Some(photo) = &new_photo {
                files::discard(self.ctx, std::slice::from_ref(photo)).await;
            }
            return Err(e.into());
        }

        // The shared default photo is never the user's to delete
        if let (Some(old), Some(new)) = (&old_photo, &new_photo) {
            if old != new && self.ctx.default_photo() != Some(old) {
                files::discard(self.ctx, std::slice::from_ref(old)).await;
            }
        }

        info!(user_id = %user.id, "User profile updated");

        Ok(CurrentUserResponse::from(&user))
    }

    /// Change password after verifying the current one
    #[instrument(skip(self, request))]
    pub async fn change_password(
        &self,
        user_id: Snowflake,
        request: ChangePasswordRequest,
    ) -> ServiceResult<()> {
        validate_password_strength(&request.new_password)?;

        let current_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))?;

        if !self.ctx.hasher().verify(&request.current_password, &current_hash)? {
            warn!(user_id = %user_id, "Password change rejected: wrong current password");
            return Err(ServiceError::invalid_credentials());
        }

        let new_hash = self.ctx.hasher().hash(&request.new_password)?;
        self.ctx.user_repo().update_password(user_id, &new_hash).await?;

        info!(user_id = %user_id, "Password changed");

        Ok(())
    }

    /// Soft delete the account; its tokens stop authenticating
    #[instrument(skip(self))]
    pub async fn deactivate(&self, user_id: Snowflake) -> ServiceResult<()> {
        let user = self.get_user_entity(user_id).await?;
        self.ctx.user_repo().delete(user.id).await?;

        info!(user_id = %user.id, "User deactivated");

        Ok(())
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
