//! Authentication service
//!
//! Handles user registration, login, token refresh, and bearer-token
//! resolution for the API's `AuthUser` extractor.

use social_common::auth::validate_password_strength;
use social_common::AppError;
use social_core::entities::User;
use social_core::{DomainError, Snowflake};
use tracing::{info, instrument, warn};

use crate::dto::{parse_birth_date, AuthResponse, CurrentUserResponse, LoginRequest, RefreshTokenRequest, RegisterRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new user
    #[instrument(skip(self, request), fields(username = %request.username, email = %request.email))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<AuthResponse> {
        validate_password_strength(&request.password)?;
        let birth_date = parse_birth_date(request.birth_date.as_deref())?;

        let username = request.username.trim().to_string();
        let email = request.email.trim().to_lowercase();

        // Advisory only; the unique constraints decide under concurrency
        if self.ctx.user_repo().email_exists(&email).await? {
            return Err(DomainError::EmailAlreadyExists.into());
        }
        if self.ctx.user_repo().username_exists(&username).await? {
            return Err(DomainError::UsernameAlreadyExists.into());
        }

        let password_hash = self.ctx.hasher().hash(&request.password)?;

        let mut user = User::new(
            self.ctx.generate_id(),
            username,
            email,
            request.display_name.trim().to_string(),
        )
        .with_photo(self.ctx.default_photo().cloned());
        user.gender = request.gender.filter(|g| !g.trim().is_empty());
        user.birth_date = birth_date;

        self.ctx.user_repo().create(&user, &password_hash).await?;

        info!(user_id = %user.id, "User registered successfully");

        self.issue_tokens(&user)
    }

    /// Login with email or username and password
    #[instrument(skip(self, request), fields(login = %request.login))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<AuthResponse> {
        let login = request.login.trim();
        let user = self
            .ctx
            .user_repo()
            .find_by_login(login)
            .await?
            .ok_or_else(|| {
                warn!(login = %login, "Login failed: user not found");
                ServiceError::invalid_credentials()
            })?;

        let password_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %user.id, "Login failed: no password hash");
                ServiceError::invalid_credentials()
            })?;

        if !self.ctx.hasher().verify(&request.password, &password_hash)? {
            warn!(user_id = %user.id, "Login failed: invalid password");
            return Err(ServiceError::invalid_credentials());
        }

        info!(user_id = %user.id, "User logged in successfully");

        self.issue_tokens(&user)
    }

    /// Exchange a refresh token for a new token pair
    #[instrument(skip(self, request))]
    pub async fn refresh_tokens(&self, request: RefreshTokenRequest) -> ServiceResult<AuthResponse> {
        let claims = self
            .ctx
            .jwt_service()
            .validate_refresh_token(&request.refresh_token)?;
        let user_id = claims.user_id()?;

        // tokens of deactivated accounts die with the account
        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(ServiceError::App(AppError::InvalidToken))?;

        info!(user_id = %user.id, "Tokens refreshed successfully");

        self.issue_tokens(&user)
    }

    /// Validate an access token and return the user ID
    #[instrument(skip(self, token))]
    pub fn validate_token(&self, token: &str) -> ServiceResult<Snowflake> {
        let claims = self.ctx.jwt_service().validate_access_token(token)?;
        Ok(claims.user_id()?)
    }

    /// Resolve an access token to its active user
    ///
    /// A valid token of a deactivated account is reported as `InvalidToken`.
    #[instrument(skip(self, token))]
    pub async fn authenticate(&self, token: &str) -> ServiceResult<User> {
        let user_id = self.validate_token(token)?;

        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(ServiceError::App(AppError::InvalidToken))
    }

    fn issue_tokens(&self, user: &User) -> ServiceResult<AuthResponse> {
        let token_pair = self.ctx.jwt_service().generate_token_pair(user.id)?;

        Ok(AuthResponse::new(
            token_pair.access_token,
            token_pair.refresh_token,
            token_pair.expires_in,
            CurrentUserResponse::from(user),
        ))
    }
}
