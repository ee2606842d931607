//! Service context - dependency container for services
//!
//! Holds every port the services need. Each one is injected as a trait
//! object so tests can swap PostgreSQL for the in-memory store.

use std::sync::Arc;

use social_common::auth::JwtService;
use social_core::traits::{
    ChatroomRepository, CommentRepository, CredentialHasher, FeedRepository, FileStore,
    FollowRepository, MessageRepository, ReactionRepository, UserRepository,
};
use social_core::{AttachmentRef, Snowflake, SnowflakeGenerator};

use super::error::{ServiceError, ServiceResult};

/// Upload limit used when the builder is not given one (10 MiB)
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    user_repo: Arc<dyn UserRepository>,
    follow_repo: Arc<dyn FollowRepository>,
    feed_repo: Arc<dyn FeedRepository>,
    comment_repo: Arc<dyn CommentRepository>,
    reaction_repo: Arc<dyn ReactionRepository>,
    chatroom_repo: Arc<dyn ChatroomRepository>,
    message_repo: Arc<dyn MessageRepository>,

    // Collaborators
    file_store: Arc<dyn FileStore>,
    hasher: Arc<dyn CredentialHasher>,
    jwt_service: Arc<JwtService>,
    snowflake_generator: Arc<SnowflakeGenerator>,

    // Upload policy
    max_file_size: u64,
    default_photo: Option<AttachmentRef>,
}

impl ServiceContext {
    // === Repositories ===

    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    pub fn follow_repo(&self) -> &dyn FollowRepository {
        self.follow_repo.as_ref()
    }

    pub fn feed_repo(&self) -> &dyn FeedRepository {
        self.feed_repo.as_ref()
    }

    pub fn comment_repo(&self) -> &dyn CommentRepository {
        self.comment_repo.as_ref()
    }

    pub fn reaction_repo(&self) -> &dyn ReactionRepository {
        self.reaction_repo.as_ref()
    }

    pub fn chatroom_repo(&self) -> &dyn ChatroomRepository {
        self.chatroom_repo.as_ref()
    }

    pub fn message_repo(&self) -> &dyn MessageRepository {
        self.message_repo.as_ref()
    }

    // === Collaborators ===

    /// Get the attachment file store
    pub fn file_store(&self) -> &dyn FileStore {
        self.file_store.as_ref()
    }

    /// Get the credential hasher
    pub fn hasher(&self) -> &dyn CredentialHasher {
        self.hasher.as_ref()
    }

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    /// Get the snowflake ID generator
    pub fn snowflake_generator(&self) -> &SnowflakeGenerator {
        self.snowflake_generator.as_ref()
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> Snowflake {
        self.snowflake_generator.generate()
    }

    // === Upload policy ===

    /// Largest accepted upload in bytes
    pub fn max_file_size(&self) -> u64 {
        self.max_file_size
    }

    /// Photo reference assigned to new accounts
    pub fn default_photo(&self) -> Option<&AttachmentRef> {
        self.default_photo.as_ref()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("jwt_service", &self.jwt_service)
            .field("max_file_size", &self.max_file_size)
            .field("default_photo", &self.default_photo)
            .finish()
    }
}

/// Builder for creating ServiceContext
#[derive(Default)]
pub struct ServiceContextBuilder {
    user_repo: Option<Arc<dyn UserRepository>>,
    follow_repo: Option<Arc<dyn FollowRepository>>,
    feed_repo: Option<Arc<dyn FeedRepository>>,
    comment_repo: Option<Arc<dyn CommentRepository>>,
    reaction_repo: Option<Arc<dyn ReactionRepository>>,
    chatroom_repo: Option<Arc<dyn ChatroomRepository>>,
    message_repo: Option<Arc<dyn MessageRepository>>,
    file_store: Option<Arc<dyn FileStore>>,
    hasher: Option<Arc<dyn CredentialHasher>>,
    jwt_service: Option<Arc<JwtService>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
    max_file_size: Option<u64>,
    default_photo: Option<AttachmentRef>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn follow_repo(mut self, repo: Arc<dyn FollowRepository>) -> Self {
        self.follow_repo = Some(repo);
        self
    }

    pub fn feed_repo(mut self, repo: Arc<dyn FeedRepository>) -> Self {
        self.feed_repo = Some(repo);
        self
    }

    pub fn comment_repo(mut self, repo: Arc<dyn CommentRepository>) -> Self {
        self.comment_repo = Some(repo);
        self
    }

    pub fn reaction_repo(mut self, repo: Arc<dyn ReactionRepository>) -> Self {
        self.reaction_repo = Some(repo);
        self
    }

    pub fn chatroom_repo(mut self, repo: Arc<dyn ChatroomRepository>) -> Self {
        self.chatroom_repo = Some(repo);
        self
    }

    pub fn message_repo(mut self, repo: Arc<dyn MessageRepository>) -> Self {
        self.message_repo = Some(repo);
        self
    }

    pub fn file_store(mut self, store: Arc<dyn FileStore>) -> Self {
        self.file_store = Some(store);
        self
    }

    pub fn hasher(mut self, hasher: Arc<dyn CredentialHasher>) -> Self {
        self.hasher = Some(hasher);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    pub fn max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = Some(bytes);
        self
    }

    pub fn default_photo(mut self, photo: AttachmentRef) -> Self {
        self.default_photo = Some(photo);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext {
            user_repo: required(self.user_repo, "user_repo")?,
            follow_repo: required(self.follow_repo, "follow_repo")?,
            feed_repo: required(self.feed_repo, "feed_repo")?,
            comment_repo: required(self.comment_repo, "comment_repo")?,
            reaction_repo: required(self.reaction_repo, "reaction_repo")?,
            chatroom_repo: required(self.chatroom_repo, "chatroom_repo")?,
            message_repo: required(self.message_repo, "message_repo")?,
            file_store: required(self.file_store, "file_store")?,
            hasher: required(self.hasher, "hasher")?,
            jwt_service: required(self.jwt_service, "jwt_service")?,
            snowflake_generator: required(self.snowflake_generator, "snowflake_generator")?,
            max_file_size: self.max_file_size.unwrap_or(DEFAULT_MAX_FILE_SIZE),
            default_photo: self.default_photo,
        })
    }
}

fn required<T>(value: Option<T>, name: &str) -> ServiceResult<T> {
    value.ok_or_else(|| ServiceError::validation(format!("{name} is required")))
}
