//! Service context over the in-memory store for unit tests

use std::sync::Arc;

use social_common::auth::JwtService;
use social_core::traits::{CredentialHasher, FileStore, RepoResult, UserRepository};
use social_core::{AttachmentRef, FileUpload, Snowflake, SnowflakeGenerator, User};
use social_db::InMemoryStore;

use super::context::{ServiceContext, ServiceContextBuilder};

/// Reversible "hash" so tests stay fast
pub struct PlainHasher;

impl CredentialHasher for PlainHasher {
    fn hash(&self, plaintext: &str) -> RepoResult<String> {
        Ok(format!("plain:{plaintext}"))
    }

    fn verify(&self, plaintext: &str, digest: &str) -> RepoResult<bool> {
        Ok(digest.strip_prefix("plain:") == Some(plaintext))
    }
}

/// Builder over the in-memory store, minus file storage and default photo
fn builder(store: &Arc<InMemoryStore>) -> ServiceContextBuilder {
    ServiceContextBuilder::new()
        .user_repo(store.clone())
        .follow_repo(store.clone())
        .feed_repo(store.clone())
        .comment_repo(store.clone())
        .reaction_repo(store.clone())
        .chatroom_repo(store.clone())
        .message_repo(store.clone())
        .hasher(Arc::new(PlainHasher))
        .jwt_service(Arc::new(JwtService::new("test-secret", "social-test", 900, 3600)))
        .snowflake_generator(Arc::new(SnowflakeGenerator::new(1)))
        .max_file_size(1024)
}

pub fn context_with_store() -> (ServiceContext, Arc<InMemoryStore>) {
    let store = Arc::new(InMemoryStore::new());
    let ctx = builder(&store)
        .file_store(store.clone())
        .default_photo(AttachmentRef::new("uploads/default/user.png"))
        .build()
        .unwrap();
    (ctx, store)
}

/// In-memory repositories with uploads going to `file_store`
pub fn context_with_file_store(
    file_store: Arc<dyn FileStore>,
    default_photo: AttachmentRef,
) -> ServiceContext {
    let store = Arc::new(InMemoryStore::new());
    builder(&store)
        .file_store(file_store)
        .default_photo(default_photo)
        .build()
        .unwrap()
}

pub fn context() -> ServiceContext {
    context_with_store().0
}

/// Insert an active user with password `secret1`
pub async fn user(ctx: &ServiceContext, name: &str) -> Snowflake {
    let user = User::new(
        ctx.generate_id(),
        name.to_string(),
        format!("{name}@example.com"),
        name.to_string(),
    );
    ctx.user_repo().create(&user, "plain:secret1").await.unwrap();
    user.id
}

pub fn upload(name: &str, size: usize) -> FileUpload {
    FileUpload::new(name, Some("image/png".to_string()), vec![7; size])
}
