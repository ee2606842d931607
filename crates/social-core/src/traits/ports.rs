//! Collaborator ports outside the relational store

use async_trait::async_trait;

use super::RepoResult;
use crate::entities::{AttachmentRef, FileUpload};

/// Blob storage for attachments and profile photos
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Persist an upload durably and return its reference
    async fn store(&self, upload: FileUpload) -> RepoResult<AttachmentRef>;

    /// Remove a previously stored file. Removing a missing file is not an error.
    async fn remove(&self, reference: &AttachmentRef) -> RepoResult<()>;
}

/// One-way credential hashing
pub trait CredentialHasher: Send + Sync {
    fn hash(&self, plaintext: &str) -> RepoResult<String>;

    fn verify(&self, plaintext: &str, digest: &str) -> RepoResult<bool>;
}
