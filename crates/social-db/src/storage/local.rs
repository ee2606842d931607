//! Filesystem-backed [`FileStore`]
//!
//! Files are written flat into one directory as `<uuid>_<sanitized name>` and
//! referenced as `<public_path>/<file name>`, which is also the URL path the
//! API serves the directory under.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use social_core::entities::{AttachmentRef, FileUpload};
use social_core::error::DomainError;
use social_core::traits::{FileStore, RepoResult};

fn storage_error(e: impl std::fmt::Display) -> DomainError {
    DomainError::StorageError(e.to_string())
}

#[derive(Debug, Clone)]
pub struct LocalFileStore {
    root: PathBuf,
    public_path: String,
}

impl LocalFileStore {
    pub fn new(root: impl Into<PathBuf>, public_path: &str) -> Self {
        Self {
            root: root.into(),
            public_path: public_path.trim_matches('/').to_string(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the storage directory if missing
    pub async fn ensure_root(&self) -> RepoResult<()> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(storage_error)
    }

    /// Map a reference back to a file inside `root`
    ///
    /// Returns `None` for references this store did not produce.
    fn resolve(&self, reference: &AttachmentRef) -> Option<PathBuf> {
        let name = reference
            .as_str()
            .strip_prefix(&self.public_path)?
            .strip_prefix('/')?;

        if name.is_empty() || name.contains(['/', '\\']) || name.starts_with('.') {
            return None;
        }
        Some(self.root.join(name))
    }
}

#[async_trait]
impl FileStore for LocalFileStore {
    #[instrument(skip(self, upload), fields(file_name = %upload.file_name, size = upload.size()))]
    async fn store(&self, upload: FileUpload) -> RepoResult<AttachmentRef> {
        let name = format!("{}_{}", Uuid::new_v4().simple(), upload.sanitized_file_name());
        let path = self.root.join(&name);

        let mut file = tokio::fs::File::create(&path).await.map_err(storage_error)?;
        file.write_all(&upload.data).await.map_err(storage_error)?;
        file.sync_all().await.map_err(storage_error)?;

        debug!(path = %path.display(), "Stored upload");
        Ok(AttachmentRef::new(format!("{}/{name}", self.public_path)))
    }

    #[instrument(skip(self))]
    async fn remove(&self, reference: &AttachmentRef) -> RepoResult<()> {
        let Some(path) = self.resolve(reference) else {
            warn!(reference = %reference, "Refusing to remove foreign reference");
            return Ok(());
        };

        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(storage_error(e)),
        }
    }
}
