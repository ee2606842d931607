//! Attachment writes shared by the services that accept uploads
//!
//! Files are written before the record that references them. When the
//! record write fails the caller hands the references back to [`discard`].

use social_core::{AttachmentRef, DomainError, FileUpload};
use tracing::warn;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Reject the whole batch if any upload exceeds the configured limit
pub(crate) fn check_sizes<'a>(
    ctx: &ServiceContext,
    uploads: impl IntoIterator<Item = &'a FileUpload>,
) -> ServiceResult<()> {
    let max_bytes = ctx.max_file_size();
    if uploads.into_iter().any(|upload| upload.size() > max_bytes) {
        return Err(DomainError::FileTooLarge { max_bytes }.into());
    }
    Ok(())
}

/// Store uploads in order; on failure nothing from this batch is left behind
pub(crate) async fn store_all(
    ctx: &ServiceContext,
    uploads: Vec<FileUpload>,
) -> ServiceResult<Vec<AttachmentRef>> {
    check_sizes(ctx, &uploads)?;

    let mut stored = Vec::with_capacity(uploads.len());
    for upload in uploads {
        match ctx.file_store().store(upload).await {
            Ok(reference) => stored.push(reference),
            Err(e) => {
                discard(ctx, &stored).await;
                return Err(e.into());
            }
        }
    }
    Ok(stored)
}

/// Store at most one upload
pub(crate) async fn store_one(
    ctx: &ServiceContext,
    upload: Option<FileUpload>,
) -> ServiceResult<Option<AttachmentRef>> {
    let stored = store_all(ctx, upload.into_iter().collect()).await?;
    Ok(stored.into_iter().next())
}

/// Best-effort removal; failures are logged and swallowed
pub(crate) async fn discard(ctx: &ServiceContext, references: &[AttachmentRef]) {
    for reference in references {
        if let Err(e) = ctx.file_store().remove(reference).await {
            warn!(attachment = %reference, error = %e, "Failed to remove orphaned attachment");
        }
    }
}
