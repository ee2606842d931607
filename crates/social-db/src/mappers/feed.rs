//! Feed entity <-> model mapper

use std::collections::HashMap;

use social_core::entities::{AttachmentRef, Feed};
use social_core::value_objects::Snowflake;

use crate::models::{FeedAttachmentModel, FeedModel};

/// Build a feed from its row and attachment rows (any order)
pub fn assemble_feed(model: FeedModel, mut attachments: Vec<FeedAttachmentModel>) -> Feed {
    attachments.sort_by_key(|a| a.position);

    Feed {
        id: Snowflake::new(model.id),
        author_id: Snowflake::new(model.author_id),
        content: model.content,
        attachments: attachments
            .into_iter()
            .map(|a| AttachmentRef::new(a.path))
            .collect(),
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

/// Build many feeds, distributing attachment rows by `feed_id`
///
/// Feed order is preserved.
pub fn assemble_feeds(models: Vec<FeedModel>, attachments: Vec<FeedAttachmentModel>) -> Vec<Feed> {
    let mut by_feed: HashMap<i64, Vec<FeedAttachmentModel>> = HashMap::new();
    for attachment in attachments {
        by_feed.entry(attachment.feed_id).or_default().push(attachment);
    }

    models
        .into_iter()
        .map(|model| {
            let rows = by_feed.remove(&model.id).unwrap_or_default();
            assemble_feed(model, rows)
        })
        .collect()
}
