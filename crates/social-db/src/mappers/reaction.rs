//! Reaction entity <-> model mapper

use social_core::entities::{Reaction, ReactionCounts};
use social_core::error::DomainError;
use social_core::value_objects::Snowflake;

use crate::models::{ReactionCountModel, ReactionModel};

/// Fails only if the row carries a kind outside the table's CHECK constraint
impl TryFrom<ReactionModel> for Reaction {
    type Error = DomainError;

    fn try_from(model: ReactionModel) -> Result<Self, Self::Error> {
        Ok(Reaction {
            id: Snowflake::new(model.id),
            feed_id: Snowflake::new(model.feed_id),
            user_id: Snowflake::new(model.user_id),
            kind: model.kind.parse()?,
            created_at: model.created_at,
        })
    }
}

impl From<ReactionCountModel> for ReactionCounts {
    fn from(model: ReactionCountModel) -> Self {
        ReactionCounts {
            likes: model.likes,
            dislikes: model.dislikes,
        }
    }
}
