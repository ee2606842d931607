//! Reaction entity and the like/dislike toggle rules
//!
//! Per (feed, user) pair the state is one of none / liked / disliked:
//!
//! | from     | like           | dislike           |
//! |----------|----------------|-------------------|
//! | none     | liked (insert) | disliked (insert) |
//! | liked    | none (delete)  | disliked (update) |
//! | disliked | liked (update) | none (delete)     |

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Kind of reaction a user can leave on a feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionKind {
    Like,
    Dislike,
}

impl ReactionKind {
    /// Database / wire representation
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Dislike => "dislike",
        }
    }
}

impl fmt::Display for ReactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReactionKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "like" => Ok(Self::Like),
            "dislike" => Ok(Self::Dislike),
            other => Err(DomainError::ValidationError(format!(
                "unknown reaction kind: {other}"
            ))),
        }
    }
}

/// At most one per (feed, user)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reaction {
    pub id: Snowflake,
    pub feed_id: Snowflake,
    pub user_id: Snowflake,
    pub kind: ReactionKind,
    pub created_at: DateTime<Utc>,
}

impl Reaction {
    pub fn new(id: Snowflake, feed_id: Snowflake, user_id: Snowflake, kind: ReactionKind) -> Self {
        Self {
            id,
            feed_id,
            user_id,
            kind,
            created_at: Utc::now(),
        }
    }
}

/// Store operation needed to apply a requested reaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionTransition {
    Insert(ReactionKind),
    Update(ReactionKind),
    Delete,
}

impl ReactionTransition {
    /// Decide the operation from the current row (if any) and the requested kind
    pub fn resolve(current: Option<ReactionKind>, requested: ReactionKind) -> Self {
        match current {
            None => Self::Insert(requested),
            Some(kind) if kind == requested => Self::Delete,
            Some(_) => Self::Update(requested),
        }
    }

    /// Outcome reported once the operation was applied on top of `current`
    pub fn outcome(self, current: Option<ReactionKind>) -> ReactionOutcome {
        match (self, current) {
            (Self::Insert(kind), _) => ReactionOutcome::Added(kind),
            (Self::Update(to), Some(from)) => ReactionOutcome::Switched { from, to },
            // an update always has a previous row; treat a missing one as a fresh add
            (Self::Update(to), None) => ReactionOutcome::Added(to),
            (Self::Delete, Some(kind)) => ReactionOutcome::Removed(kind),
            (Self::Delete, None) => ReactionOutcome::Unchanged,
        }
    }
}

/// Result of toggling a reaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionOutcome {
    Added(ReactionKind),
    Switched { from: ReactionKind, to: ReactionKind },
    Removed(ReactionKind),
    Unchanged,
}

impl ReactionOutcome {
    /// Reaction held by the user after the toggle
    pub fn current(self) -> Option<ReactionKind> {
        match self {
            Self::Added(kind) | Self::Switched { to: kind, .. } => Some(kind),
            Self::Removed(_) | Self::Unchanged => None,
        }
    }

    pub fn action(self) -> &'static str {
        match self {
            Self::Added(_) => "added",
            Self::Switched { .. } => "switched",
            Self::Removed(_) => "removed",
            Self::Unchanged => "unchanged",
        }
    }
}

/// Aggregated reaction totals for one feed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReactionCounts {
    pub likes: i64,
    pub dislikes: i64,
}

impl ReactionCounts {
    pub fn tally<'a>(reactions: impl IntoIterator<Item = &'a Reaction>) -> Self {
        reactions
            .into_iter()
            .fold(Self::default(), |mut counts, reaction| {
                match reaction.kind {
                    ReactionKind::Like => counts.likes += 1,
                    ReactionKind::Dislike => counts.dislikes += 1,
                }
                counts
            })
    }

    #[inline]
    pub fn total(&self) -> i64 {
        self.likes + self.dislikes
    }
}
