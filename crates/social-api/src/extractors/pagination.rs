//! Pagination extractor
//!
//! Extracts cursor-based pagination parameters from query strings.

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::Deserialize;
use social_core::traits::{FeedQuery, MessageQuery};
use social_core::Snowflake;

use crate::response::ApiError;

/// Raw pagination query parameters
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    /// Get items before this ID
    #[serde(default)]
    pub before: Option<String>,
    /// Get items after this ID
    #[serde(default)]
    pub after: Option<String>,
    /// Maximum number of items to return
    #[serde(default)]
    pub limit: Option<i64>,
}

/// Parsed pagination parameters
///
/// The limit is passed through untouched; the repository queries clamp it.
#[derive(Debug, Clone, Default)]
pub struct Pagination {
    pub before: Option<Snowflake>,
    pub after: Option<Snowflake>,
    pub limit: Option<i64>,
}

impl Pagination {
    /// Feed listings only page backwards
    pub fn feed_query(&self) -> Result<FeedQuery, ApiError> {
        if self.after.is_some() {
            return Err(ApiError::invalid_query("Feeds only support the 'before' cursor"));
        }
        Ok(FeedQuery {
            before: self.before,
            limit: self.limit,
        })
    }

    pub fn message_query(&self) -> MessageQuery {
        MessageQuery {
            before: self.before,
            after: self.after,
            limit: self.limit,
        }
    }
}

fn parse_cursor(value: Option<String>, name: &str) -> Result<Option<Snowflake>, ApiError> {
    value
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<Snowflake>()
                .map_err(|_| ApiError::invalid_query(format!("Invalid '{name}' cursor format")))
        })
        .transpose()
}

impl TryFrom<PaginationParams> for Pagination {
    type Error = ApiError;

    fn try_from(params: PaginationParams) -> Result<Self, Self::Error> {
        let before = parse_cursor(params.before, "before")?;
        let after = parse_cursor(params.after, "after")?;

        if before.is_some() && after.is_some() {
            return Err(ApiError::invalid_query("Use either 'before' or 'after', not both"));
        }

        Ok(Pagination {
            before,
            after,
            limit: params.limit,
        })
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Pagination
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<PaginationParams>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_query(e.to_string()))?;

        Pagination::try_from(params)
    }
}
