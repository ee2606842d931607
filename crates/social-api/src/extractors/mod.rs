//! Axum extractors for request handling
//!
//! Custom extractors for authentication, validation, pagination and
//! multipart uploads.

mod auth;
mod multipart;
mod pagination;
mod path;
mod validated;

pub use auth::AuthUser;
pub use multipart::{MultipartForm, MAX_FILES_PER_REQUEST};
pub use pagination::{Pagination, PaginationParams};
pub use path::{ChatroomIdPath, CommentIdPath, FeedIdPath, MessageIdPath, UserIdPath};
pub use validated::ValidatedJson;
