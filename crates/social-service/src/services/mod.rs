//! Business logic services
//!
//! Each service borrows the [`ServiceContext`], resolves the acting user's
//! rights through `social_core::policy`, and then applies the change through
//! the repository ports.

pub mod auth;
pub mod chatroom;
pub mod comment;
pub mod context;
pub mod error;
pub mod feed;
mod files;
pub mod follow;
pub mod message;
pub mod reaction;
pub mod user;

#[cfg(test)]
pub(crate) mod test_support;

pub use auth::AuthService;
pub use chatroom::ChatroomService;
pub use comment::CommentService;
pub use context::{ServiceContext, ServiceContextBuilder, DEFAULT_MAX_FILE_SIZE};
pub use error::{ServiceError, ServiceResult};
pub use feed::FeedService;
pub use follow::FollowService;
pub use message::MessageService;
pub use reaction::ReactionService;
pub use user::UserService;
