//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in social-core.
//! Each repository handles database operations for a specific domain entity.

mod chatroom;
mod comment;
mod error;
mod feed;
mod follow;
mod message;
mod reaction;
mod user;

pub use chatroom::PgChatroomRepository;
pub use comment::PgCommentRepository;
pub use feed::PgFeedRepository;
pub use follow::PgFollowRepository;
pub use message::PgMessageRepository;
pub use reaction::PgReactionRepository;
pub use user::PgUserRepository;
