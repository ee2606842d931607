//! Database models - SQLx-compatible structs for PostgreSQL tables

mod chatroom;
mod comment;
mod feed;
mod message;
mod reaction;
mod user;

pub use chatroom::ChatroomModel;
pub use comment::CommentModel;
pub use feed::{FeedAttachmentModel, FeedModel};
pub use message::MessageModel;
pub use reaction::{ReactionCountModel, ReactionModel};
pub use user::UserModel;
