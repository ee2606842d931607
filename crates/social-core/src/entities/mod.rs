//! Domain entities - core business objects

mod attachment;
mod chatroom;
mod comment;
mod feed;
mod follow;
mod message;
mod reaction;
mod user;

pub use attachment::{AttachmentRef, FileUpload};
pub use chatroom::Chatroom;
pub use comment::Comment;
pub use feed::Feed;
pub use follow::Follow;
pub use message::Message;
pub use reaction::{Reaction, ReactionCounts, ReactionKind, ReactionOutcome, ReactionTransition};
pub use user::{ProfileChanges, User};
