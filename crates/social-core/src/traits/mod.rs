//! Ports implemented by the infrastructure crates

mod ports;
mod repositories;

pub use ports::{CredentialHasher, FileStore};
pub use repositories::{
    ChatroomRepository, CommentRepository, FeedQuery, FeedRepository, FollowRepository,
    MessageQuery, MessageRepository, ReactionRepository, RepoResult, UserRepository,
};
