//! # social-core
//!
//! Domain layer containing entities, value objects, authorization policy, and the
//! ports (repository, file store, credential hasher) implemented by outer crates.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod policy;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    AttachmentRef, Chatroom, Comment, Feed, FileUpload, Follow, Message, ProfileChanges,
    Reaction, ReactionCounts, ReactionKind, ReactionOutcome, ReactionTransition, User,
};
pub use error::DomainError;
pub use traits::{
    ChatroomRepository, CommentRepository, CredentialHasher, FeedQuery, FeedRepository,
    FileStore, FollowRepository, MessageQuery, MessageRepository, ReactionRepository,
    RepoResult, UserRepository,
};
pub use value_objects::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
