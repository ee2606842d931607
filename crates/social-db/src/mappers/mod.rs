//! Entity to model mappers
//!
//! Conversions from database rows (models) to domain entities (social-core).
//! Rows that need sibling rows to become an entity (feeds and their
//! attachments) are assembled by helper functions instead of `From`.

mod chatroom;
mod comment;
mod feed;
mod message;
mod reaction;
mod user;

pub use feed::{assemble_feed, assemble_feeds};
