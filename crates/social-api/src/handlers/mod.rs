//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod auth;
pub mod chatrooms;
pub mod comments;
pub mod feeds;
pub mod follows;
pub mod health;
pub mod messages;
pub mod reactions;
pub mod users;
