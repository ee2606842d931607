//! # social-db
//!
//! Persistence layer implementing the social-core ports.
//!
//! ## Overview
//!
//! - Connection pool management and schema migrations
//! - Database models with SQLx `FromRow` derives
//! - Model → entity mappers
//! - PostgreSQL repository implementations
//! - [`LocalFileStore`]: attachments on the local filesystem
//! - `InMemoryStore`: every port in memory, behind the `test-util` feature
//!
//! ## Usage
//!
//! ```rust,ignore
//! use social_db::pool::{create_pool, run_migrations, DatabaseConfig};
//! use social_db::repositories::PgUserRepository;
//! use social_core::traits::UserRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::from_env();
//!     let pool = create_pool(&config).await?;
//!     run_migrations(&pool).await?;
//!     let user_repo = PgUserRepository::new(pool);
//!
//!     // Use the repository...
//!     Ok(())
//! }
//! ```

pub mod mappers;
#[cfg(feature = "test-util")]
pub mod memory;
pub mod models;
pub mod pool;
pub mod repositories;
pub mod storage;

// Re-export commonly used types
#[cfg(feature = "test-util")]
pub use memory::InMemoryStore;
pub use pool::{
    create_pool, create_pool_from_env, run_migrations, DatabaseConfig, PgPool,
};
pub use repositories::{
    PgChatroomRepository, PgCommentRepository, PgFeedRepository, PgFollowRepository,
    PgMessageRepository, PgReactionRepository, PgUserRepository,
};
pub use storage::LocalFileStore;
