//! Database connection pool management

mod postgres;

pub use postgres::{
    create_pool, create_pool_from_env, migrations_dir, run_migrations, run_migrations_from,
    DatabaseConfig,
};

// Re-export PgPool for convenience
pub use sqlx::postgres::PgPool;
