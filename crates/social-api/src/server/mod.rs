//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{extract::DefaultBodyLimit, Router};
use social_common::{AppConfig, AppError, JwtService, PasswordService};
use social_core::{AttachmentRef, SnowflakeGenerator};
use social_db::{
    create_pool, run_migrations, LocalFileStore, PgChatroomRepository, PgCommentRepository,
    PgFeedRepository, PgFollowRepository, PgMessageRepository, PgReactionRepository,
    PgUserRepository,
};
use social_service::ServiceContextBuilder;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tracing::{info, warn};

use crate::extractors::MAX_FILES_PER_REQUEST;
use crate::middleware::{apply_middleware, apply_rate_limit};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Room for text fields and multipart framing on top of the file payload
const BODY_OVERHEAD_BYTES: u64 = 1024 * 1024;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let config = state.config().clone();

    // Health checks stay outside the rate limiter
    let api = apply_rate_limit(create_router(), &config.rate_limit);
    let mut router = Router::new().merge(health_routes()).merge(api);

    let public_path = config.storage.public_path.trim_matches('/');
    if public_path.is_empty() {
        warn!("UPLOAD_PUBLIC_PATH is empty, uploaded files will not be served");
    } else {
        router = router.nest_service(
            &format!("/{public_path}"),
            ServeDir::new(&config.storage.upload_dir),
        );
    }

    let body_limit = config
        .storage
        .max_file_size_bytes()
        .saturating_mul(MAX_FILES_PER_REQUEST as u64)
        .saturating_add(BODY_OVERHEAD_BYTES);
    let router = router.layer(DefaultBodyLimit::max(
        usize::try_from(body_limit).unwrap_or(usize::MAX),
    ));

    let router = apply_middleware(router, &config.cors, config.app.env.is_production());
    router.with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    // Create database pool
    info!("Connecting to PostgreSQL...");
    let db_config = social_db::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        min_connections: config.database.min_connections,
        ..Default::default()
    };
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    if config.database.run_migrations {
        run_migrations(&pool)
            .await
            .map_err(|e| AppError::Database(format!("Migration failed: {e}")))?;
        info!("Database migrations applied");
    }

    // Prepare attachment storage
    let file_store = LocalFileStore::new(&config.storage.upload_dir, &config.storage.public_path);
    file_store
        .ensure_root()
        .await
        .map_err(|e| AppError::Storage(e.to_string()))?;
    info!(upload_dir = %config.storage.upload_dir, "Upload directory ready");

    // Create JWT service
    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.app.name.clone(),
        config.jwt.access_token_expiry,
        config.jwt.refresh_token_expiry,
    ));

    // Create Snowflake generator
    let snowflake_generator = Arc::new(SnowflakeGenerator::new(config.snowflake.worker_id));

    // Build service context
    let mut builder = ServiceContextBuilder::new()
        .user_repo(Arc::new(PgUserRepository::new(pool.clone())))
        .follow_repo(Arc::new(PgFollowRepository::new(pool.clone())))
        .feed_repo(Arc::new(PgFeedRepository::new(pool.clone())))
        .comment_repo(Arc::new(PgCommentRepository::new(pool.clone())))
        .reaction_repo(Arc::new(PgReactionRepository::new(pool.clone())))
        .chatroom_repo(Arc::new(PgChatroomRepository::new(pool.clone())))
        .message_repo(Arc::new(PgMessageRepository::new(pool.clone())))
        .file_store(Arc::new(file_store))
        .hasher(Arc::new(PasswordService::new()))
        .jwt_service(jwt_service)
        .snowflake_generator(snowflake_generator)
        .max_file_size(config.storage.max_file_size_bytes());

    let default_photo = config.storage.default_photo.trim();
    if !default_photo.is_empty() {
        builder = builder.default_photo(AttachmentRef::new(default_photo));
    }

    let service_context = builder
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config, pool))
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {}: {}", addr, e)))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {}", e)))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr: SocketAddr = config
        .api
        .address()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid listen address {}: {}", config.api.address(), e)))?;

    // Create app state
    let state = create_app_state(config).await?;

    // Build application
    let app = create_app(state);

    // Run server
    run_server(app, addr).await
}
