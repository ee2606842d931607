//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};

use crate::handlers::{auth, chatrooms, comments, feeds, follows, health, messages, reactions, users};
use crate::state::AppState;

/// Create the API router (health routes excluded so they skip rate limiting)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(feed_routes())
        .merge(comment_routes())
        .merge(chatroom_routes())
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh_token))
}

/// User and follow routes
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(users::list_users))
        .route(
            "/users/@me",
            get(users::get_current_user)
                .patch(users::update_current_user)
                .delete(users::deactivate_current_user),
        )
        .route("/users/@me/password", put(users::change_password))
        .route("/users/@me/followers", get(follows::list_followers))
        .route("/users/@me/following", get(follows::list_following))
        .route("/users/:user_id", get(users::get_user))
        .route(
            "/users/:user_id/follow",
            post(follows::follow_user).delete(follows::unfollow_user),
        )
}

/// Feed, comment-creation and reaction routes
fn feed_routes() -> Router<AppState> {
    Router::new()
        .route("/feeds", get(feeds::list_feeds).post(feeds::create_feed))
        .route(
            "/feeds/:feed_id",
            get(feeds::get_feed)
                .put(feeds::update_feed)
                .delete(feeds::delete_feed),
        )
        .route("/feeds/:feed_id/comments", post(comments::create_comment))
        .route("/feeds/:feed_id/like", post(reactions::like_feed))
        .route("/feeds/:feed_id/dislike", post(reactions::dislike_feed))
}

/// Comment routes
fn comment_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/comments/:comment_id",
            patch(comments::update_comment).delete(comments::delete_comment),
        )
}

/// Chatroom and message routes
fn chatroom_routes() -> Router<AppState> {
    Router::new()
        .route("/chatrooms", get(chatrooms::list_chatrooms).post(chatrooms::create_chatroom))
        .route("/chatrooms/:chatroom_id", delete(chatrooms::delete_chatroom))
        .route(
            "/chatrooms/:chatroom_id/messages",
            get(messages::get_messages).post(messages::create_message),
        )
        .route("/messages/:message_id", delete(messages::delete_message))
}
