//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Environment variables: DATABASE_URL, JWT_SECRET
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_error, assert_json, assert_status, check_test_env, content_form, fixtures::*,
    TestServer, API,
};
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["checks"]["database"], "healthy");
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_register_user() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();

    let response = server.post(&format!("{API}/auth/register"), &request).await.unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(auth.user.username, request.username);
    assert_eq!(auth.user.email.as_deref(), Some(request.email.as_str()));
    assert!(!auth.access_token.is_empty());
    assert!(!auth.refresh_token.is_empty());
}

#[tokio::test]
async fn test_register_duplicate_email() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (first, _) = server.register().await.unwrap();

    let mut request = RegisterRequest::unique();
    request.email = first.email.to_uppercase();

    let response = server.post(&format!("{API}/auth/register"), &request).await.unwrap();
    let code = assert_error(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(code, "EMAIL_ALREADY_EXISTS");
}

#[tokio::test]
async fn test_register_validation_error() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let mut request = RegisterRequest::unique();
    request.email = "not-an-email".to_string();

    let response = server.post(&format!("{API}/auth/register"), &request).await.unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_login_by_email_or_username() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (register_req, _) = server.register().await.unwrap();

    for login_req in [LoginRequest::by_email(&register_req), LoginRequest::by_username(&register_req)] {
        let response = server.post(&format!("{API}/auth/login"), &login_req).await.unwrap();
        let auth: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();
        assert_eq!(auth.user.username, register_req.username);
    }
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (register_req, _) = server.register().await.unwrap();

    let wrong_password = LoginRequest {
        login: register_req.email.clone(),
        password: "wrongpass".to_string(),
    };
    let response = server.post(&format!("{API}/auth/login"), &wrong_password).await.unwrap();
    let code = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(code, "INVALID_CREDENTIALS");

    let unknown = LoginRequest {
        login: "nobody@example.com".to_string(),
        password: "wrongpass".to_string(),
    };
    let response = server.post(&format!("{API}/auth/login"), &unknown).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_refresh_token() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = server.register().await.unwrap();

    let refresh_req = RefreshTokenRequest {
        refresh_token: auth.refresh_token,
    };
    let response = server.post(&format!("{API}/auth/refresh"), &refresh_req).await.unwrap();
    let tokens: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(tokens.user.id, auth.user.id);

    // Access tokens are not accepted as refresh tokens
    let misuse = RefreshTokenRequest {
        refresh_token: tokens.access_token,
    };
    let response = server.post(&format!("{API}/auth/refresh"), &misuse).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// User Tests
// ============================================================================

#[tokio::test]
async fn test_get_current_user() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (register_req, auth) = server.register().await.unwrap();

    let response = server.get_auth(&format!("{API}/users/@me"), &auth.access_token).await.unwrap();
    let user: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(user.id, auth.user.id);
    assert_eq!(user.username, register_req.username);
    assert_eq!(user.display_name, register_req.display_name);
}

#[tokio::test]
async fn test_get_current_user_unauthorized() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get(&format!("{API}/users/@me")).await.unwrap();
    let code = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(code, "MISSING_AUTHORIZATION");

    let response = server.get_auth(&format!("{API}/users/@me"), "garbage").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_public_profile_hides_email() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, alice) = server.register().await.unwrap();
    let (_, bob) = server.register().await.unwrap();

    let response = server
        .get_auth(&format!("{API}/users/{}", bob.user.id), &alice.access_token)
        .await
        .unwrap();
    let user: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(user.id, bob.user.id);
    assert!(user.email.is_none());

    let response = server
        .get_auth(&format!("{API}/users/not-a-number"), &alice.access_token)
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_PATH_PARAMETER");

    let response = server.get_auth(&format!("{API}/users"), &alice.access_token).await.unwrap();
    let users: Vec<UserResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(users.iter().any(|u| u.id == bob.user.id));
}

#[tokio::test]
async fn test_update_profile_with_photo() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = server.register().await.unwrap();

    let form = Form::new()
        .text("display_name", "Renamed")
        .text("gender", "   ")
        .text("birth_date", "1990-04-12")
        .part("photo", Part::bytes(b"fake png".to_vec()).file_name("me.png"));

    let response = server
        .patch_form_auth(&format!("{API}/users/@me"), &auth.access_token, form)
        .await
        .unwrap();
    let user: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(user.display_name, "Renamed");

    let photo = user.photo.expect("photo should be set");
    assert!(photo.ends_with("me.png"));

    let response = server.get(&format!("/{photo}")).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let bad_date = Form::new().text("birth_date", "12/04/1990");
    let response = server
        .patch_form_auth(&format!("{API}/users/@me"), &auth.access_token, bad_date)
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_update_profile_duplicate_username() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (taken, _) = server.register().await.unwrap();
    let (_, auth) = server.register().await.unwrap();

    let form = Form::new().text("username", taken.username);
    let response = server
        .patch_form_auth(&format!("{API}/users/@me"), &auth.access_token, form)
        .await
        .unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();
}

#[tokio::test]
async fn test_change_password() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (register_req, auth) = server.register().await.unwrap();

    let wrong = ChangePasswordRequest {
        current_password: "not-it".to_string(),
        new_password: "another1".to_string(),
    };
    let response = server
        .put_auth(&format!("{API}/users/@me/password"), &auth.access_token, &wrong)
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let change = ChangePasswordRequest {
        current_password: register_req.password.clone(),
        new_password: "another1".to_string(),
    };
    let response = server
        .put_auth(&format!("{API}/users/@me/password"), &auth.access_token, &change)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let old_login = LoginRequest::by_username(&register_req);
    let response = server.post(&format!("{API}/auth/login"), &old_login).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let new_login = LoginRequest {
        login: register_req.username.clone(),
        password: "another1".to_string(),
    };
    let response = server.post(&format!("{API}/auth/login"), &new_login).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_deactivated_user_is_locked_out() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (register_req, auth) = server.register().await.unwrap();

    let response = server.delete_auth(&format!("{API}/users/@me"), &auth.access_token).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.get_auth(&format!("{API}/users/@me"), &auth.access_token).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let login = LoginRequest::by_email(&register_req);
    let response = server.post(&format!("{API}/auth/login"), &login).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// Follow Tests
// ============================================================================

#[tokio::test]
async fn test_follow_lifecycle() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, alice) = server.register().await.unwrap();
    let (_, bob) = server.register().await.unwrap();
    let follow_path = format!("{API}/users/{}/follow", bob.user.id);

    let response = server.post_empty_auth(&follow_path, &alice.access_token).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.post_empty_auth(&follow_path, &alice.access_token).await.unwrap();
    let code = assert_error(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(code, "ALREADY_FOLLOWING");

    let response = server
        .get_auth(&format!("{API}/users/@me/followers"), &bob.access_token)
        .await
        .unwrap();
    let followers: Vec<UserResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(followers.len(), 1);
    assert_eq!(followers[0].id, alice.user.id);

    let response = server
        .get_auth(&format!("{API}/users/@me/following"), &alice.access_token)
        .await
        .unwrap();
    let following: Vec<UserResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(following.len(), 1);
    assert_eq!(following[0].id, bob.user.id);

    // Unfollow is idempotent
    for _ in 0..2 {
        let response = server.delete_auth(&follow_path, &alice.access_token).await.unwrap();
        assert_status(response, StatusCode::NO_CONTENT).await.unwrap();
    }
}

#[tokio::test]
async fn test_follow_rules() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, alice) = server.register().await.unwrap();

    let response = server
        .post_empty_auth(&format!("{API}/users/{}/follow", alice.user.id), &alice.access_token)
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "CANNOT_FOLLOW_SELF");

    let response = server
        .post_empty_auth(&format!("{API}/users/1/follow"), &alice.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

// ============================================================================
// Feed Tests
// ============================================================================

async fn create_feed(server: &TestServer, token: &str, content: &str) -> FeedResponse {
    let response = server
        .post_form_auth(&format!("{API}/feeds"), token, content_form(content, "file", &[]))
        .await
        .unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

#[tokio::test]
async fn test_create_feed_with_ordered_attachments() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, alice) = server.register().await.unwrap();

    let form = content_form("hello", "file", &[("first.png", "one"), ("second.png", "two")]);
    let response = server
        .post_form_auth(&format!("{API}/feeds"), &alice.access_token, form)
        .await
        .unwrap();
    let feed: FeedResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(feed.author_id, alice.user.id);
    assert_eq!(feed.content, "hello");
    assert_eq!(feed.attachments.len(), 2);
    assert!(feed.attachments[0].ends_with("first.png"));
    assert!(feed.attachments[1].ends_with("second.png"));

    let response = server.get(&format!("/{}", feed.attachments[1])).await.unwrap();
    assert_eq!(response.text().await.unwrap(), "two");
}

#[tokio::test]
async fn test_feed_requires_content() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, alice) = server.register().await.unwrap();

    let response = server
        .post_form_auth(&format!("{API}/feeds"), &alice.access_token, content_form("   ", "file", &[]))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "EMPTY_CONTENT");
}

#[tokio::test]
async fn test_feed_update_and_delete_authorization() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, owner) = server.register().await.unwrap();
    let (_, other) = server.register().await.unwrap();
    let feed = create_feed(&server, &owner.access_token, "original").await;
    let feed_path = format!("{API}/feeds/{}", feed.id);

    let response = server
        .put_form_auth(&feed_path, &other.access_token, content_form("hijack", "file", &[]))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(code, "NOT_FEED_AUTHOR");

    let response = server.delete_auth(&feed_path, &other.access_token).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server
        .put_form_auth(&feed_path, &owner.access_token, content_form("edited", "file", &[]))
        .await
        .unwrap();
    let updated: FeedResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.content, "edited");

    let response = server.delete_auth(&feed_path, &owner.access_token).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.get_auth(&feed_path, &owner.access_token).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server.delete_auth(&feed_path, &owner.access_token).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_feed_listing_pagination() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, alice) = server.register().await.unwrap();
    let older = create_feed(&server, &alice.access_token, "older").await;
    let newer = create_feed(&server, &alice.access_token, "newer").await;

    let response = server
        .get_auth(&format!("{API}/feeds?limit=1&before={}", newer.id), &alice.access_token)
        .await
        .unwrap();
    let page: Vec<FeedResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].id, older.id);

    let response = server
        .get_auth(&format!("{API}/feeds?before=yesterday"), &alice.access_token)
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_QUERY_PARAMETER");
}

// ============================================================================
// Comment Tests
// ============================================================================

#[tokio::test]
async fn test_comment_lifecycle() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, owner) = server.register().await.unwrap();
    let (_, commenter) = server.register().await.unwrap();
    let feed = create_feed(&server, &owner.access_token, "discuss").await;

    let form = content_form("first!", "file", &[("pic.png", "img")]);
    let response = server
        .post_form_auth(&format!("{API}/feeds/{}/comments", feed.id), &commenter.access_token, form)
        .await
        .unwrap();
    let comment: CommentResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(comment.feed_id, feed.id);
    assert!(comment.attachment.as_deref().is_some_and(|a| a.ends_with("pic.png")));

    let comment_path = format!("{API}/comments/{}", comment.id);

    // The feed's owner cannot remove someone else's comment
    let response = server.delete_auth(&comment_path, &owner.access_token).await.unwrap();
    let code = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(code, "NOT_COMMENT_AUTHOR");

    let edit = UpdateCommentRequest {
        content: "edited".to_string(),
    };
    let response = server.patch_auth(&comment_path, &commenter.access_token, &edit).await.unwrap();
    let edited: CommentResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(edited.content, "edited");
    assert_eq!(edited.attachment, comment.attachment);

    let response = server
        .get_auth(&format!("{API}/feeds/{}", feed.id), &owner.access_token)
        .await
        .unwrap();
    let rendered: FeedResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(rendered.comments.len(), 1);
    assert_eq!(rendered.comments[0].author_id, commenter.user.id);

    let response = server.delete_auth(&comment_path, &commenter.access_token).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();
}

#[tokio::test]
async fn test_comment_on_missing_feed() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, alice) = server.register().await.unwrap();

    let response = server
        .post_form_auth(
            &format!("{API}/feeds/1/comments"),
            &alice.access_token,
            content_form("anyone?", "file", &[]),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

// ============================================================================
// Reaction Tests
// ============================================================================

#[tokio::test]
async fn test_like_dislike_toggle() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, u1) = server.register().await.unwrap();
    let (_, u2) = server.register().await.unwrap();
    let feed = create_feed(&server, &u1.access_token, "hello").await;
    let like = format!("{API}/feeds/{}/like", feed.id);
    let dislike = format!("{API}/feeds/{}/dislike", feed.id);

    let response = server.post_empty_auth(&like, &u2.access_token).await.unwrap();
    let toggle: ReactionToggleResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(toggle.action, "added");
    assert_eq!(toggle.reaction.as_deref(), Some("like"));

    let response = server.post_empty_auth(&dislike, &u2.access_token).await.unwrap();
    let toggle: ReactionToggleResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(toggle.action, "switched");
    assert_eq!(toggle.counts, ReactionCounts { likes: 0, dislikes: 1 });

    let response = server
        .get_auth(&format!("{API}/feeds/{}", feed.id), &u2.access_token)
        .await
        .unwrap();
    let rendered: FeedResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(rendered.my_reaction.as_deref(), Some("dislike"));

    let response = server.post_empty_auth(&dislike, &u2.access_token).await.unwrap();
    let toggle: ReactionToggleResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(toggle.action, "removed");
    assert!(toggle.reaction.is_none());
    assert_eq!(toggle.counts, ReactionCounts { likes: 0, dislikes: 0 });

    let response = server
        .post_empty_auth(&format!("{API}/feeds/1/like"), &u2.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

// ============================================================================
// Chatroom Tests
// ============================================================================

async fn create_room(server: &TestServer, token: &str, request: &CreateChatroomRequest) -> ChatroomResponse {
    let response = server.post_auth(&format!("{API}/chatrooms"), token, request).await.unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

#[tokio::test]
async fn test_direct_chatroom_cardinality() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, alice) = server.register().await.unwrap();
    let (_, bob) = server.register().await.unwrap();
    let (_, carol) = server.register().await.unwrap();

    for member_ids in [Vec::new(), vec![bob.user.id.clone(), carol.user.id.clone()]] {
        let response = server
            .post_auth(
                &format!("{API}/chatrooms"),
                &alice.access_token,
                &CreateChatroomRequest::direct(member_ids),
            )
            .await
            .unwrap();
        assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
    }

    let room = create_room(
        &server,
        &alice.access_token,
        &CreateChatroomRequest::direct(vec![bob.user.id.clone()]),
    )
    .await;
    assert!(!room.is_group);
    assert_eq!(room.member_ids, [alice.user.id.clone(), bob.user.id.clone()]);

    let response = server.get_auth(&format!("{API}/chatrooms"), &bob.access_token).await.unwrap();
    let rooms: Vec<ChatroomResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(rooms.iter().any(|r| r.id == room.id));
}

#[tokio::test]
async fn test_group_chatroom_deletion() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, owner) = server.register().await.unwrap();
    let (_, member) = server.register().await.unwrap();

    let room = create_room(
        &server,
        &owner.access_token,
        &CreateChatroomRequest::group(vec![member.user.id.clone(), "1".to_string()]),
    )
    .await;
    assert!(room.is_group);
    assert_eq!(room.owner_id, owner.user.id);
    assert_eq!(room.skipped_member_ids, ["1"]);

    let room_path = format!("{API}/chatrooms/{}", room.id);

    let response = server.delete_auth(&room_path, &member.access_token).await.unwrap();
    let code = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(code, "NOT_CHATROOM_OWNER");

    let response = server.delete_auth(&room_path, &owner.access_token).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.get_auth(&format!("{API}/chatrooms"), &owner.access_token).await.unwrap();
    let rooms: Vec<ChatroomResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(rooms.iter().all(|r| r.id != room.id));
}

// ============================================================================
// Message Tests
// ============================================================================

#[tokio::test]
async fn test_messages_require_membership() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, owner) = server.register().await.unwrap();
    let (_, member) = server.register().await.unwrap();
    let (_, outsider) = server.register().await.unwrap();

    let room = create_room(
        &server,
        &owner.access_token,
        &CreateChatroomRequest::group(vec![member.user.id.clone()]),
    )
    .await;
    let messages_path = format!("{API}/chatrooms/{}/messages", room.id);

    let response = server
        .post_form_auth(&messages_path, &outsider.access_token, content_form("let me in", "file", &[]))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(code, "NOT_CHATROOM_MEMBER");

    let response = server.get_auth(&messages_path, &outsider.access_token).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    for content in ["one", "two"] {
        let response = server
            .post_form_auth(&messages_path, &member.access_token, content_form(content, "file", &[]))
            .await
            .unwrap();
        let message: MessageResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
        assert_eq!(message.chatroom_id, room.id);
        assert_eq!(message.author_id, member.user.id);
    }

    let response = server.get_auth(&messages_path, &owner.access_token).await.unwrap();
    let messages: Vec<MessageResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    let contents: Vec<_> = messages.iter().map(|m| m.content.as_str()).collect();
    assert_eq!(contents, ["one", "two"]);

    let response = server
        .get_auth(&format!("{messages_path}?after={}", messages[0].id), &owner.access_token)
        .await
        .unwrap();
    let newer: Vec<MessageResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(newer.len(), 1);
    assert_eq!(newer[0].content, "two");

    // Room owners cannot delete other members' messages
    let message_path = format!("{API}/messages/{}", messages[0].id);
    let response = server.delete_auth(&message_path, &owner.access_token).await.unwrap();
    let code = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(code, "NOT_MESSAGE_AUTHOR");

    let response = server.delete_auth(&message_path, &member.access_token).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();
}

#[tokio::test]
async fn test_message_with_attachment() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, alice) = server.register().await.unwrap();
    let (_, bob) = server.register().await.unwrap();

    let room = create_room(
        &server,
        &alice.access_token,
        &CreateChatroomRequest::direct(vec![bob.user.id.clone()]),
    )
    .await;

    let form = content_form("look", "file", &[("pic.png", "img")]);
    let response = server
        .post_form_auth(&format!("{API}/chatrooms/{}/messages", room.id), &bob.access_token, form)
        .await
        .unwrap();
    let message: MessageResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert!(message.attachment.as_deref().is_some_and(|a| a.ends_with("pic.png")));

    let two_files = content_form("too many", "file", &[("a.png", "a"), ("b.png", "b")]);
    let response = server
        .post_form_auth(&format!("{API}/chatrooms/{}/messages", room.id), &bob.access_token, two_files)
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_MULTIPART");
}
