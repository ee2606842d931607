//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    parse_birth_date, ChangePasswordRequest, CreateChatroomRequest, CreateCommentRequest,
    FeedRequest, LoginRequest, RefreshTokenRequest, RegisterRequest, SendMessageRequest,
    UpdateCommentRequest, UpdateProfileRequest,
};

pub use responses::{
    AuthResponse, ChatroomResponse, CommentResponse, CurrentUserResponse,
    FeedResponse, HealthChecks, HealthResponse, MessageResponse, ReactionCountsResponse,
    ReactionResponse, ReactionToggleResponse, ReadinessResponse, UserResponse,
};

pub use mappers::{
    ChatroomWithMembers, CommentWithAuthor, FeedWithDetails, MessageWithAuthor, ReactionToggle,
};
