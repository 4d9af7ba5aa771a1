//! # board-service
//!
//! Application layer containing business logic, services, and DTOs.

pub mod dto;
pub mod services;

// Re-export commonly used request types
pub use dto::requests::{
    CreatePostRequest, LoginRequest, LogoutRequest, RefreshTokenRequest, RegisterRequest,
    UpdatePostRequest, VoteRequest,
};

// Re-export commonly used response types
pub use dto::responses::{
    AuthResponse, CurrentUserResponse, HealthResponse, PaginatedPostsResponse, PostResponse,
    ReadinessResponse, UserResponse, VoteResponse,
};

// Re-export services
pub use services::{
    AuthService, PostService, ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult,
    VoteService,
};
