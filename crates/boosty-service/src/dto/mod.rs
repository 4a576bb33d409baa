//! Data transfer objects for service inputs and outputs
//!
//! This module provides:
//! - Request DTOs with validation
//! - Response DTOs ready for serialization
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    CommentRequest, CreateCategoryRequest, CreatePostRequest, CreateTierRequest, ListPostsQuery,
    MyPostsQuery, UpdatePostRequest, UpdateProfileRequest, UpdateTierRequest,
};

pub use responses::{
    ApiResponse, CategoryResponse, CommentResponse, DashboardResponse, FollowResponse,
    PostResponse, PostStats, ProfileResponse, SubscriptionResponse, TierResponse,
};

pub use mappers::{PostWithAccess, ProfileWithCounts, SubscriptionAt, TierWithCount};
