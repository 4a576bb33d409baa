//! Response DTOs
//!
//! All response DTOs implement `Serialize`.
//! Snowflake IDs are serialized as strings for JavaScript compatibility.

use chrono::{DateTime, Utc};
use serde::Serialize;

use boosty_core::{AccessReason, PaymentStatus, PostStatus, SubscriptionState};

// ============================================================================
// Common Response Types
// ============================================================================

/// Generic API response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

// ============================================================================
// Profile Responses
// ============================================================================

/// Profile with follow counts
#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub id: String,
    pub user_id: String,
    pub is_creator: bool,
    pub bio: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub follower_count: i64,
    pub following_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Category Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct CategoryResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Post Responses
// ============================================================================

/// Post as seen by one viewer
///
/// `content` is the full body when `is_locked` is false, otherwise a preview
/// or the locked placeholder.
#[derive(Debug, Clone, Serialize)]
pub struct PostResponse {
    pub id: String,
    pub title: String,
    pub content: String,
    pub author_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    pub status: PostStatus,
    pub is_free: bool,
    pub tier_ids: Vec<String>,
    pub is_locked: bool,
    pub access_reason: AccessReason,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Comment Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct CommentResponse {
    pub id: String,
    pub post_id: String,
    pub author_id: String,
    pub content: String,
    pub edited: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Tier Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct TierResponse {
    pub id: String,
    pub creator_id: String,
    pub name: String,
    pub description: String,
    /// Decimal amount, e.g. `"5.00"`
    pub price: String,
    pub price_cents: i64,
    pub order: i32,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscriber_count: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Subscription Responses
// ============================================================================

/// Tier subscription with its state derived at response time
#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionResponse {
    pub id: String,
    pub subscriber_id: String,
    pub tier_id: String,
    pub state: SubscriptionState,
    pub is_active: bool,
    pub is_expired: bool,
    pub days_remaining: i64,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancelled_at: Option<DateTime<Utc>>,
    pub payment_status: PaymentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Legacy follow relation
#[derive(Debug, Clone, Serialize)]
pub struct FollowResponse {
    pub id: String,
    pub subscriber_id: String,
    pub creator_id: String,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Dashboard Responses
// ============================================================================

/// Post counts per status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PostStats {
    pub total: usize,
    pub published: usize,
    pub drafts: usize,
    pub archived: usize,
}

/// Creator overview
#[derive(Debug, Clone, Serialize)]
pub struct DashboardResponse {
    pub profile: ProfileResponse,
    pub posts: PostStats,
    /// Sum of active subscriptions across the creator's tiers
    pub paid_subscriber_count: i64,
    pub tiers: Vec<TierResponse>,
    pub recent_posts: Vec<PostResponse>,
    pub recent_comments: Vec<CommentResponse>,
    pub recent_followers: Vec<FollowResponse>,
}
