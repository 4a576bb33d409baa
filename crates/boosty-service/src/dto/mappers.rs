//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.
//! Responses that depend on the viewer or the clock go through the small
//! helper structs below.

use chrono::{DateTime, Utc};

use boosty_core::{
    AccessDecision, Category, Comment, FollowSubscription, Post, Profile, Tier, TierSubscription,
};

use super::responses::{
    CategoryResponse, CommentResponse, FollowResponse, PostResponse, ProfileResponse,
    SubscriptionResponse, TierResponse,
};

// ============================================================================
// Helper structs
// ============================================================================

/// Profile together with its follow counts
#[derive(Debug, Clone)]
pub struct ProfileWithCounts {
    pub profile: Profile,
    pub follower_count: i64,
    pub following_count: i64,
}

/// Post paired with the viewer's access decision
#[derive(Debug, Clone)]
pub struct PostWithAccess {
    pub post: Post,
    pub decision: AccessDecision,
}

/// Tier paired with its active subscription count
#[derive(Debug, Clone)]
pub struct TierWithCount {
    pub tier: Tier,
    pub subscriber_count: i64,
}

/// Subscription evaluated at a fixed instant
#[derive(Debug, Clone)]
pub struct SubscriptionAt {
    pub subscription: TierSubscription,
    pub now: DateTime<Utc>,
}

// ============================================================================
// Profile Mappers
// ============================================================================

impl From<&ProfileWithCounts> for ProfileResponse {
    fn from(p: &ProfileWithCounts) -> Self {
        Self {
            id: p.profile.id.to_string(),
            user_id: p.profile.user_id.to_string(),
            is_creator: p.profile.is_creator,
            bio: p.profile.bio.clone(),
            avatar: p.profile.avatar.clone(),
            follower_count: p.follower_count,
            following_count: p.following_count,
            created_at: p.profile.created_at,
            updated_at: p.profile.updated_at,
        }
    }
}

impl From<ProfileWithCounts> for ProfileResponse {
    fn from(p: ProfileWithCounts) -> Self {
        Self::from(&p)
    }
}

// ============================================================================
// Category Mappers
// ============================================================================

impl From<&Category> for CategoryResponse {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id.to_string(),
            name: category.name.clone(),
            description: category.description.clone(),
            created_at: category.created_at,
        }
    }
}

// ============================================================================
// Post Mappers
// ============================================================================

impl From<PostWithAccess> for PostResponse {
    fn from(p: PostWithAccess) -> Self {
        let PostWithAccess { post, decision } = p;
        Self {
            id: post.id.to_string(),
            title: post.title,
            content: decision.content.into_string(),
            author_id: post.author_id.to_string(),
            category_id: post.category_id.map(|id| id.to_string()),
            status: post.status,
            is_free: post.is_free,
            tier_ids: post.tier_ids.iter().map(ToString::to_string).collect(),
            is_locked: !decision.granted,
            access_reason: decision.reason,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

// ============================================================================
// Comment Mappers
// ============================================================================

impl From<&Comment> for CommentResponse {
    fn from(comment: &Comment) -> Self {
        Self {
            id: comment.id.to_string(),
            post_id: comment.post_id.to_string(),
            author_id: comment.author_id.to_string(),
            content: comment.content.clone(),
            edited: comment.is_edited(),
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        }
    }
}

// ============================================================================
// Tier Mappers
// ============================================================================

impl From<&Tier> for TierResponse {
    fn from(tier: &Tier) -> Self {
        Self {
            id: tier.id.to_string(),
            creator_id: tier.creator_id.to_string(),
            name: tier.name.clone(),
            description: tier.description.clone(),
            price: tier.price.to_string(),
            price_cents: tier.price.cents(),
            order: tier.order,
            is_active: tier.is_active,
            subscriber_count: None,
            created_at: tier.created_at,
            updated_at: tier.updated_at,
        }
    }
}

impl From<&TierWithCount> for TierResponse {
    fn from(t: &TierWithCount) -> Self {
        Self {
            subscriber_count: Some(t.subscriber_count),
            ..Self::from(&t.tier)
        }
    }
}

// ============================================================================
// Subscription Mappers
// ============================================================================

impl From<&SubscriptionAt> for SubscriptionResponse {
    fn from(s: &SubscriptionAt) -> Self {
        let sub = &s.subscription;
        Self {
            id: sub.id.to_string(),
            subscriber_id: sub.subscriber_id.to_string(),
            tier_id: sub.tier_id.to_string(),
            state: sub.state_at(s.now),
            is_active: sub.is_active,
            is_expired: sub.is_expired_at(s.now),
            days_remaining: sub.days_remaining_at(s.now),
            start_date: sub.start_date,
            end_date: sub.end_date,
            cancelled_at: sub.cancelled_at,
            payment_status: sub.payment_status,
            transaction_id: sub.transaction_id.clone(),
            created_at: sub.created_at,
        }
    }
}

impl From<&FollowSubscription> for FollowResponse {
    fn from(follow: &FollowSubscription) -> Self {
        Self {
            id: follow.id.to_string(),
            subscriber_id: follow.subscriber_id.to_string(),
            creator_id: follow.creator_id.to_string(),
            created_at: follow.created_at,
        }
    }
}
