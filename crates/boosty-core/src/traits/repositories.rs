//! Repository traits (ports) - the entity store contract
//!
//! The domain layer states what it needs from storage; `boosty-db` provides
//! the PostgreSQL implementation. Methods named `*_within_limit` and
//! `create_unless_subscribed` are atomic check-and-write primitives: the
//! implementation must make the check and the write indivisible.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{
    Category, Comment, FollowSubscription, Post, PostStatus, Profile, Tier, TierSubscription, User,
};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>>;

    /// Create a new user
    async fn create(&self, user: &User) -> RepoResult<()>;
}

// ============================================================================
// Profile Repository
// ============================================================================

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Find profile by its own ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Profile>>;

    /// Find the profile belonging to a user
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Option<Profile>>;

    /// Insert `profile` unless the user already has one; returns the stored profile
    async fn create_if_absent(&self, profile: &Profile) -> RepoResult<Profile>;

    /// Update bio, avatar and creator flag
    async fn update(&self, profile: &Profile) -> RepoResult<()>;

    /// Creator profiles, optionally only those with published posts in a category
    async fn find_creators(&self, category_id: Option<Snowflake>) -> RepoResult<Vec<Profile>>;
}

// ============================================================================
// Category Repository
// ============================================================================

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Category>>;

    /// All categories ordered by name
    async fn find_all(&self) -> RepoResult<Vec<Category>>;

    /// Create a category; duplicate names fail with `DuplicateCategoryName`
    async fn create(&self, category: &Category) -> RepoResult<()>;

    /// Delete a category, detaching it from its posts
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Post Repository
// ============================================================================

/// Filters for published post scans
#[derive(Debug, Clone, Default)]
pub struct PostQuery {
    pub category_id: Option<Snowflake>,
    pub author_id: Option<Snowflake>,
}

#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Find post (with its tier set) by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Post>>;

    /// Find several posts at once; missing IDs are skipped
    async fn find_by_ids(&self, ids: &[Snowflake]) -> RepoResult<Vec<Post>>;

    /// Posts by an author, any status unless filtered
    async fn find_by_author(
        &self,
        author_id: Snowflake,
        status: Option<PostStatus>,
    ) -> RepoResult<Vec<Post>>;

    /// Published posts matching the query
    async fn find_published(&self, query: PostQuery) -> RepoResult<Vec<Post>>;

    /// Published posts written by any of the given authors
    async fn find_published_by_authors(&self, author_ids: &[Snowflake]) -> RepoResult<Vec<Post>>;

    /// Create a post together with its tier set
    async fn create(&self, post: &Post) -> RepoResult<()>;

    /// Update a post, replacing its tier set
    async fn update(&self, post: &Post) -> RepoResult<()>;

    /// Delete a post and its comments
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Comment Repository
// ============================================================================

#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Comment>>;

    /// Comments on a single post
    async fn find_by_post(&self, post_id: Snowflake) -> RepoResult<Vec<Comment>>;

    /// Every comment; visibility filtering happens above the store
    async fn find_all(&self) -> RepoResult<Vec<Comment>>;

    /// Comments left on posts written by `author_id`, newest first
    async fn find_on_posts_by(&self, author_id: Snowflake, limit: i64) -> RepoResult<Vec<Comment>>;

    async fn count_by_post(&self, post_id: Snowflake) -> RepoResult<i64>;

    async fn create(&self, comment: &Comment) -> RepoResult<()>;

    async fn update(&self, comment: &Comment) -> RepoResult<()>;

    async fn delete(&self, id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Tier Repository
// ============================================================================

#[async_trait]
pub trait TierRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Tier>>;

    async fn find_by_ids(&self, ids: &[Snowflake]) -> RepoResult<Vec<Tier>>;

    /// A creator's tiers ordered by `(order, price)`
    async fn find_by_creator(&self, creator_id: Snowflake) -> RepoResult<Vec<Tier>>;

    /// Insert unless the creator already owns `max` tiers (atomic)
    async fn create_within_limit(&self, tier: &Tier, max: usize) -> RepoResult<()>;

    /// Update, re-checking the per-creator cap with this tier excluded (atomic)
    async fn update_within_limit(&self, tier: &Tier, max: usize) -> RepoResult<()>;

    /// Delete a tier and, by cascade, its subscriptions
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;

    /// Number of subscriptions to the tier with `is_active = true`
    async fn subscriber_count(&self, tier_id: Snowflake) -> RepoResult<i64>;
}

// ============================================================================
// Tier Subscription Repository
// ============================================================================

#[async_trait]
pub trait TierSubscriptionRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<TierSubscription>>;

    /// All subscriptions held by a user, newest first
    async fn find_by_subscriber(&self, subscriber_id: Snowflake) -> RepoResult<Vec<TierSubscription>>;

    /// All subscriptions to a tier, newest first
    async fn find_by_tier(&self, tier_id: Snowflake) -> RepoResult<Vec<TierSubscription>>;

    /// Insert unless the subscriber already has effective access to the tier
    /// at `now`; fails with `AlreadySubscribed` (atomic)
    async fn create_unless_subscribed(
        &self,
        subscription: &TierSubscription,
        now: DateTime<Utc>,
    ) -> RepoResult<()>;

    /// Persist `is_active` and `cancelled_at` changes
    async fn update(&self, subscription: &TierSubscription) -> RepoResult<()>;
}

// ============================================================================
// Follow Repository
// ============================================================================

#[async_trait]
pub trait FollowRepository: Send + Sync {
    async fn find(
        &self,
        subscriber_id: Snowflake,
        creator_id: Snowflake,
    ) -> RepoResult<Option<FollowSubscription>>;

    /// Follows held by a user, newest first
    async fn find_by_subscriber(&self, subscriber_id: Snowflake) -> RepoResult<Vec<FollowSubscription>>;

    /// Followers of a creator profile, newest first
    async fn find_by_creator(&self, creator_id: Snowflake) -> RepoResult<Vec<FollowSubscription>>;

    /// Create a follow; an existing pair fails with `AlreadyFollowing`
    async fn create(&self, follow: &FollowSubscription) -> RepoResult<()>;

    /// Remove a follow; a missing pair fails with `NotFollowing`
    async fn delete(&self, subscriber_id: Snowflake, creator_id: Snowflake) -> RepoResult<()>;

    async fn count_followers(&self, creator_id: Snowflake) -> RepoResult<i64>;

    async fn count_following(&self, subscriber_id: Snowflake) -> RepoResult<i64>;
}
