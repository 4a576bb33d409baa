//! In-memory entity store
//!
//! Implements every repository trait over one set of tables behind a single
//! lock, so the atomic check-and-write primitives hold exactly as they do in
//! PostgreSQL. Cascades mirror the SQL schema.

use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use boosty_core::traits::{
    CategoryRepository, CommentRepository, FollowRepository, PostQuery, PostRepository,
    ProfileRepository, RepoResult, TierRepository, TierSubscriptionRepository, UserRepository,
};
use boosty_core::{
    Category, Comment, DomainError, FollowSubscription, Post, PostStatus, Profile, Snowflake,
    Tier, TierSubscription, User,
};

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<Snowflake, User>,
    profiles: BTreeMap<Snowflake, Profile>,
    categories: BTreeMap<Snowflake, Category>,
    posts: BTreeMap<Snowflake, Post>,
    comments: BTreeMap<Snowflake, Comment>,
    tiers: BTreeMap<Snowflake, Tier>,
    subscriptions: BTreeMap<Snowflake, TierSubscription>,
    follows: BTreeMap<Snowflake, FollowSubscription>,
}

impl Tables {
    fn tier_count(&self, creator_id: Snowflake, excluding: Option<Snowflake>) -> usize {
        self.tiers
            .values()
            .filter(|t| t.creator_id == creator_id && Some(t.id) != excluding)
            .count()
    }

    fn tier_name_taken(&self, tier: &Tier) -> bool {
        self.tiers
            .values()
            .any(|t| t.creator_id == tier.creator_id && t.id != tier.id && t.name == tier.name)
    }
}

fn newest_first<T>(items: &mut [T], key: impl Fn(&T) -> (DateTime<Utc>, Snowflake)) {
    items.sort_by_key(|item| {
        let (created_at, id) = key(item);
        (Reverse(created_at), id)
    });
}

/// Shared in-memory store; clones see the same data
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move a subscription's end date, e.g. into the past to simulate expiry
    pub fn set_subscription_end(&self, subscription_id: Snowflake, end_date: DateTime<Utc>) -> bool {
        let mut tables = self.tables.lock();
        match tables.subscriptions.get_mut(&subscription_id) {
            Some(sub) => {
                sub.end_date = end_date;
                true
            }
            None => false,
        }
    }

    /// Snapshot of a stored post, bypassing access rules
    pub fn post(&self, post_id: Snowflake) -> Option<Post> {
        self.tables.lock().posts.get(&post_id).cloned()
    }

    /// Snapshot of a stored subscription
    pub fn subscription(&self, subscription_id: Snowflake) -> Option<TierSubscription> {
        self.tables.lock().subscriptions.get(&subscription_id).cloned()
    }
}

// ============================================================================
// Users and profiles
// ============================================================================

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>> {
        Ok(self.tables.lock().users.get(&id).cloned())
    }

    async fn create(&self, user: &User) -> RepoResult<()> {
        self.tables.lock().users.insert(user.id, user.clone());
        Ok(())
    }
}

#[async_trait]
impl ProfileRepository for InMemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Profile>> {
        Ok(self.tables.lock().profiles.get(&id).cloned())
    }

    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Option<Profile>> {
        let tables = self.tables.lock();
        Ok(tables.profiles.values().find(|p| p.user_id == user_id).cloned())
    }

    async fn create_if_absent(&self, profile: &Profile) -> RepoResult<Profile> {
        let mut tables = self.tables.lock();
        if let Some(existing) = tables.profiles.values().find(|p| p.user_id == profile.user_id) {
            return Ok(existing.clone());
        }
        if !tables.users.contains_key(&profile.user_id) {
            return Err(DomainError::UserNotFound(profile.user_id));
        }
        tables.profiles.insert(profile.id, profile.clone());
        Ok(profile.clone())
    }

    async fn update(&self, profile: &Profile) -> RepoResult<()> {
        let mut tables = self.tables.lock();
        match tables.profiles.get_mut(&profile.id) {
            Some(stored) => {
                *stored = profile.clone();
                Ok(())
            }
            None => Err(DomainError::ProfileNotFound(profile.id)),
        }
    }

    async fn find_creators(&self, category_id: Option<Snowflake>) -> RepoResult<Vec<Profile>> {
        let tables = self.tables.lock();
        let mut creators: Vec<Profile> = tables
            .profiles
            .values()
            .filter(|p| p.is_creator)
            .filter(|p| match category_id {
                None => true,
                Some(category_id) => tables.posts.values().any(|post| {
                    post.author_id == p.user_id
                        && post.is_published()
                        && post.category_id == Some(category_id)
                }),
            })
            .cloned()
            .collect();
        newest_first(&mut creators, |p| (p.created_at, p.id));
        Ok(creators)
    }
}

// ============================================================================
// Categories
// ============================================================================

#[async_trait]
impl CategoryRepository for InMemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Category>> {
        Ok(self.tables.lock().categories.get(&id).cloned())
    }

    async fn find_all(&self) -> RepoResult<Vec<Category>> {
        let mut categories: Vec<Category> =
            self.tables.lock().categories.values().cloned().collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn create(&self, category: &Category) -> RepoResult<()> {
        let mut tables = self.tables.lock();
        if tables.categories.values().any(|c| c.name == category.name) {
            return Err(DomainError::DuplicateCategoryName(category.name.clone()));
        }
        tables.categories.insert(category.id, category.clone());
        Ok(())
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let mut tables = self.tables.lock();
        if tables.categories.remove(&id).is_none() {
            return Err(DomainError::CategoryNotFound(id));
        }
        for post in tables.posts.values_mut() {
            if post.category_id == Some(id) {
                post.category_id = None;
            }
        }
        Ok(())
    }
}

// ============================================================================
// Posts and comments
// ============================================================================

#[async_trait]
impl PostRepository for InMemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Post>> {
        Ok(self.tables.lock().posts.get(&id).cloned())
    }

    async fn find_by_ids(&self, ids: &[Snowflake]) -> RepoResult<Vec<Post>> {
        let tables = self.tables.lock();
        Ok(ids.iter().filter_map(|id| tables.posts.get(id).cloned()).collect())
    }

    async fn find_by_author(
        &self,
        author_id: Snowflake,
        status: Option<PostStatus>,
    ) -> RepoResult<Vec<Post>> {
        let tables = self.tables.lock();
        let mut posts: Vec<Post> = tables
            .posts
            .values()
            .filter(|p| p.author_id == author_id && status.is_none_or(|s| p.status == s))
            .cloned()
            .collect();
        newest_first(&mut posts, |p| (p.created_at, p.id));
        Ok(posts)
    }

    async fn find_published(&self, query: PostQuery) -> RepoResult<Vec<Post>> {
        let tables = self.tables.lock();
        let mut posts: Vec<Post> = tables
            .posts
            .values()
            .filter(|p| p.is_published())
            .filter(|p| query.category_id.is_none_or(|c| p.category_id == Some(c)))
            .filter(|p| query.author_id.is_none_or(|a| p.author_id == a))
            .cloned()
            .collect();
        newest_first(&mut posts, |p| (p.created_at, p.id));
        Ok(posts)
    }

    async fn find_published_by_authors(&self, author_ids: &[Snowflake]) -> RepoResult<Vec<Post>> {
        let tables = self.tables.lock();
        let mut posts: Vec<Post> = tables
            .posts
            .values()
            .filter(|p| p.is_published() && author_ids.contains(&p.author_id))
            .cloned()
            .collect();
        newest_first(&mut posts, |p| (p.created_at, p.id));
        Ok(posts)
    }

    async fn create(&self, post: &Post) -> RepoResult<()> {
        let mut tables = self.tables.lock();
        if let Some(category_id) = post.category_id {
            if !tables.categories.contains_key(&category_id) {
                return Err(DomainError::CategoryNotFound(category_id));
            }
        }
        tables.posts.insert(post.id, post.clone());
        Ok(())
    }

    async fn update(&self, post: &Post) -> RepoResult<()> {
        let mut tables = self.tables.lock();
        match tables.posts.get_mut(&post.id) {
            Some(stored) => {
                *stored = post.clone();
                Ok(())
            }
            None => Err(DomainError::PostNotFound(post.id)),
        }
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let mut tables = self.tables.lock();
        if tables.posts.remove(&id).is_none() {
            return Err(DomainError::PostNotFound(id));
        }
        tables.comments.retain(|_, c| c.post_id != id);
        Ok(())
    }
}

#[async_trait]
impl CommentRepository for InMemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Comment>> {
        Ok(self.tables.lock().comments.get(&id).cloned())
    }

    async fn find_by_post(&self, post_id: Snowflake) -> RepoResult<Vec<Comment>> {
        let tables = self.tables.lock();
        let mut comments: Vec<Comment> = tables
            .comments
            .values()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect();
        comments.sort_by_key(|c| (c.created_at, c.id));
        Ok(comments)
    }

    async fn find_all(&self) -> RepoResult<Vec<Comment>> {
        let mut comments: Vec<Comment> = self.tables.lock().comments.values().cloned().collect();
        comments.sort_by_key(|c| (c.created_at, c.id));
        Ok(comments)
    }

    async fn find_on_posts_by(&self, author_id: Snowflake, limit: i64) -> RepoResult<Vec<Comment>> {
        let tables = self.tables.lock();
        let mut comments: Vec<Comment> = tables
            .comments
            .values()
            .filter(|c| {
                tables
                    .posts
                    .get(&c.post_id)
                    .is_some_and(|p| p.author_id == author_id)
            })
            .cloned()
            .collect();
        newest_first(&mut comments, |c| (c.created_at, c.id));
        comments.truncate(limit.clamp(1, 100) as usize);
        Ok(comments)
    }

    async fn count_by_post(&self, post_id: Snowflake) -> RepoResult<i64> {
        let tables = self.tables.lock();
        Ok(tables.comments.values().filter(|c| c.post_id == post_id).count() as i64)
    }

    async fn create(&self, comment: &Comment) -> RepoResult<()> {
        let mut tables = self.tables.lock();
        if !tables.posts.contains_key(&comment.post_id) {
            return Err(DomainError::PostNotFound(comment.post_id));
        }
        tables.comments.insert(comment.id, comment.clone());
        Ok(())
    }

    async fn update(&self, comment: &Comment) -> RepoResult<()> {
        let mut tables = self.tables.lock();
        match tables.comments.get_mut(&comment.id) {
            Some(stored) => {
                *stored = comment.clone();
                Ok(())
            }
            None => Err(DomainError::CommentNotFound(comment.id)),
        }
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        match self.tables.lock().comments.remove(&id) {
            Some(_) => Ok(()),
            None => Err(DomainError::CommentNotFound(id)),
        }
    }
}

// ============================================================================
// Tiers and subscriptions
// ============================================================================

#[async_trait]
impl TierRepository for InMemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Tier>> {
        Ok(self.tables.lock().tiers.get(&id).cloned())
    }

    async fn find_by_ids(&self, ids: &[Snowflake]) -> RepoResult<Vec<Tier>> {
        let tables = self.tables.lock();
        let mut tiers: Vec<Tier> = ids.iter().filter_map(|id| tables.tiers.get(id).cloned()).collect();
        tiers.sort_by_key(Tier::display_key);
        Ok(tiers)
    }

    async fn find_by_creator(&self, creator_id: Snowflake) -> RepoResult<Vec<Tier>> {
        let tables = self.tables.lock();
        let mut tiers: Vec<Tier> = tables
            .tiers
            .values()
            .filter(|t| t.creator_id == creator_id)
            .cloned()
            .collect();
        tiers.sort_by_key(Tier::display_key);
        Ok(tiers)
    }

    async fn create_within_limit(&self, tier: &Tier, max: usize) -> RepoResult<()> {
        let mut tables = self.tables.lock();
        if !tables.profiles.contains_key(&tier.creator_id) {
            return Err(DomainError::ProfileNotFound(tier.creator_id));
        }
        if tables.tier_count(tier.creator_id, None) >= max {
            return Err(DomainError::TierLimitExceeded { max });
        }
        if tables.tier_name_taken(tier) {
            return Err(DomainError::DuplicateTierName(tier.name.clone()));
        }
        tables.tiers.insert(tier.id, tier.clone());
        Ok(())
    }

    async fn update_within_limit(&self, tier: &Tier, max: usize) -> RepoResult<()> {
        let mut tables = self.tables.lock();
        if tables.tier_count(tier.creator_id, Some(tier.id)) >= max {
            return Err(DomainError::TierLimitExceeded { max });
        }
        if tables.tier_name_taken(tier) {
            return Err(DomainError::DuplicateTierName(tier.name.clone()));
        }
        match tables.tiers.get_mut(&tier.id) {
            Some(stored) => {
                *stored = tier.clone();
                Ok(())
            }
            None => Err(DomainError::TierNotFound(tier.id)),
        }
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let mut tables = self.tables.lock();
        if tables.tiers.remove(&id).is_none() {
            return Err(DomainError::TierNotFound(id));
        }
        tables.subscriptions.retain(|_, s| s.tier_id != id);
        for post in tables.posts.values_mut() {
            post.tier_ids.remove(&id);
        }
        Ok(())
    }

    async fn subscriber_count(&self, tier_id: Snowflake) -> RepoResult<i64> {
        let tables = self.tables.lock();
        Ok(tables
            .subscriptions
            .values()
            .filter(|s| s.tier_id == tier_id && s.is_active)
            .count() as i64)
    }
}

#[async_trait]
impl TierSubscriptionRepository for InMemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<TierSubscription>> {
        Ok(self.tables.lock().subscriptions.get(&id).cloned())
    }

    async fn find_by_subscriber(&self, subscriber_id: Snowflake) -> RepoResult<Vec<TierSubscription>> {
        let tables = self.tables.lock();
        let mut subs: Vec<TierSubscription> = tables
            .subscriptions
            .values()
            .filter(|s| s.subscriber_id == subscriber_id)
            .cloned()
            .collect();
        newest_first(&mut subs, |s| (s.created_at, s.id));
        Ok(subs)
    }

    async fn find_by_tier(&self, tier_id: Snowflake) -> RepoResult<Vec<TierSubscription>> {
        let tables = self.tables.lock();
        let mut subs: Vec<TierSubscription> = tables
            .subscriptions
            .values()
            .filter(|s| s.tier_id == tier_id)
            .cloned()
            .collect();
        newest_first(&mut subs, |s| (s.created_at, s.id));
        Ok(subs)
    }

    async fn create_unless_subscribed(
        &self,
        subscription: &TierSubscription,
        now: DateTime<Utc>,
    ) -> RepoResult<()> {
        let mut tables = self.tables.lock();
        if !tables.tiers.contains_key(&subscription.tier_id) {
            return Err(DomainError::TierNotFound(subscription.tier_id));
        }
        let duplicate = tables.subscriptions.values().any(|s| {
            s.subscriber_id == subscription.subscriber_id
                && s.tier_id == subscription.tier_id
                && s.has_effective_access_at(now)
        });
        if duplicate {
            return Err(DomainError::AlreadySubscribed);
        }
        tables.subscriptions.insert(subscription.id, subscription.clone());
        Ok(())
    }

    async fn update(&self, subscription: &TierSubscription) -> RepoResult<()> {
        let mut tables = self.tables.lock();
        match tables.subscriptions.get_mut(&subscription.id) {
            Some(stored) => {
                stored.is_active = subscription.is_active;
                stored.cancelled_at = subscription.cancelled_at;
                Ok(())
            }
            None => Err(DomainError::SubscriptionNotFound(subscription.id)),
        }
    }
}

// ============================================================================
// Follows
// ============================================================================

#[async_trait]
impl FollowRepository for InMemoryStore {
    async fn find(
        &self,
        subscriber_id: Snowflake,
        creator_id: Snowflake,
    ) -> RepoResult<Option<FollowSubscription>> {
        let tables = self.tables.lock();
        Ok(tables
            .follows
            .values()
            .find(|f| f.subscriber_id == subscriber_id && f.creator_id == creator_id)
            .cloned())
    }

    async fn find_by_subscriber(&self, subscriber_id: Snowflake) -> RepoResult<Vec<FollowSubscription>> {
        let tables = self.tables.lock();
        let mut follows: Vec<FollowSubscription> = tables
            .follows
            .values()
            .filter(|f| f.subscriber_id == subscriber_id)
            .cloned()
            .collect();
        newest_first(&mut follows, |f| (f.created_at, f.id));
        Ok(follows)
    }

    async fn find_by_creator(&self, creator_id: Snowflake) -> RepoResult<Vec<FollowSubscription>> {
        let tables = self.tables.lock();
        let mut follows: Vec<FollowSubscription> = tables
            .follows
            .values()
            .filter(|f| f.creator_id == creator_id)
            .cloned()
            .collect();
        newest_first(&mut follows, |f| (f.created_at, f.id));
        Ok(follows)
    }

    async fn create(&self, follow: &FollowSubscription) -> RepoResult<()> {
        let mut tables = self.tables.lock();
        if tables
            .follows
            .values()
            .any(|f| f.subscriber_id == follow.subscriber_id && f.creator_id == follow.creator_id)
        {
            return Err(DomainError::AlreadyFollowing);
        }
        tables.follows.insert(follow.id, follow.clone());
        Ok(())
    }

    async fn delete(&self, subscriber_id: Snowflake, creator_id: Snowflake) -> RepoResult<()> {
        let mut tables = self.tables.lock();
        let before = tables.follows.len();
        tables
            .follows
            .retain(|_, f| !(f.subscriber_id == subscriber_id && f.creator_id == creator_id));
        if tables.follows.len() == before {
            return Err(DomainError::NotFollowing);
        }
        Ok(())
    }

    async fn count_followers(&self, creator_id: Snowflake) -> RepoResult<i64> {
        let tables = self.tables.lock();
        Ok(tables.follows.values().filter(|f| f.creator_id == creator_id).count() as i64)
    }

    async fn count_following(&self, subscriber_id: Snowflake) -> RepoResult<i64> {
        let tables = self.tables.lock();
        Ok(tables
            .follows
            .values()
            .filter(|f| f.subscriber_id == subscriber_id)
            .count() as i64)
    }
}
