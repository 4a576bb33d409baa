//! Service context - dependency container for services
//!
//! Holds all repositories, the payment gateway and the id generator.

use std::sync::Arc;

use boosty_core::traits::{
    CategoryRepository, CommentRepository, FollowRepository, PaymentGateway, PostRepository,
    ProfileRepository, TierRepository, TierSubscriptionRepository, UserRepository,
};
use boosty_core::{Snowflake, SnowflakeGenerator};
use boosty_db::{
    PgCategoryRepository, PgCommentRepository, PgFollowRepository, PgPool, PgPostRepository,
    PgProfileRepository, PgTierRepository, PgTierSubscriptionRepository, PgUserRepository,
};

use crate::payment::StubPaymentGateway;

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// Every service borrows this; repositories are trait objects so the
/// PostgreSQL implementations can be swapped for in-memory ones.
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    user_repo: Arc<dyn UserRepository>,
    profile_repo: Arc<dyn ProfileRepository>,
    category_repo: Arc<dyn CategoryRepository>,
    post_repo: Arc<dyn PostRepository>,
    comment_repo: Arc<dyn CommentRepository>,
    tier_repo: Arc<dyn TierRepository>,
    subscription_repo: Arc<dyn TierSubscriptionRepository>,
    follow_repo: Arc<dyn FollowRepository>,

    // Collaborators
    payment_gateway: Arc<dyn PaymentGateway>,
    snowflake_generator: Arc<SnowflakeGenerator>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        profile_repo: Arc<dyn ProfileRepository>,
        category_repo: Arc<dyn CategoryRepository>,
        post_repo: Arc<dyn PostRepository>,
        comment_repo: Arc<dyn CommentRepository>,
        tier_repo: Arc<dyn TierRepository>,
        subscription_repo: Arc<dyn TierSubscriptionRepository>,
        follow_repo: Arc<dyn FollowRepository>,
        payment_gateway: Arc<dyn PaymentGateway>,
        snowflake_generator: Arc<SnowflakeGenerator>,
    ) -> Self {
        Self {
            user_repo,
            profile_repo,
            category_repo,
            post_repo,
            comment_repo,
            tier_repo,
            subscription_repo,
            follow_repo,
            payment_gateway,
            snowflake_generator,
        }
    }

    /// Wire the PostgreSQL repositories and the stub payment gateway
    pub fn postgres(pool: PgPool, snowflake_generator: Arc<SnowflakeGenerator>) -> Self {
        Self::new(
            Arc::new(PgUserRepository::new(pool.clone())),
            Arc::new(PgProfileRepository::new(pool.clone())),
            Arc::new(PgCategoryRepository::new(pool.clone())),
            Arc::new(PgPostRepository::new(pool.clone())),
            Arc::new(PgCommentRepository::new(pool.clone())),
            Arc::new(PgTierRepository::new(pool.clone())),
            Arc::new(PgTierSubscriptionRepository::new(pool.clone())),
            Arc::new(PgFollowRepository::new(pool)),
            Arc::new(StubPaymentGateway::new()),
            snowflake_generator,
        )
    }

    // === Repositories ===

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the profile repository
    pub fn profile_repo(&self) -> &dyn ProfileRepository {
        self.profile_repo.as_ref()
    }

    /// Get the category repository
    pub fn category_repo(&self) -> &dyn CategoryRepository {
        self.category_repo.as_ref()
    }

    /// Get the post repository
    pub fn post_repo(&self) -> &dyn PostRepository {
        self.post_repo.as_ref()
    }

    /// Get the comment repository
    pub fn comment_repo(&self) -> &dyn CommentRepository {
        self.comment_repo.as_ref()
    }

    /// Get the tier repository
    pub fn tier_repo(&self) -> &dyn TierRepository {
        self.tier_repo.as_ref()
    }

    /// Get the tier subscription repository
    pub fn subscription_repo(&self) -> &dyn TierSubscriptionRepository {
        self.subscription_repo.as_ref()
    }

    /// Get the follow repository
    pub fn follow_repo(&self) -> &dyn FollowRepository {
        self.follow_repo.as_ref()
    }

    // === Collaborators ===

    /// Get the payment gateway
    pub fn payment_gateway(&self) -> &dyn PaymentGateway {
        self.payment_gateway.as_ref()
    }

    /// Get the snowflake ID generator
    pub fn snowflake_generator(&self) -> &SnowflakeGenerator {
        self.snowflake_generator.as_ref()
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> Snowflake {
        self.snowflake_generator.generate()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("payment_gateway", &"dyn PaymentGateway")
            .field("worker_id", &self.snowflake_generator.worker_id())
            .finish()
    }
}

/// Builder for creating ServiceContext with custom implementations
///
/// The payment gateway defaults to [`StubPaymentGateway`]; everything else
/// is required.
#[derive(Default)]
pub struct ServiceContextBuilder {
    user_repo: Option<Arc<dyn UserRepository>>,
    profile_repo: Option<Arc<dyn ProfileRepository>>,
    category_repo: Option<Arc<dyn CategoryRepository>>,
    post_repo: Option<Arc<dyn PostRepository>>,
    comment_repo: Option<Arc<dyn CommentRepository>>,
    tier_repo: Option<Arc<dyn TierRepository>>,
    subscription_repo: Option<Arc<dyn TierSubscriptionRepository>>,
    follow_repo: Option<Arc<dyn FollowRepository>>,
    payment_gateway: Option<Arc<dyn PaymentGateway>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn profile_repo(mut self, repo: Arc<dyn ProfileRepository>) -> Self {
        self.profile_repo = Some(repo);
        self
    }

    pub fn category_repo(mut self, repo: Arc<dyn CategoryRepository>) -> Self {
        self.category_repo = Some(repo);
        self
    }

    pub fn post_repo(mut self, repo: Arc<dyn PostRepository>) -> Self {
        self.post_repo = Some(repo);
        self
    }

    pub fn comment_repo(mut self, repo: Arc<dyn CommentRepository>) -> Self {
        self.comment_repo = Some(repo);
        self
    }

    pub fn tier_repo(mut self, repo: Arc<dyn TierRepository>) -> Self {
        self.tier_repo = Some(repo);
        self
    }

    pub fn subscription_repo(mut self, repo: Arc<dyn TierSubscriptionRepository>) -> Self {
        self.subscription_repo = Some(repo);
        self
    }

    pub fn follow_repo(mut self, repo: Arc<dyn FollowRepository>) -> Self {
        self.follow_repo = Some(repo);
        self
    }

    pub fn payment_gateway(mut self, gateway: Arc<dyn PaymentGateway>) -> Self {
        self.payment_gateway = Some(gateway);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.user_repo.ok_or_else(|| ServiceError::validation("user_repo is required"))?,
            self.profile_repo.ok_or_else(|| ServiceError::validation("profile_repo is required"))?,
            self.category_repo.ok_or_else(|| ServiceError::validation("category_repo is required"))?,
            self.post_repo.ok_or_else(|| ServiceError::validation("post_repo is required"))?,
            self.comment_repo.ok_or_else(|| ServiceError::validation("comment_repo is required"))?,
            self.tier_repo.ok_or_else(|| ServiceError::validation("tier_repo is required"))?,
            self.subscription_repo
                .ok_or_else(|| ServiceError::validation("subscription_repo is required"))?,
            self.follow_repo.ok_or_else(|| ServiceError::validation("follow_repo is required"))?,
            self.payment_gateway
                .unwrap_or_else(|| Arc::new(StubPaymentGateway::new())),
            self.snowflake_generator
                .ok_or_else(|| ServiceError::validation("snowflake_generator is required"))?,
        ))
    }
}
