//! Follow service
//!
//! Free follows feed the post feed only; they never unlock paid content.

use tracing::{info, instrument};

use boosty_core::{DomainError, FollowSubscription, Snowflake};

use crate::dto::FollowResponse;

use super::access::AccessService;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Follow service
pub struct FollowService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> FollowService<'a> {
    /// Create a new FollowService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Follow a creator profile
    #[instrument(skip(self))]
    pub async fn follow(
        &self,
        user_id: Option<Snowflake>,
        creator_id: Snowflake,
    ) -> ServiceResult<FollowResponse> {
        let (actor, _) = AccessService::new(self.ctx).require_actor(user_id).await?;

        let creator = self
            .ctx
            .profile_repo()
            .find_by_id(creator_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Profile", creator_id.to_string()))?;
        if creator.is_owned_by(actor.user_id) {
            return Err(DomainError::CannotFollowSelf.into());
        }

        let follow = FollowSubscription::new(self.ctx.generate_id(), actor.user_id, creator.id);
        self.ctx.follow_repo().create(&follow).await?;

        info!(subscriber_id = %actor.user_id, creator_id = %creator.id, "Creator followed");
        Ok(FollowResponse::from(&follow))
    }

    /// Stop following a creator profile
    #[instrument(skip(self))]
    pub async fn unfollow(&self, user_id: Option<Snowflake>, creator_id: Snowflake) -> ServiceResult<()> {
        let user_id = user_id.ok_or(ServiceError::Unauthenticated)?;
        self.ctx.follow_repo().delete(user_id, creator_id).await?;
        info!(subscriber_id = %user_id, creator_id = %creator_id, "Creator unfollowed");
        Ok(())
    }

    /// Whether the caller follows the creator
    #[instrument(skip(self))]
    pub async fn is_following(&self, user_id: Option<Snowflake>, creator_id: Snowflake) -> ServiceResult<bool> {
        let Some(user_id) = user_id else {
            return Ok(false);
        };
        Ok(self.ctx.follow_repo().find(user_id, creator_id).await?.is_some())
    }

    /// Creators the caller follows, newest first
    #[instrument(skip(self))]
    pub async fn following(&self, user_id: Option<Snowflake>) -> ServiceResult<Vec<FollowResponse>> {
        let user_id = user_id.ok_or(ServiceError::Unauthenticated)?;
        let follows = self.ctx.follow_repo().find_by_subscriber(user_id).await?;
        Ok(follows.iter().map(FollowResponse::from).collect())
    }

    /// Followers of a creator, newest first
    #[instrument(skip(self))]
    pub async fn followers(&self, creator_id: Snowflake) -> ServiceResult<Vec<FollowResponse>> {
        let follows = self.ctx.follow_repo().find_by_creator(creator_id).await?;
        Ok(follows.iter().map(FollowResponse::from).collect())
    }
}
