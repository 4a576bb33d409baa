//! Tier service
//!
//! Creators manage up to [`Tier::MAX_PER_CREATOR`] priced tiers. The limit
//! and name checks run here for a clear error and again inside the store's
//! atomic write.

use chrono::Utc;
use tracing::{info, instrument};
use validator::Validate;

use boosty_core::access::{
    authorize_mutation, require_creator, validate_tier_insert, validate_tier_name, MutationAction,
    MutationTarget,
};
use boosty_core::{DomainError, Price, Snowflake, Tier};

use crate::dto::{CreateTierRequest, TierResponse, TierWithCount, UpdateTierRequest};

use super::access::AccessService;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

fn parse_price(amount: &str) -> Result<Price, DomainError> {
    Price::parse(amount).map_err(|e| DomainError::InvalidPrice(e.to_string()))
}

/// Tier service
pub struct TierService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> TierService<'a> {
    /// Create a new TierService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a tier for the caller's creator profile
    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create_tier(
        &self,
        user_id: Option<Snowflake>,
        request: CreateTierRequest,
    ) -> ServiceResult<TierResponse> {
        request.validate()?;
        let (_, profile) = AccessService::new(self.ctx).require_actor(user_id).await?;
        require_creator(&profile)?;

        let existing = self.ctx.tier_repo().find_by_creator(profile.id).await?;
        validate_tier_insert(&existing, None)?;
        validate_tier_name(&existing, &request.name, None)?;

        let mut tier = Tier::new(
            self.ctx.generate_id(),
            profile.id,
            request.name,
            request.description,
            parse_price(&request.price)?,
        );
        tier.order = request.order;
        tier.is_active = request.is_active;

        self.ctx
            .tier_repo()
            .create_within_limit(&tier, Tier::MAX_PER_CREATOR)
            .await?;

        info!(tier_id = %tier.id, creator_id = %tier.creator_id, price = %tier.price, "Tier created");
        Ok(TierResponse::from(&tier))
    }

    /// Edit a tier; only its creator may
    #[instrument(skip(self, request))]
    pub async fn update_tier(
        &self,
        user_id: Option<Snowflake>,
        tier_id: Snowflake,
        request: UpdateTierRequest,
    ) -> ServiceResult<TierResponse> {
        request.validate()?;
        let (actor, _) = AccessService::new(self.ctx).require_actor(user_id).await?;

        let mut tier = self.find_tier(tier_id).await?;
        authorize_mutation(Some(&actor), MutationTarget::Tier(&tier), MutationAction::Update)?;

        let existing = self.ctx.tier_repo().find_by_creator(tier.creator_id).await?;
        validate_tier_insert(&existing, Some(tier.id))?;

        if let Some(name) = request.name {
            validate_tier_name(&existing, &name, Some(tier.id))?;
            tier.name = name;
        }
        if let Some(description) = request.description {
            tier.description = description;
        }
        if let Some(price) = request.price {
            tier.price = parse_price(&price)?;
        }
        if let Some(order) = request.order {
            tier.order = order;
        }
        if let Some(is_active) = request.is_active {
            tier.is_active = is_active;
        }
        tier.updated_at = Utc::now();

        self.ctx
            .tier_repo()
            .update_within_limit(&tier, Tier::MAX_PER_CREATOR)
            .await?;

        info!(tier_id = %tier.id, "Tier updated");
        Ok(TierResponse::from(&tier))
    }

    /// Delete a tier and its subscriptions; only its creator may
    #[instrument(skip(self))]
    pub async fn delete_tier(&self, user_id: Option<Snowflake>, tier_id: Snowflake) -> ServiceResult<()> {
        let (actor, _) = AccessService::new(self.ctx).require_actor(user_id).await?;

        let tier = self.find_tier(tier_id).await?;
        authorize_mutation(Some(&actor), MutationTarget::Tier(&tier), MutationAction::Delete)?;

        self.ctx.tier_repo().delete(tier.id).await?;
        info!(tier_id = %tier.id, creator_id = %tier.creator_id, "Tier deleted");
        Ok(())
    }

    /// Get a tier by id
    #[instrument(skip(self))]
    pub async fn get_tier(&self, tier_id: Snowflake) -> ServiceResult<TierResponse> {
        let tier = self.find_tier(tier_id).await?;
        Ok(TierResponse::from(&tier))
    }

    /// A creator's tiers ordered by `(order, price)`
    ///
    /// The creator sees inactive tiers and subscriber counts as well;
    /// everyone else only sees active tiers.
    #[instrument(skip(self))]
    pub async fn list_tiers(
        &self,
        user_id: Option<Snowflake>,
        creator_id: Snowflake,
    ) -> ServiceResult<Vec<TierResponse>> {
        let creator = self
            .ctx
            .profile_repo()
            .find_by_id(creator_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Profile", creator_id.to_string()))?;

        let mut tiers = self.ctx.tier_repo().find_by_creator(creator.id).await?;
        tiers.sort_by_key(Tier::display_key);

        if user_id.is_some_and(|id| creator.is_owned_by(id)) {
            let mut responses = Vec::with_capacity(tiers.len());
            for tier in tiers {
                let subscriber_count = self.ctx.tier_repo().subscriber_count(tier.id).await?;
                responses.push(TierResponse::from(&TierWithCount { tier, subscriber_count }));
            }
            return Ok(responses);
        }

        Ok(tiers
            .iter()
            .filter(|tier| tier.is_active)
            .map(TierResponse::from)
            .collect())
    }

    /// Number of active subscriptions to a tier
    #[instrument(skip(self))]
    pub async fn subscriber_count(&self, tier_id: Snowflake) -> ServiceResult<i64> {
        let tier = self.find_tier(tier_id).await?;
        Ok(self.ctx.tier_repo().subscriber_count(tier.id).await?)
    }

    async fn find_tier(&self, tier_id: Snowflake) -> ServiceResult<Tier> {
        self.ctx
            .tier_repo()
            .find_by_id(tier_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Tier", tier_id.to_string()))
    }
}
