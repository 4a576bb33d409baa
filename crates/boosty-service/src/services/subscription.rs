//! Subscription service
//!
//! Tier subscription lifecycle: subscribe (with payment), cancel,
//! deactivate. State is derived from the stored dates on every read.

use chrono::Utc;
use tracing::{info, instrument, warn};

use boosty_core::access::{authorize_mutation, MutationAction, MutationTarget};
use boosty_core::{DomainError, Snowflake, Tier, TierSubscription};

use crate::dto::{SubscriptionAt, SubscriptionResponse};

use super::access::AccessService;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Subscription service
pub struct SubscriptionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SubscriptionService<'a> {
    /// Create a new SubscriptionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Subscribe the caller to a tier for one billing period
    #[instrument(skip(self))]
    pub async fn subscribe(
        &self,
        user_id: Option<Snowflake>,
        tier_id: Snowflake,
    ) -> ServiceResult<SubscriptionResponse> {
        let (actor, _) = AccessService::new(self.ctx).require_actor(user_id).await?;
        let tier = self.find_tier(tier_id).await?;

        if !tier.is_active {
            return Err(DomainError::TierInactive.into());
        }
        if tier.is_owned_by(actor.profile_id) {
            return Err(DomainError::CannotSubscribeToSelf.into());
        }

        let now = Utc::now();

        // Checked before charging; the store re-checks atomically on insert
        let current = self.ctx.subscription_repo().find_by_subscriber(actor.user_id).await?;
        if current
            .iter()
            .any(|sub| sub.tier_id == tier.id && sub.has_effective_access_at(now))
        {
            return Err(DomainError::AlreadySubscribed.into());
        }

        let receipt = self.ctx.payment_gateway().charge(actor.user_id, &tier).await?;
        if !receipt.is_completed() {
            warn!(tier_id = %tier.id, status = %receipt.status, "Payment not completed");
            return Err(DomainError::PaymentError(format!("payment {}", receipt.status)).into());
        }

        let mut subscription =
            TierSubscription::new(self.ctx.generate_id(), actor.user_id, tier.id, now, None);
        subscription.record_payment(receipt.status, receipt.transaction_id);

        self.ctx
            .subscription_repo()
            .create_unless_subscribed(&subscription, now)
            .await?;

        info!(
            subscription_id = %subscription.id,
            subscriber_id = %subscription.subscriber_id,
            tier_id = %tier.id,
            end_date = %subscription.end_date,
            "Subscription created"
        );

        Ok(SubscriptionResponse::from(&SubscriptionAt { subscription, now }))
    }

    /// Cancel the caller's subscription; access continues until it expires
    #[instrument(skip(self))]
    pub async fn cancel(
        &self,
        user_id: Option<Snowflake>,
        subscription_id: Snowflake,
    ) -> ServiceResult<SubscriptionResponse> {
        let (actor, _) = AccessService::new(self.ctx).require_actor(user_id).await?;

        let mut subscription = self.find_subscription(subscription_id).await?;
        authorize_mutation(
            Some(&actor),
            MutationTarget::Subscription(&subscription),
            MutationAction::Cancel,
        )?;

        if subscription.is_cancelled() {
            return Err(DomainError::AlreadyCancelled.into());
        }

        let now = Utc::now();
        subscription.cancel_at(now);
        self.ctx.subscription_repo().update(&subscription).await?;

        info!(
            subscription_id = %subscription.id,
            access_until = %subscription.end_date,
            "Subscription cancelled"
        );

        Ok(SubscriptionResponse::from(&SubscriptionAt { subscription, now }))
    }

    /// Revoke a subscription immediately
    ///
    /// Operator action, not offered to subscribers.
    #[instrument(skip(self))]
    pub async fn deactivate(&self, subscription_id: Snowflake) -> ServiceResult<SubscriptionResponse> {
        let mut subscription = self.find_subscription(subscription_id).await?;

        subscription.deactivate();
        self.ctx.subscription_repo().update(&subscription).await?;

        info!(subscription_id = %subscription.id, "Subscription deactivated");
        Ok(SubscriptionResponse::from(&SubscriptionAt {
            subscription,
            now: Utc::now(),
        }))
    }

    /// Get one of the caller's subscriptions
    #[instrument(skip(self))]
    pub async fn get_subscription(
        &self,
        user_id: Option<Snowflake>,
        subscription_id: Snowflake,
    ) -> ServiceResult<SubscriptionResponse> {
        let user_id = user_id.ok_or(ServiceError::Unauthenticated)?;
        let subscription = self.find_subscription(subscription_id).await?;

        // Other people's subscriptions are not disclosed
        if subscription.subscriber_id != user_id {
            return Err(ServiceError::not_found("Subscription", subscription_id.to_string()));
        }

        Ok(SubscriptionResponse::from(&SubscriptionAt {
            subscription,
            now: Utc::now(),
        }))
    }

    /// The caller's subscriptions, newest first
    #[instrument(skip(self))]
    pub async fn my_subscriptions(
        &self,
        user_id: Option<Snowflake>,
    ) -> ServiceResult<Vec<SubscriptionResponse>> {
        let user_id = user_id.ok_or(ServiceError::Unauthenticated)?;
        let subscriptions = self.ctx.subscription_repo().find_by_subscriber(user_id).await?;
        Ok(Self::at_now(subscriptions))
    }

    /// Subscriptions to one tier, visible to its creator only
    #[instrument(skip(self))]
    pub async fn tier_subscribers(
        &self,
        user_id: Option<Snowflake>,
        tier_id: Snowflake,
    ) -> ServiceResult<Vec<SubscriptionResponse>> {
        let (actor, _) = AccessService::new(self.ctx).require_actor(user_id).await?;
        let tier = self.find_tier(tier_id).await?;

        if !tier.is_owned_by(actor.profile_id) {
            return Err(ServiceError::forbidden(
                "Only the tier's creator can list its subscribers",
            ));
        }

        let subscriptions = self.ctx.subscription_repo().find_by_tier(tier.id).await?;
        Ok(Self::at_now(subscriptions))
    }

    fn at_now(mut subscriptions: Vec<TierSubscription>) -> Vec<SubscriptionResponse> {
        let now = Utc::now();
        subscriptions.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        subscriptions
            .into_iter()
            .map(|subscription| SubscriptionResponse::from(&SubscriptionAt { subscription, now }))
            .collect()
    }

    async fn find_tier(&self, tier_id: Snowflake) -> ServiceResult<Tier> {
        self.ctx
            .tier_repo()
            .find_by_id(tier_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Tier", tier_id.to_string()))
    }

    async fn find_subscription(&self, subscription_id: Snowflake) -> ServiceResult<TierSubscription> {
        self.ctx
            .subscription_repo()
            .find_by_id(subscription_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Subscription", subscription_id.to_string()))
    }
}
