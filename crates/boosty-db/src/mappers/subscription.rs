//! TierSubscription entity <-> model mapper

use boosty_core::entities::{PaymentStatus, TierSubscription};
use boosty_core::error::DomainError;
use boosty_core::value_objects::Snowflake;

use crate::models::TierSubscriptionModel;

impl TryFrom<TierSubscriptionModel> for TierSubscription {
    type Error = DomainError;

    fn try_from(model: TierSubscriptionModel) -> Result<Self, Self::Error> {
        let payment_status: PaymentStatus = model.payment_status.parse().map_err(|_| {
            DomainError::DatabaseError(format!("Invalid payment status: {}", model.payment_status))
        })?;

        Ok(TierSubscription {
            id: Snowflake::new(model.id),
            subscriber_id: Snowflake::new(model.subscriber_id),
            tier_id: Snowflake::new(model.tier_id),
            is_active: model.is_active,
            start_date: model.start_date,
            end_date: model.end_date,
            cancelled_at: model.cancelled_at,
            payment_status,
            transaction_id: model.transaction_id,
            created_at: model.created_at,
        })
    }
}

/// Subscription entity flattened for insert
pub struct SubscriptionInsert<'a> {
    pub id: i64,
    pub subscriber_id: i64,
    pub tier_id: i64,
    pub payment_status: &'static str,
    pub transaction_id: Option<&'a str>,
}

impl<'a> SubscriptionInsert<'a> {
    pub fn new(sub: &'a TierSubscription) -> Self {
        Self {
            id: sub.id.into_inner(),
            subscriber_id: sub.subscriber_id.into_inner(),
            tier_id: sub.tier_id.into_inner(),
            payment_status: sub.payment_status.as_str(),
            transaction_id: sub.transaction_id.as_deref(),
        }
    }
}
