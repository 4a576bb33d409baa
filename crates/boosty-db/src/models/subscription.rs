//! Tier subscription database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for tier_subscriptions table
#[derive(Debug, Clone, FromRow)]
pub struct TierSubscriptionModel {
    pub id: i64,
    pub subscriber_id: i64,
    pub tier_id: i64,
    pub is_active: bool,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub payment_status: String,
    pub transaction_id: Option<String>,
    pub created_at: DateTime<Utc>,
}
