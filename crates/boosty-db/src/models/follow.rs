//! Follow subscription database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for follow_subscriptions table
#[derive(Debug, Clone, FromRow)]
pub struct FollowSubscriptionModel {
    pub id: i64,
    pub subscriber_id: i64,
    pub creator_id: i64,
    pub created_at: DateTime<Utc>,
}
