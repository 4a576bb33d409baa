//! Tier database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for tiers table
#[derive(Debug, Clone, FromRow)]
pub struct TierModel {
    pub id: i64,
    pub creator_id: i64,
    pub name: String,
    pub description: String,
    pub price_cents: i64,
    pub sort_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
