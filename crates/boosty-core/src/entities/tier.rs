//! Tier entity - a priced subscription plan owned by a creator

use chrono::{DateTime, Utc};

use crate::value_objects::{Price, Snowflake};

/// Subscription tier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tier {
    pub id: Snowflake,
    /// Owning creator profile
    pub creator_id: Snowflake,
    pub name: String,
    pub description: String,
    /// Monthly price
    pub price: Price,
    /// Display order, lower first
    pub order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Tier {
    /// Maximum number of tiers a single creator may own
    pub const MAX_PER_CREATOR: usize = 10;
    pub const NAME_MAX_LEN: usize = 100;
    pub const DESCRIPTION_MAX_LEN: usize = 1000;

    pub fn new(
        id: Snowflake,
        creator_id: Snowflake,
        name: String,
        description: String,
        price: Price,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            creator_id,
            name,
            description,
            price,
            order: 0,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn is_owned_by(&self, profile_id: Snowflake) -> bool {
        self.creator_id == profile_id
    }

    /// Sort key used for listing a creator's tiers
    pub fn display_key(&self) -> (i32, Price, Snowflake) {
        (self.order, self.price, self.id)
    }
}
