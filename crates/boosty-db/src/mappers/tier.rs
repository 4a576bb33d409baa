//! Tier entity <-> model mapper

use boosty_core::entities::Tier;
use boosty_core::error::DomainError;
use boosty_core::value_objects::{Price, Snowflake};

use crate::models::TierModel;

impl TryFrom<TierModel> for Tier {
    type Error = DomainError;

    fn try_from(model: TierModel) -> Result<Self, Self::Error> {
        let price = Price::from_cents(model.price_cents)
            .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        Ok(Tier {
            id: Snowflake::new(model.id),
            creator_id: Snowflake::new(model.creator_id),
            name: model.name,
            description: model.description,
            price,
            order: model.sort_order,
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

/// Tier entity flattened for insert/update
pub struct TierInsert<'a> {
    pub id: i64,
    pub creator_id: i64,
    pub name: &'a str,
    pub description: &'a str,
    pub price_cents: i64,
    pub sort_order: i32,
    pub is_active: bool,
}

impl<'a> TierInsert<'a> {
    pub fn new(tier: &'a Tier) -> Self {
        Self {
            id: tier.id.into_inner(),
            creator_id: tier.creator_id.into_inner(),
            name: &tier.name,
            description: &tier.description,
            price_cents: tier.price.cents(),
            sort_order: tier.order,
            is_active: tier.is_active,
        }
    }
}
