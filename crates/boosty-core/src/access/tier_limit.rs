//! Tier limit guard

use crate::entities::Tier;
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Check that one more tier fits under the per-creator cap
///
/// `existing` holds the creator's current tiers. On update, pass the tier's
/// own id as `excluding` so it does not count against itself.
pub fn validate_tier_insert(existing: &[Tier], excluding: Option<Snowflake>) -> Result<(), DomainError> {
    let count = existing
        .iter()
        .filter(|tier| Some(tier.id) != excluding)
        .count();
    if count >= Tier::MAX_PER_CREATOR {
        return Err(DomainError::TierLimitExceeded {
            max: Tier::MAX_PER_CREATOR,
        });
    }
    Ok(())
}

/// Check that `name` is not taken by another of the creator's tiers
pub fn validate_tier_name(
    existing: &[Tier],
    name: &str,
    excluding: Option<Snowflake>,
) -> Result<(), DomainError> {
    if existing
        .iter()
        .any(|tier| Some(tier.id) != excluding && tier.name == name)
    {
        return Err(DomainError::DuplicateTierName(name.to_string()));
    }
    Ok(())
}
