//! Principals seen by the access engine
//!
//! A [`Viewer`] reads content; an [`Actor`] mutates it. Anonymous callers
//! are modelled as `None` at every call site.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::entities::TierSubscription;
use crate::value_objects::Snowflake;

/// Set of tier ids a user currently has effective access to
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entitlements {
    tiers: HashSet<Snowflake>,
}

impl Entitlements {
    /// Collect the tiers whose subscription is active and unexpired at `now`
    pub fn from_subscriptions<'a, I>(subscriptions: I, now: DateTime<Utc>) -> Self
    where
        I: IntoIterator<Item = &'a TierSubscription>,
    {
        let tiers = subscriptions
            .into_iter()
            .filter(|sub| sub.has_effective_access_at(now))
            .map(|sub| sub.tier_id)
            .collect();
        Self { tiers }
    }

    #[inline]
    pub fn contains(&self, tier_id: Snowflake) -> bool {
        self.tiers.contains(&tier_id)
    }

    /// Whether any of `tier_ids` is entitled
    pub fn intersects<'a, I>(&self, tier_ids: I) -> bool
    where
        I: IntoIterator<Item = &'a Snowflake>,
    {
        tier_ids.into_iter().any(|id| self.tiers.contains(id))
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tiers.len()
    }
}

impl FromIterator<Snowflake> for Entitlements {
    fn from_iter<T: IntoIterator<Item = Snowflake>>(iter: T) -> Self {
        Self {
            tiers: iter.into_iter().collect(),
        }
    }
}

/// Authenticated reader with a snapshot of their entitlements
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewer {
    pub user_id: Snowflake,
    pub entitlements: Entitlements,
}

impl Viewer {
    pub fn new(user_id: Snowflake, entitlements: Entitlements) -> Self {
        Self {
            user_id,
            entitlements,
        }
    }

    /// Viewer holding no subscriptions
    pub fn unsubscribed(user_id: Snowflake) -> Self {
        Self::new(user_id, Entitlements::default())
    }

    #[inline]
    pub fn is(&self, user_id: Snowflake) -> bool {
        self.user_id == user_id
    }
}

/// Authenticated principal attempting a mutation
///
/// Tiers are owned by profiles while posts and comments are owned by users,
/// so both ids are carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user_id: Snowflake,
    pub profile_id: Snowflake,
}

impl Actor {
    pub fn new(user_id: Snowflake, profile_id: Snowflake) -> Self {
        Self {
            user_id,
            profile_id,
        }
    }
}
