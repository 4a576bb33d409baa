//! Follow subscription - free follow relation used for the feed

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// A user following a creator profile. Unique per `(subscriber_id, creator_id)`.
///
/// Follows never unlock paid content; they only feed the post feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FollowSubscription {
    pub id: Snowflake,
    pub subscriber_id: Snowflake,
    /// Profile being followed
    pub creator_id: Snowflake,
    pub created_at: DateTime<Utc>,
}

impl FollowSubscription {
    pub fn new(id: Snowflake, subscriber_id: Snowflake, creator_id: Snowflake) -> Self {
        Self {
            id,
            subscriber_id,
            creator_id,
            created_at: Utc::now(),
        }
    }
}
