//! FollowSubscription entity <-> model mapper

use boosty_core::entities::FollowSubscription;
use boosty_core::value_objects::Snowflake;

use crate::models::FollowSubscriptionModel;

impl From<FollowSubscriptionModel> for FollowSubscription {
    fn from(model: FollowSubscriptionModel) -> Self {
        FollowSubscription {
            id: Snowflake::new(model.id),
            subscriber_id: Snowflake::new(model.subscriber_id),
            creator_id: Snowflake::new(model.creator_id),
            created_at: model.created_at,
        }
    }
}
