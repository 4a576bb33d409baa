//! Profile entity <-> model mapper

use boosty_core::entities::Profile;
use boosty_core::value_objects::Snowflake;

use crate::models::ProfileModel;

impl From<ProfileModel> for Profile {
    fn from(model: ProfileModel) -> Self {
        Profile {
            id: Snowflake::new(model.id),
            user_id: Snowflake::new(model.user_id),
            is_creator: model.is_creator,
            bio: model.bio,
            avatar: model.avatar,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
