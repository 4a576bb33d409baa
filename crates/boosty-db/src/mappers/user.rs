//! User entity <-> model mapper

use boosty_core::entities::User;
use boosty_core::value_objects::Snowflake;

use crate::models::UserModel;

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: Snowflake::new(model.id),
            username: model.username,
            email: model.email,
            created_at: model.created_at,
        }
    }
}
