//! Database models - SQLx-compatible structs for PostgreSQL tables

mod category;
mod comment;
mod follow;
mod post;
mod profile;
mod subscription;
mod tier;
mod user;

pub use category::CategoryModel;
pub use comment::CommentModel;
pub use follow::FollowSubscriptionModel;
pub use post::{PostModel, PostWithTiersModel};
pub use profile::ProfileModel;
pub use subscription::TierSubscriptionModel;
pub use tier::TierModel;
pub use user::UserModel;
