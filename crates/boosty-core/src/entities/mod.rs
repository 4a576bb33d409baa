//! Domain entities - core business objects

mod category;
mod comment;
mod follow;
mod post;
mod profile;
mod subscription;
mod tier;
mod user;

pub use category::Category;
pub use comment::Comment;
pub use follow::FollowSubscription;
pub use post::{Post, PostStatus};
pub use profile::Profile;
pub use subscription::{
    PaymentStatus, SubscriptionState, TierSubscription, SUBSCRIPTION_PERIOD_DAYS,
};
pub use tier::Tier;
pub use user::User;
