//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in boosty-core.
//! Each repository handles database operations for a specific domain entity.

mod category;
mod comment;
mod error;
mod follow;
mod post;
mod profile;
mod subscription;
mod tier;
mod user;

pub use category::PgCategoryRepository;
pub use comment::PgCommentRepository;
pub use follow::PgFollowRepository;
pub use post::PgPostRepository;
pub use profile::PgProfileRepository;
pub use subscription::PgTierSubscriptionRepository;
pub use tier::PgTierRepository;
pub use user::PgUserRepository;
