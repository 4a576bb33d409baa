//! Entity to model mappers
//!
//! Conversions between domain entities (boosty-core) and database models.
//! - `From<Model> for Entity` when every column maps directly
//! - `TryFrom<Model> for Entity` when a column must be parsed (statuses, prices)
//! - `*Insert` structs: entity data flattened into column values

mod category;
mod comment;
mod follow;
mod post;
mod profile;
mod subscription;
mod tier;
mod user;

pub use post::{post_with_tiers, PostInsert};
pub use subscription::SubscriptionInsert;
pub use tier::TierInsert;
