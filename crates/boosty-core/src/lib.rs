//! # boosty-core
//!
//! Domain layer for the creator-subscription platform: entities, value
//! objects, the access engine, and repository traits.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod access;
pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use access::{AccessDecision, AccessReason, Actor, Entitlements, PostContent, Viewer};
pub use entities::{
    Category, Comment, FollowSubscription, PaymentStatus, Post, PostStatus, Profile,
    SubscriptionState, Tier, TierSubscription, User, SUBSCRIPTION_PERIOD_DAYS,
};
pub use error::{DomainError, ErrorKind};
pub use traits::{
    CategoryRepository, CommentRepository, FollowRepository, PaymentGateway, PaymentReceipt,
    PostQuery, PostRepository, ProfileRepository, RepoResult, TierRepository,
    TierSubscriptionRepository, UserRepository,
};
pub use value_objects::{Price, PriceError, Snowflake, SnowflakeGenerator, SnowflakeParseError};
