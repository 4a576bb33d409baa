//! Ports implemented by infrastructure crates

mod payment;
mod repositories;

pub use payment::{PaymentGateway, PaymentReceipt};
pub use repositories::{
    CategoryRepository, CommentRepository, FollowRepository, PostQuery, PostRepository,
    ProfileRepository, RepoResult, TierRepository, TierSubscriptionRepository, UserRepository,
};
