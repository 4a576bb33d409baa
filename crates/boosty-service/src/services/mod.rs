//! Application services
//!
//! Each service borrows the [`ServiceContext`], loads what the access engine
//! needs, asks it, and persists the outcome.

pub mod access;
pub mod category;
pub mod comment;
pub mod context;
pub mod dashboard;
pub mod error;
pub mod follow;
pub mod post;
pub mod profile;
pub mod subscription;
pub mod tier;

// Re-export all services for convenience
pub use access::AccessService;
pub use category::CategoryService;
pub use comment::CommentService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use dashboard::DashboardService;
pub use error::{ServiceError, ServiceResult};
pub use follow::FollowService;
pub use post::PostService;
pub use profile::ProfileService;
pub use subscription::SubscriptionService;
pub use tier::TierService;
