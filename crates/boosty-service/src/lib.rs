//! # boosty-service
//!
//! Application layer: use cases over the repositories and the access
//! engine, request/response DTOs, and the bundled payment gateway.

pub mod bootstrap;
pub mod dto;
pub mod payment;
pub mod services;

pub use bootstrap::{create_service_context, init_from_env};
pub use payment::StubPaymentGateway;
pub use services::{
    AccessService, CategoryService, CommentService, DashboardService, FollowService, PostService,
    ProfileService, ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult,
    SubscriptionService, TierService,
};
