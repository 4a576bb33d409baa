//! # boosty-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides PostgreSQL implementations for all repository traits
//! defined in `boosty-core`. It handles:
//!
//! - Connection pool management and schema migrations
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - Repository implementations, including the atomic check-and-write
//!   primitives for the tier cap and duplicate subscriptions
//!
//! ## Usage
//!
//! ```rust,ignore
//! use boosty_db::{create_pool, run_migrations, DatabaseConfig, PgTierRepository};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::from_env()?;
//!     let pool = create_pool(&config).await?;
//!     run_migrations(&pool).await?;
//!     let tiers = PgTierRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, create_pool_from_env, run_migrations, DatabaseConfig, PgPool};
pub use repositories::{
    PgCategoryRepository, PgCommentRepository, PgFollowRepository, PgPostRepository,
    PgProfileRepository, PgTierRepository, PgTierSubscriptionRepository, PgUserRepository,
};
