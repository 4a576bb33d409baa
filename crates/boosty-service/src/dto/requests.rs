//! Request DTOs
//!
//! All request DTOs implement `Deserialize` and `Validate`; services call
//! `validate()` before touching any repository.

use serde::Deserialize;
use validator::{Validate, ValidationError};

use boosty_core::{PostStatus, Price, Profile, Snowflake};

// ============================================================================
// Custom validators
// ============================================================================

fn validate_bio(bio: &str) -> Result<(), ValidationError> {
    Profile::validate_bio(bio).map_err(|_| {
        ValidationError::new("bio").with_message("Bio must be empty or 10-500 characters".into())
    })
}

fn validate_price(amount: &str) -> Result<(), ValidationError> {
    Price::parse(amount).map(|_| ()).map_err(|_| {
        ValidationError::new("price")
            .with_message("Price must be a positive amount with at most two decimals".into())
    })
}

// ============================================================================
// Profile Requests
// ============================================================================

/// Update own profile request
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(custom(function = "validate_bio"))]
    pub bio: Option<String>,

    /// Opaque avatar reference
    #[validate(length(max = 255, message = "Avatar reference must be at most 255 characters"))]
    pub avatar: Option<String>,

    /// Opt in to (or out of) being a creator
    pub is_creator: Option<bool>,
}

// ============================================================================
// Category Requests
// ============================================================================

/// Create category request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCategoryRequest {
    #[validate(length(min = 1, max = 100, message = "Category name must be 1-100 characters"))]
    pub name: String,

    #[serde(default)]
    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: String,
}

// ============================================================================
// Post Requests
// ============================================================================

/// Create post request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[validate(length(min = 1, message = "Content must not be empty"))]
    pub content: String,

    pub category_id: Option<Snowflake>,

    #[serde(default)]
    pub is_free: bool,

    /// Gating tiers; they must belong to the author
    #[serde(default)]
    pub tier_ids: Vec<Snowflake>,

    /// Publish immediately instead of saving a draft
    #[serde(default)]
    pub publish: bool,
}

/// Update post request
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdatePostRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,

    #[validate(length(min = 1, message = "Content must not be empty"))]
    pub content: Option<String>,

    pub category_id: Option<Snowflake>,

    /// Detach the category; wins over `category_id`
    #[serde(default)]
    pub remove_category: bool,

    pub is_free: Option<bool>,

    pub tier_ids: Option<Vec<Snowflake>>,
}

/// Post list filters
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ListPostsQuery {
    pub category_id: Option<Snowflake>,
    pub author_id: Option<Snowflake>,
}

/// Author's own post list filter
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct MyPostsQuery {
    pub status: Option<PostStatus>,
}

// ============================================================================
// Comment Requests
// ============================================================================

/// Create or edit comment request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CommentRequest {
    #[validate(length(min = 1, max = 5000, message = "Comment must be 1-5000 characters"))]
    pub content: String,
}

// ============================================================================
// Tier Requests
// ============================================================================

fn default_true() -> bool {
    true
}

/// Create tier request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTierRequest {
    #[validate(length(min = 1, max = 100, message = "Tier name must be 1-100 characters"))]
    pub name: String,

    #[serde(default)]
    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: String,

    /// Decimal amount, e.g. `"5.00"`
    #[validate(custom(function = "validate_price"))]
    pub price: String,

    #[serde(default)]
    #[validate(range(min = 0, message = "Order must not be negative"))]
    pub order: i32,

    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Update tier request
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateTierRequest {
    #[validate(length(min = 1, max = 100, message = "Tier name must be 1-100 characters"))]
    pub name: Option<String>,

    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,

    #[validate(custom(function = "validate_price"))]
    pub price: Option<String>,

    #[validate(range(min = 0, message = "Order must not be negative"))]
    pub order: Option<i32>,

    pub is_active: Option<bool>,
}
