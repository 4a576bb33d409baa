//! Test fixtures and data generators
//!
//! Provides reusable request payloads for integration tests.

use std::sync::atomic::{AtomicU64, Ordering};

use boosty_core::Snowflake;
use boosty_service::dto::{CommentRequest, CreatePostRequest, CreateTierRequest, UpdateProfileRequest};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// A body long enough to be cut down to a preview
pub fn long_content() -> String {
    "Behind the scenes of the new record. ".repeat(10)
}

/// Turn a profile into a creator profile
pub fn become_creator() -> UpdateProfileRequest {
    UpdateProfileRequest {
        is_creator: Some(true),
        ..Default::default()
    }
}

/// Tier at the given price with a unique name
pub fn tier_request(price: &str) -> CreateTierRequest {
    CreateTierRequest {
        name: format!("Tier {}", unique_suffix()),
        description: String::new(),
        price: price.to_string(),
        order: 0,
        is_active: true,
    }
}

/// Published post restricted to `tier_ids`
pub fn paid_post(tier_ids: Vec<Snowflake>) -> CreatePostRequest {
    CreatePostRequest {
        title: format!("Paid post {}", unique_suffix()),
        content: long_content(),
        category_id: None,
        is_free: false,
        tier_ids,
        publish: true,
    }
}

/// Published post anyone may read
pub fn free_post() -> CreatePostRequest {
    CreatePostRequest {
        title: format!("Free post {}", unique_suffix()),
        content: "Hello everyone".to_string(),
        category_id: None,
        is_free: true,
        tier_ids: Vec::new(),
        publish: true,
    }
}

/// Unpublished post
pub fn draft_post() -> CreatePostRequest {
    CreatePostRequest {
        publish: false,
        ..free_post()
    }
}

pub fn comment(content: &str) -> CommentRequest {
    CommentRequest {
        content: content.to_string(),
    }
}
