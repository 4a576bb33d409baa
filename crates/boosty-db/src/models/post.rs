//! Post database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for posts table
#[derive(Debug, Clone, FromRow)]
pub struct PostModel {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub author_id: i64,
    pub category_id: Option<i64>,
    /// 'draft', 'published' or 'archived'
    pub status: String,
    pub is_free: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Post row joined with its aggregated `post_tiers` ids
#[derive(Debug, Clone, FromRow)]
pub struct PostWithTiersModel {
    #[sqlx(flatten)]
    pub post: PostModel,
    pub tier_ids: Vec<i64>,
}
