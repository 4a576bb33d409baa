//! Post entity <-> model mapper

use boosty_core::entities::{Post, PostStatus};
use boosty_core::error::DomainError;
use boosty_core::value_objects::Snowflake;

use crate::models::PostModel;

/// Convert a post row plus its tier ids to a Post entity
pub fn post_with_tiers(model: PostModel, tier_ids: Vec<i64>) -> Result<Post, DomainError> {
    let status: PostStatus = model
        .status
        .parse()
        .map_err(|_| DomainError::DatabaseError(format!("Invalid post status: {}", model.status)))?;

    Ok(Post {
        id: Snowflake::new(model.id),
        title: model.title,
        content: model.content,
        author_id: Snowflake::new(model.author_id),
        category_id: model.category_id.map(Snowflake::new),
        status,
        is_free: model.is_free,
        tier_ids: tier_ids.into_iter().map(Snowflake::new).collect(),
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

/// Post entity flattened for insert/update
pub struct PostInsert<'a> {
    pub id: i64,
    pub title: &'a str,
    pub content: &'a str,
    pub author_id: i64,
    pub category_id: Option<i64>,
    pub status: &'static str,
    pub is_free: bool,
    pub tier_ids: Vec<i64>,
}

impl<'a> PostInsert<'a> {
    pub fn new(post: &'a Post) -> Self {
        Self {
            id: post.id.into_inner(),
            title: &post.title,
            content: &post.content,
            author_id: post.author_id.into_inner(),
            category_id: post.category_id.map(Snowflake::into_inner),
            status: post.status.as_str(),
            is_free: post.is_free,
            tier_ids: post.tier_ids.iter().map(|id| id.into_inner()).collect(),
        }
    }
}
