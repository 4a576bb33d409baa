//! Comment entity

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Comment on a post. Visibility is always derived from the parent post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: Snowflake,
    pub post_id: Snowflake,
    pub author_id: Snowflake,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    pub const MAX_LEN: usize = 5000;

    pub fn new(id: Snowflake, post_id: Snowflake, author_id: Snowflake, content: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            post_id,
            author_id,
            content,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the comment body
    pub fn edit(&mut self, content: String) {
        self.content = content;
        self.updated_at = Utc::now();
    }

    #[inline]
    pub fn is_edited(&self) -> bool {
        self.updated_at > self.created_at
    }
}
