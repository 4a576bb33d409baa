//! Post entity - creator content with draft/publish/archive lifecycle

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Publication status
///
/// Transitions only move forward: `Draft -> Published -> Archived`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[default]
    Draft,
    Published,
    Archived,
}

impl PostStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
            Self::Archived => "archived",
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "published" => Ok(Self::Published),
            "archived" => Ok(Self::Archived),
            other => Err(DomainError::ValidationError(format!(
                "Unknown post status: {other}"
            ))),
        }
    }
}

/// Post entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: Snowflake,
    pub title: String,
    pub content: String,
    pub author_id: Snowflake,
    pub category_id: Option<Snowflake>,
    pub status: PostStatus,
    /// Convenience flag. An empty `tier_ids` set also makes the post free.
    pub is_free: bool,
    pub tier_ids: BTreeSet<Snowflake>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    pub const TITLE_MAX_LEN: usize = 200;

    /// Create a new draft post
    pub fn new(id: Snowflake, author_id: Snowflake, title: String, content: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            title,
            content,
            author_id,
            category_id: None,
            status: PostStatus::Draft,
            is_free: false,
            tier_ids: BTreeSet::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn is_published(&self) -> bool {
        self.status == PostStatus::Published
    }

    #[inline]
    pub fn is_draft(&self) -> bool {
        self.status == PostStatus::Draft
    }

    #[inline]
    pub fn is_authored_by(&self, user_id: Snowflake) -> bool {
        self.author_id == user_id
    }

    /// Free either by flag or because no tier gates it
    #[inline]
    pub fn is_open_access(&self) -> bool {
        self.is_free || self.tier_ids.is_empty()
    }

    /// Replace the gating tiers
    pub fn set_tiers(&mut self, tier_ids: impl IntoIterator<Item = Snowflake>) {
        self.tier_ids = tier_ids.into_iter().collect();
        self.touch();
    }

    /// Move `Draft -> Published`
    pub fn publish(&mut self) -> Result<(), DomainError> {
        if self.status != PostStatus::Draft {
            return Err(DomainError::forbidden(
                "You can only publish your own draft posts",
            ));
        }
        self.status = PostStatus::Published;
        self.touch();
        Ok(())
    }

    /// Move `Published -> Archived`
    pub fn archive(&mut self) -> Result<(), DomainError> {
        if self.status != PostStatus::Published {
            return Err(DomainError::forbidden(
                "You can only archive your own published posts",
            ));
        }
        self.status = PostStatus::Archived;
        self.touch();
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
