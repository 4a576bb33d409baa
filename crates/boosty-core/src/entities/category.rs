//! Category entity - flat tag for posts

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: Snowflake,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl Category {
    pub fn new(id: Snowflake, name: String, description: String) -> Self {
        Self {
            id,
            name,
            description,
            created_at: Utc::now(),
        }
    }
}
