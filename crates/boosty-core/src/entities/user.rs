//! User entity - the identity principal

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Authenticated identity. Credentials live with the auth provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Snowflake,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(id: Snowflake, username: String, email: String) -> Self {
        Self {
            id,
            username,
            email,
            created_at: Utc::now(),
        }
    }
}
