//! Profile entity - per-user public profile with creator capabilities

use chrono::{DateTime, Utc};

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Profile attached one-to-one to a [`User`](super::User)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub is_creator: bool,
    pub bio: String,
    /// Opaque reference to an uploaded avatar
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    pub const BIO_MIN_LEN: usize = 10;
    pub const BIO_MAX_LEN: usize = 500;

    /// Blank, non-creator profile created on first reference to a user
    pub fn new(id: Snowflake, user_id: Snowflake) -> Self {
        let now = Utc::now();
        Self {
            id,
            user_id,
            is_creator: false,
            bio: String::new(),
            avatar: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// A bio is either empty or between 10 and 500 characters
    pub fn validate_bio(bio: &str) -> Result<(), DomainError> {
        let len = bio.chars().count();
        if len == 0 || (Self::BIO_MIN_LEN..=Self::BIO_MAX_LEN).contains(&len) {
            Ok(())
        } else {
            Err(DomainError::ValidationError(format!(
                "Bio must be empty or {}-{} characters",
                Self::BIO_MIN_LEN,
                Self::BIO_MAX_LEN
            )))
        }
    }

    #[inline]
    pub fn is_owned_by(&self, user_id: Snowflake) -> bool {
        self.user_id == user_id
    }
}
