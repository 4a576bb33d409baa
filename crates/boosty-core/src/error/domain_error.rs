//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Coarse error classification shared by every layer
///
/// The boundary layer maps these onto transport codes; hidden content is
/// always reported as `NotFound`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Forbidden,
    Unauthenticated,
    ValidationFailed,
    Conflict,
    Internal,
}

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(Snowflake),

    #[error("Profile not found: {0}")]
    ProfileNotFound(Snowflake),

    #[error("Category not found: {0}")]
    CategoryNotFound(Snowflake),

    #[error("Post not found: {0}")]
    PostNotFound(Snowflake),

    #[error("Comment not found: {0}")]
    CommentNotFound(Snowflake),

    #[error("Tier not found: {0}")]
    TierNotFound(Snowflake),

    #[error("Subscription not found: {0}")]
    SubscriptionNotFound(Snowflake),

    #[error("Not following this creator")]
    NotFollowing,

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("A creator can have a maximum of {max} subscription tiers")]
    TierLimitExceeded { max: usize },

    #[error("Tier name already used by this creator: {0}")]
    DuplicateTierName(String),

    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    #[error("Tier is not available for subscription")]
    TierInactive,

    #[error("Cannot subscribe to your own tier")]
    CannotSubscribeToSelf,

    #[error("Cannot follow yourself")]
    CannotFollowSelf,

    #[error("Tier {0} does not belong to the post author")]
    ForeignTier(Snowflake),

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Authentication required")]
    Unauthenticated,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Creator profile required")]
    NotCreator,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Already subscribed to this tier")]
    AlreadySubscribed,

    #[error("Subscription already cancelled")]
    AlreadyCancelled,

    #[error("Already following this creator")]
    AlreadyFollowing,

    #[error("Category name already exists: {0}")]
    DuplicateCategoryName(String),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Payment error: {0}")]
    PaymentError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Shorthand for a `Forbidden` error with a reason
    pub fn forbidden(reason: impl Into<String>) -> Self {
        Self::Forbidden(reason.into())
    }

    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::ProfileNotFound(_) => "UNKNOWN_PROFILE",
            Self::CategoryNotFound(_) => "UNKNOWN_CATEGORY",
            Self::PostNotFound(_) => "UNKNOWN_POST",
            Self::CommentNotFound(_) => "UNKNOWN_COMMENT",
            Self::TierNotFound(_) => "UNKNOWN_TIER",
            Self::SubscriptionNotFound(_) => "UNKNOWN_SUBSCRIPTION",
            Self::NotFollowing => "NOT_FOLLOWING",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::TierLimitExceeded { .. } => "TIER_LIMIT_EXCEEDED",
            Self::DuplicateTierName(_) => "DUPLICATE_TIER_NAME",
            Self::InvalidPrice(_) => "INVALID_PRICE",
            Self::TierInactive => "TIER_INACTIVE",
            Self::CannotSubscribeToSelf => "CANNOT_SUBSCRIBE_TO_SELF",
            Self::CannotFollowSelf => "CANNOT_FOLLOW_SELF",
            Self::ForeignTier(_) => "FOREIGN_TIER",

            // Authorization
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::NotCreator => "NOT_CREATOR",

            // Conflict
            Self::AlreadySubscribed => "ALREADY_SUBSCRIBED",
            Self::AlreadyCancelled => "ALREADY_CANCELLED",
            Self::AlreadyFollowing => "ALREADY_FOLLOWING",
            Self::DuplicateCategoryName(_) => "DUPLICATE_CATEGORY_NAME",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::PaymentError(_) => "PAYMENT_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Classify the error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UserNotFound(_)
            | Self::ProfileNotFound(_)
            | Self::CategoryNotFound(_)
            | Self::PostNotFound(_)
            | Self::CommentNotFound(_)
            | Self::TierNotFound(_)
            | Self::SubscriptionNotFound(_)
            | Self::NotFollowing => ErrorKind::NotFound,

            Self::ValidationError(_)
            | Self::TierLimitExceeded { .. }
            | Self::DuplicateTierName(_)
            | Self::InvalidPrice(_)
            | Self::TierInactive
            | Self::CannotSubscribeToSelf
            | Self::CannotFollowSelf
            | Self::ForeignTier(_) => ErrorKind::ValidationFailed,

            Self::Unauthenticated => ErrorKind::Unauthenticated,

            Self::Forbidden(_) | Self::NotCreator => ErrorKind::Forbidden,

            Self::AlreadySubscribed
            | Self::AlreadyCancelled
            | Self::AlreadyFollowing
            | Self::DuplicateCategoryName(_) => ErrorKind::Conflict,

            Self::DatabaseError(_) | Self::PaymentError(_) | Self::InternalError(_) => {
                ErrorKind::Internal
            }
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::ValidationFailed
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        self.kind() == ErrorKind::Forbidden
    }

    /// Check if the action needs a signed-in principal
    pub fn is_unauthenticated(&self) -> bool {
        self.kind() == ErrorKind::Unauthenticated
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        self.kind() == ErrorKind::Conflict
    }
}
