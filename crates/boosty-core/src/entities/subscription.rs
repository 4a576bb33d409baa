//! Tier subscription - a paid, time-bounded membership in a tier
//!
//! Expiry is never stored. Every temporal predicate takes the evaluation
//! instant explicitly (`*_at(now)`), with convenience wrappers that use the
//! wall clock.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Length of one billing period
pub const SUBSCRIPTION_PERIOD_DAYS: i64 = 30;

/// Payment outcome recorded on the subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Completed,
    Failed,
    Refunded,
}

impl PaymentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Refunded => "refunded",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            "failed" => Ok(Self::Failed),
            "refunded" => Ok(Self::Refunded),
            other => Err(DomainError::ValidationError(format!(
                "Unknown payment status: {other}"
            ))),
        }
    }
}

/// Derived lifecycle state of a subscription at a given instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionState {
    Active,
    /// Cancelled by the subscriber but still paid up until `end_date`
    ActiveCancelled,
    Expired,
    Deactivated,
}

impl SubscriptionState {
    /// Whether this state unlocks tier content
    #[inline]
    pub fn grants_access(self) -> bool {
        matches!(self, Self::Active | Self::ActiveCancelled)
    }
}

/// Tier subscription entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierSubscription {
    pub id: Snowflake,
    pub subscriber_id: Snowflake,
    pub tier_id: Snowflake,
    pub is_active: bool,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub payment_status: PaymentStatus,
    pub transaction_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TierSubscription {
    /// Create a subscription starting at `start_date`
    ///
    /// `end_date` defaults to one billing period after the start and is never
    /// recomputed afterwards.
    pub fn new(
        id: Snowflake,
        subscriber_id: Snowflake,
        tier_id: Snowflake,
        start_date: DateTime<Utc>,
        end_date: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            subscriber_id,
            tier_id,
            is_active: true,
            start_date,
            end_date: end_date
                .unwrap_or_else(|| start_date + Duration::days(SUBSCRIPTION_PERIOD_DAYS)),
            cancelled_at: None,
            payment_status: PaymentStatus::Pending,
            transaction_id: None,
            created_at: start_date,
        }
    }

    /// Record the payment outcome
    pub fn record_payment(&mut self, status: PaymentStatus, transaction_id: Option<String>) {
        self.payment_status = status;
        self.transaction_id = transaction_id;
    }

    #[inline]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.end_date
    }

    #[inline]
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled_at.is_some()
    }

    /// Active and not yet expired. Cancellation alone keeps access.
    #[inline]
    pub fn has_effective_access_at(&self, now: DateTime<Utc>) -> bool {
        self.is_active && !self.is_expired_at(now)
    }

    #[inline]
    pub fn has_effective_access(&self) -> bool {
        self.has_effective_access_at(Utc::now())
    }

    /// Whole days left before expiry, `0` once expired
    pub fn days_remaining_at(&self, now: DateTime<Utc>) -> i64 {
        if self.is_expired_at(now) {
            return 0;
        }
        (self.end_date - now).num_days().max(0)
    }

    pub fn days_remaining(&self) -> i64 {
        self.days_remaining_at(Utc::now())
    }

    pub fn state_at(&self, now: DateTime<Utc>) -> SubscriptionState {
        if !self.is_active {
            SubscriptionState::Deactivated
        } else if self.is_expired_at(now) {
            SubscriptionState::Expired
        } else if self.is_cancelled() {
            SubscriptionState::ActiveCancelled
        } else {
            SubscriptionState::Active
        }
    }

    pub fn state(&self) -> SubscriptionState {
        self.state_at(Utc::now())
    }

    /// Mark as cancelled at `now`; access continues until `end_date`.
    ///
    /// Unconditional: rejecting a repeated cancel is up to the caller.
    pub fn cancel_at(&mut self, now: DateTime<Utc>) {
        self.cancelled_at = Some(now);
    }

    pub fn cancel(&mut self) {
        self.cancel_at(Utc::now());
    }

    /// Revoke access immediately
    pub fn deactivate(&mut self) {
        self.is_active = false;
    }
}
