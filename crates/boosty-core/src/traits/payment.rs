//! Payment port
//!
//! Subscription creation charges through this trait so a real processor can
//! replace the bundled stub without touching the lifecycle.

use async_trait::async_trait;

use crate::entities::{PaymentStatus, Tier};
use crate::value_objects::Snowflake;

use super::repositories::RepoResult;

/// Outcome of a charge attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentReceipt {
    pub status: PaymentStatus,
    pub transaction_id: Option<String>,
}

impl PaymentReceipt {
    #[inline]
    pub fn is_completed(&self) -> bool {
        self.status == PaymentStatus::Completed
    }
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Charge the subscriber one billing period of `tier`
    async fn charge(&self, subscriber_id: Snowflake, tier: &Tier) -> RepoResult<PaymentReceipt>;
}
