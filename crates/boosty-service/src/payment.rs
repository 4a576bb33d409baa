//! Bundled payment gateway
//!
//! Always succeeds. Real processing is out of scope; swap in another
//! [`PaymentGateway`] through the service context when needed.

use async_trait::async_trait;
use tracing::{info, instrument};
use uuid::Uuid;

use boosty_core::traits::{PaymentGateway, PaymentReceipt, RepoResult};
use boosty_core::{PaymentStatus, Snowflake, Tier};

/// Payment gateway that completes every charge with a fresh transaction id
#[derive(Debug, Clone, Copy, Default)]
pub struct StubPaymentGateway;

impl StubPaymentGateway {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PaymentGateway for StubPaymentGateway {
    #[instrument(skip(self, tier), fields(tier_id = %tier.id, price = %tier.price))]
    async fn charge(&self, subscriber_id: Snowflake, tier: &Tier) -> RepoResult<PaymentReceipt> {
        let transaction_id = Uuid::new_v4().to_string();
        info!(subscriber_id = %subscriber_id, transaction_id = %transaction_id, "Stub payment completed");

        Ok(PaymentReceipt {
            status: PaymentStatus::Completed,
            transaction_id: Some(transaction_id),
        })
    }
}
