//! PostgreSQL implementation of TierSubscriptionRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use boosty_core::entities::TierSubscription;
use boosty_core::error::DomainError;
use boosty_core::traits::{RepoResult, TierSubscriptionRepository};
use boosty_core::value_objects::Snowflake;

use crate::mappers::SubscriptionInsert;
use crate::models::TierSubscriptionModel;

use super::error::{collect_rows, map_db_error, map_foreign_key_violation};

/// Advisory lock key for a (subscriber, tier) pair
///
/// Collisions only serialize unrelated pairs, they never admit a duplicate.
fn pair_lock_key(subscriber_id: Snowflake, tier_id: Snowflake) -> i64 {
    subscriber_id
        .into_inner()
        .wrapping_mul(31)
        .wrapping_add(tier_id.into_inner().rotate_left(32))
}

/// PostgreSQL implementation of TierSubscriptionRepository
#[derive(Clone)]
pub struct PgTierSubscriptionRepository {
    pool: PgPool,
}

impl PgTierSubscriptionRepository {
    /// Create a new PgTierSubscriptionRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TierSubscriptionRepository for PgTierSubscriptionRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<TierSubscription>> {
        let result = sqlx::query_as::<_, TierSubscriptionModel>(
            r#"
            SELECT id, subscriber_id, tier_id, is_active, start_date, end_date, cancelled_at,
                   payment_status, transaction_id, created_at
            FROM tier_subscriptions
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(TierSubscription::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_subscriber(&self, subscriber_id: Snowflake) -> RepoResult<Vec<TierSubscription>> {
        let results = sqlx::query_as::<_, TierSubscriptionModel>(
            r#"
            SELECT id, subscriber_id, tier_id, is_active, start_date, end_date, cancelled_at,
                   payment_status, transaction_id, created_at
            FROM tier_subscriptions
            WHERE subscriber_id = $1
            ORDER BY created_at DESC, id
            "#,
        )
        .bind(subscriber_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        collect_rows(results)
    }

    #[instrument(skip(self))]
    async fn find_by_tier(&self, tier_id: Snowflake) -> RepoResult<Vec<TierSubscription>> {
        let results = sqlx::query_as::<_, TierSubscriptionModel>(
            r#"
            SELECT id, subscriber_id, tier_id, is_active, start_date, end_date, cancelled_at,
                   payment_status, transaction_id, created_at
            FROM tier_subscriptions
            WHERE tier_id = $1
            ORDER BY created_at DESC, id
            "#,
        )
        .bind(tier_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        collect_rows(results)
    }

    #[instrument(skip(self, subscription), fields(
        subscriber_id = %subscription.subscriber_id,
        tier_id = %subscription.tier_id,
    ))]
    async fn create_unless_subscribed(
        &self,
        subscription: &TierSubscription,
        now: DateTime<Utc>,
    ) -> RepoResult<()> {
        let row = SubscriptionInsert::new(subscription);
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // Held until commit; serializes creates for the same pair
        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(pair_lock_key(subscription.subscriber_id, subscription.tier_id))
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM tier_subscriptions
                WHERE subscriber_id = $1 AND tier_id = $2 AND is_active AND end_date >= $3
            )
            "#,
        )
        .bind(row.subscriber_id)
        .bind(row.tier_id)
        .bind(now)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if exists {
            return Err(DomainError::AlreadySubscribed);
        }

        sqlx::query(
            r#"
            INSERT INTO tier_subscriptions
                (id, subscriber_id, tier_id, is_active, start_date, end_date, cancelled_at,
                 payment_status, transaction_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(row.id)
        .bind(row.subscriber_id)
        .bind(row.tier_id)
        .bind(subscription.is_active)
        .bind(subscription.start_date)
        .bind(subscription.end_date)
        .bind(subscription.cancelled_at)
        .bind(row.payment_status)
        .bind(row.transaction_id)
        .bind(subscription.created_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_foreign_key_violation(e, || DomainError::TierNotFound(subscription.tier_id)))?;

        tx.commit().await.map_err(map_db_error)?;
        Ok(())
    }

    #[instrument(skip(self, subscription), fields(subscription_id = %subscription.id))]
    async fn update(&self, subscription: &TierSubscription) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE tier_subscriptions
            SET is_active = $2, cancelled_at = $3
            WHERE id = $1
            "#,
        )
        .bind(subscription.id.into_inner())
        .bind(subscription.is_active)
        .bind(subscription.cancelled_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::SubscriptionNotFound(subscription.id));
        }

        Ok(())
    }
}
