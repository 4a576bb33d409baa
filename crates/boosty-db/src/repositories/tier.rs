//! PostgreSQL implementation of TierRepository
//!
//! Tier writes take a row lock on the owning profile, so concurrent inserts
//! for one creator are counted one at a time.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::instrument;

use boosty_core::entities::Tier;
use boosty_core::error::DomainError;
use boosty_core::traits::{RepoResult, TierRepository};
use boosty_core::value_objects::Snowflake;

use crate::mappers::TierInsert;
use crate::models::TierModel;

use super::error::{collect_rows, map_db_error, map_unique_violation};

/// PostgreSQL implementation of TierRepository
#[derive(Clone)]
pub struct PgTierRepository {
    pool: PgPool,
}

impl PgTierRepository {
    /// Create a new PgTierRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Lock the creator's profile row and count their tiers, ignoring `excluding`
    async fn lock_and_count(
        tx: &mut Transaction<'_, Postgres>,
        creator_id: Snowflake,
        excluding: Option<Snowflake>,
    ) -> RepoResult<usize> {
        let locked = sqlx::query_scalar::<_, i64>("SELECT id FROM profiles WHERE id = $1 FOR UPDATE")
            .bind(creator_id.into_inner())
            .fetch_optional(&mut **tx)
            .await
            .map_err(map_db_error)?;

        if locked.is_none() {
            return Err(DomainError::ProfileNotFound(creator_id));
        }

        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM tiers
            WHERE creator_id = $1 AND ($2::BIGINT IS NULL OR id <> $2)
            "#,
        )
        .bind(creator_id.into_inner())
        .bind(excluding.map(Snowflake::into_inner))
        .fetch_one(&mut **tx)
        .await
        .map_err(map_db_error)?;

        Ok(count as usize)
    }
}

#[async_trait]
impl TierRepository for PgTierRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Tier>> {
        let result = sqlx::query_as::<_, TierModel>(
            r#"
            SELECT id, creator_id, name, description, price_cents, sort_order, is_active, created_at, updated_at
            FROM tiers
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Tier::try_from).transpose()
    }

    #[instrument(skip(self, ids), fields(count = ids.len()))]
    async fn find_by_ids(&self, ids: &[Snowflake]) -> RepoResult<Vec<Tier>> {
        let raw: Vec<i64> = ids.iter().map(|id| id.into_inner()).collect();
        let results = sqlx::query_as::<_, TierModel>(
            r#"
            SELECT id, creator_id, name, description, price_cents, sort_order, is_active, created_at, updated_at
            FROM tiers
            WHERE id = ANY($1)
            ORDER BY sort_order, price_cents, id
            "#,
        )
        .bind(&raw)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        collect_rows(results)
    }

    #[instrument(skip(self))]
    async fn find_by_creator(&self, creator_id: Snowflake) -> RepoResult<Vec<Tier>> {
        let results = sqlx::query_as::<_, TierModel>(
            r#"
            SELECT id, creator_id, name, description, price_cents, sort_order, is_active, created_at, updated_at
            FROM tiers
            WHERE creator_id = $1
            ORDER BY sort_order, price_cents, id
            "#,
        )
        .bind(creator_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        collect_rows(results)
    }

    #[instrument(skip(self, tier), fields(tier_id = %tier.id, creator_id = %tier.creator_id))]
    async fn create_within_limit(&self, tier: &Tier, max: usize) -> RepoResult<()> {
        let row = TierInsert::new(tier);
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        if Self::lock_and_count(&mut tx, tier.creator_id, None).await? >= max {
            return Err(DomainError::TierLimitExceeded { max });
        }

        sqlx::query(
            r#"
            INSERT INTO tiers (id, creator_id, name, description, price_cents, sort_order, is_active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(row.id)
        .bind(row.creator_id)
        .bind(row.name)
        .bind(row.description)
        .bind(row.price_cents)
        .bind(row.sort_order)
        .bind(row.is_active)
        .bind(tier.created_at)
        .bind(tier.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::DuplicateTierName(tier.name.clone())))?;

        tx.commit().await.map_err(map_db_error)?;
        Ok(())
    }

    #[instrument(skip(self, tier), fields(tier_id = %tier.id))]
    async fn update_within_limit(&self, tier: &Tier, max: usize) -> RepoResult<()> {
        let row = TierInsert::new(tier);
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        if Self::lock_and_count(&mut tx, tier.creator_id, Some(tier.id)).await? >= max {
            return Err(DomainError::TierLimitExceeded { max });
        }

        let result = sqlx::query(
            r#"
            UPDATE tiers
            SET name = $2, description = $3, price_cents = $4, sort_order = $5, is_active = $6, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(row.id)
        .bind(row.name)
        .bind(row.description)
        .bind(row.price_cents)
        .bind(row.sort_order)
        .bind(row.is_active)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::DuplicateTierName(tier.name.clone())))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::TierNotFound(tier.id));
        }

        tx.commit().await.map_err(map_db_error)?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        // tier_subscriptions and post_tiers cascade
        let result = sqlx::query("DELETE FROM tiers WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::TierNotFound(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn subscriber_count(&self, tier_id: Snowflake) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM tier_subscriptions WHERE tier_id = $1 AND is_active",
        )
        .bind(tier_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }
}
