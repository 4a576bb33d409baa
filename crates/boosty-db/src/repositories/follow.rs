//! PostgreSQL implementation of FollowRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use boosty_core::entities::FollowSubscription;
use boosty_core::error::DomainError;
use boosty_core::traits::{FollowRepository, RepoResult};
use boosty_core::value_objects::Snowflake;

use crate::models::FollowSubscriptionModel;

use super::error::{map_db_error, map_unique_violation};

/// PostgreSQL implementation of FollowRepository
#[derive(Clone)]
pub struct PgFollowRepository {
    pool: PgPool,
}

impl PgFollowRepository {
    /// Create a new PgFollowRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FollowRepository for PgFollowRepository {
    #[instrument(skip(self))]
    async fn find(
        &self,
        subscriber_id: Snowflake,
        creator_id: Snowflake,
    ) -> RepoResult<Option<FollowSubscription>> {
        let result = sqlx::query_as::<_, FollowSubscriptionModel>(
            r#"
            SELECT id, subscriber_id, creator_id, created_at
            FROM follow_subscriptions
            WHERE subscriber_id = $1 AND creator_id = $2
            "#,
        )
        .bind(subscriber_id.into_inner())
        .bind(creator_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(FollowSubscription::from))
    }

    #[instrument(skip(self))]
    async fn find_by_subscriber(&self, subscriber_id: Snowflake) -> RepoResult<Vec<FollowSubscription>> {
        let results = sqlx::query_as::<_, FollowSubscriptionModel>(
            r#"
            SELECT id, subscriber_id, creator_id, created_at
            FROM follow_subscriptions
            WHERE subscriber_id = $1
            ORDER BY created_at DESC, id
            "#,
        )
        .bind(subscriber_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(FollowSubscription::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_creator(&self, creator_id: Snowflake) -> RepoResult<Vec<FollowSubscription>> {
        let results = sqlx::query_as::<_, FollowSubscriptionModel>(
            r#"
            SELECT id, subscriber_id, creator_id, created_at
            FROM follow_subscriptions
            WHERE creator_id = $1
            ORDER BY created_at DESC, id
            "#,
        )
        .bind(creator_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(FollowSubscription::from).collect())
    }

    #[instrument(skip(self, follow), fields(subscriber_id = %follow.subscriber_id, creator_id = %follow.creator_id))]
    async fn create(&self, follow: &FollowSubscription) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO follow_subscriptions (id, subscriber_id, creator_id, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(follow.id.into_inner())
        .bind(follow.subscriber_id.into_inner())
        .bind(follow.creator_id.into_inner())
        .bind(follow.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::AlreadyFollowing))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, subscriber_id: Snowflake, creator_id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query(
            "DELETE FROM follow_subscriptions WHERE subscriber_id = $1 AND creator_id = $2",
        )
        .bind(subscriber_id.into_inner())
        .bind(creator_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFollowing);
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn count_followers(&self, creator_id: Snowflake) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM follow_subscriptions WHERE creator_id = $1")
            .bind(creator_id.into_inner())
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn count_following(&self, subscriber_id: Snowflake) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM follow_subscriptions WHERE subscriber_id = $1",
        )
        .bind(subscriber_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }
}
