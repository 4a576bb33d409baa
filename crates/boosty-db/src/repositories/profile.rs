//! PostgreSQL implementation of ProfileRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use boosty_core::entities::Profile;
use boosty_core::error::DomainError;
use boosty_core::traits::{ProfileRepository, RepoResult};
use boosty_core::value_objects::Snowflake;

use crate::models::ProfileModel;

use super::error::{map_db_error, map_foreign_key_violation};

/// PostgreSQL implementation of ProfileRepository
#[derive(Clone)]
pub struct PgProfileRepository {
    pool: PgPool,
}

impl PgProfileRepository {
    /// Create a new PgProfileRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileRepository for PgProfileRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Profile>> {
        let result = sqlx::query_as::<_, ProfileModel>(
            r#"
            SELECT id, user_id, is_creator, bio, avatar, created_at, updated_at
            FROM profiles
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Profile::from))
    }

    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Option<Profile>> {
        let result = sqlx::query_as::<_, ProfileModel>(
            r#"
            SELECT id, user_id, is_creator, bio, avatar, created_at, updated_at
            FROM profiles
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Profile::from))
    }

    #[instrument(skip(self, profile), fields(user_id = %profile.user_id))]
    async fn create_if_absent(&self, profile: &Profile) -> RepoResult<Profile> {
        // ON CONFLICT keeps the first writer's row when two requests race
        let result = sqlx::query_as::<_, ProfileModel>(
            r#"
            WITH inserted AS (
                INSERT INTO profiles (id, user_id, is_creator, bio, avatar, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                ON CONFLICT (user_id) DO NOTHING
                RETURNING id, user_id, is_creator, bio, avatar, created_at, updated_at
            )
            SELECT id, user_id, is_creator, bio, avatar, created_at, updated_at FROM inserted
            UNION ALL
            SELECT id, user_id, is_creator, bio, avatar, created_at, updated_at
            FROM profiles
            WHERE user_id = $2
            LIMIT 1
            "#,
        )
        .bind(profile.id.into_inner())
        .bind(profile.user_id.into_inner())
        .bind(profile.is_creator)
        .bind(&profile.bio)
        .bind(&profile.avatar)
        .bind(profile.created_at)
        .bind(profile.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_foreign_key_violation(e, || DomainError::UserNotFound(profile.user_id)))?;

        if let Some(model) = result {
            return Ok(Profile::from(model));
        }

        // The competing insert committed after our snapshot was taken
        self.find_by_user(profile.user_id)
            .await?
            .ok_or(DomainError::UserNotFound(profile.user_id))
    }

    #[instrument(skip(self, profile), fields(profile_id = %profile.id))]
    async fn update(&self, profile: &Profile) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE profiles
            SET is_creator = $2, bio = $3, avatar = $4, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(profile.id.into_inner())
        .bind(profile.is_creator)
        .bind(&profile.bio)
        .bind(&profile.avatar)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::ProfileNotFound(profile.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_creators(&self, category_id: Option<Snowflake>) -> RepoResult<Vec<Profile>> {
        let results = sqlx::query_as::<_, ProfileModel>(
            r#"
            SELECT p.id, p.user_id, p.is_creator, p.bio, p.avatar, p.created_at, p.updated_at
            FROM profiles p
            WHERE p.is_creator
              AND ($1::BIGINT IS NULL OR EXISTS (
                    SELECT 1 FROM posts
                    WHERE posts.author_id = p.user_id
                      AND posts.status = 'published'
                      AND posts.category_id = $1
              ))
            ORDER BY p.created_at DESC, p.id
            "#,
        )
        .bind(category_id.map(Snowflake::into_inner))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Profile::from).collect())
    }
}
