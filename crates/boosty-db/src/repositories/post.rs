//! PostgreSQL implementation of PostRepository
//!
//! A post's tier set lives in `post_tiers`. Reads aggregate it into the
//! same statement as the post row.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::instrument;

use boosty_core::entities::{Post, PostStatus};
use boosty_core::error::DomainError;
use boosty_core::traits::{PostQuery, PostRepository, RepoResult};
use boosty_core::value_objects::Snowflake;

use crate::mappers::{post_with_tiers, PostInsert};
use crate::models::PostWithTiersModel;

use super::error::{map_db_error, map_foreign_key_violation};

/// PostgreSQL implementation of PostRepository
#[derive(Clone)]
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    /// Create a new PgPostRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn into_posts(rows: Vec<PostWithTiersModel>) -> RepoResult<Vec<Post>> {
        rows.into_iter()
            .map(|row| post_with_tiers(row.post, row.tier_ids))
            .collect()
    }

    async fn replace_tiers(
        tx: &mut Transaction<'_, Postgres>,
        post_id: i64,
        tier_ids: &[i64],
    ) -> RepoResult<()> {
        sqlx::query("DELETE FROM post_tiers WHERE post_id = $1")
            .bind(post_id)
            .execute(&mut **tx)
            .await
            .map_err(map_db_error)?;

        if tier_ids.is_empty() {
            return Ok(());
        }

        sqlx::query(
            r#"
            INSERT INTO post_tiers (post_id, tier_id)
            SELECT $1, UNNEST($2::BIGINT[])
            "#,
        )
        .bind(post_id)
        .bind(tier_ids)
        .execute(&mut **tx)
        .await
        .map_err(|e| {
            map_foreign_key_violation(e, || {
                DomainError::ValidationError("Post references an unknown tier".to_string())
            })
        })?;

        Ok(())
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Post>> {
        let result = sqlx::query_as::<_, PostWithTiersModel>(
            r#"
            SELECT p.id, p.title, p.content, p.author_id, p.category_id, p.status, p.is_free,
                   p.created_at, p.updated_at,
                   COALESCE(ARRAY_AGG(pt.tier_id ORDER BY pt.tier_id)
                            FILTER (WHERE pt.tier_id IS NOT NULL), '{}') AS tier_ids
            FROM posts p
            LEFT JOIN post_tiers pt ON pt.post_id = p.id
            WHERE p.id = $1
            GROUP BY p.id
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result
            .map(|row| post_with_tiers(row.post, row.tier_ids))
            .transpose()
    }

    #[instrument(skip(self, ids), fields(count = ids.len()))]
    async fn find_by_ids(&self, ids: &[Snowflake]) -> RepoResult<Vec<Post>> {
        let raw: Vec<i64> = ids.iter().map(|id| id.into_inner()).collect();
        let results = sqlx::query_as::<_, PostWithTiersModel>(
            r#"
            SELECT p.id, p.title, p.content, p.author_id, p.category_id, p.status, p.is_free,
                   p.created_at, p.updated_at,
                   COALESCE(ARRAY_AGG(pt.tier_id ORDER BY pt.tier_id)
                            FILTER (WHERE pt.tier_id IS NOT NULL), '{}') AS tier_ids
            FROM posts p
            LEFT JOIN post_tiers pt ON pt.post_id = p.id
            WHERE p.id = ANY($1)
            GROUP BY p.id
            "#,
        )
        .bind(&raw)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Self::into_posts(results)
    }

    #[instrument(skip(self))]
    async fn find_by_author(
        &self,
        author_id: Snowflake,
        status: Option<PostStatus>,
    ) -> RepoResult<Vec<Post>> {
        let results = sqlx::query_as::<_, PostWithTiersModel>(
            r#"
            SELECT p.id, p.title, p.content, p.author_id, p.category_id, p.status, p.is_free,
                   p.created_at, p.updated_at,
                   COALESCE(ARRAY_AGG(pt.tier_id ORDER BY pt.tier_id)
                            FILTER (WHERE pt.tier_id IS NOT NULL), '{}') AS tier_ids
            FROM posts p
            LEFT JOIN post_tiers pt ON pt.post_id = p.id
            WHERE p.author_id = $1 AND ($2::TEXT IS NULL OR p.status = $2)
            GROUP BY p.id
            ORDER BY p.created_at DESC, p.id
            "#,
        )
        .bind(author_id.into_inner())
        .bind(status.map(PostStatus::as_str))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Self::into_posts(results)
    }

    #[instrument(skip(self))]
    async fn find_published(&self, query: PostQuery) -> RepoResult<Vec<Post>> {
        let results = sqlx::query_as::<_, PostWithTiersModel>(
            r#"
            SELECT p.id, p.title, p.content, p.author_id, p.category_id, p.status, p.is_free,
                   p.created_at, p.updated_at,
                   COALESCE(ARRAY_AGG(pt.tier_id ORDER BY pt.tier_id)
                            FILTER (WHERE pt.tier_id IS NOT NULL), '{}') AS tier_ids
            FROM posts p
            LEFT JOIN post_tiers pt ON pt.post_id = p.id
            WHERE p.status = 'published'
              AND ($1::BIGINT IS NULL OR p.category_id = $1)
              AND ($2::BIGINT IS NULL OR p.author_id = $2)
            GROUP BY p.id
            ORDER BY p.created_at DESC, p.id
            "#,
        )
        .bind(query.category_id.map(Snowflake::into_inner))
        .bind(query.author_id.map(Snowflake::into_inner))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Self::into_posts(results)
    }

    #[instrument(skip(self, author_ids), fields(count = author_ids.len()))]
    async fn find_published_by_authors(&self, author_ids: &[Snowflake]) -> RepoResult<Vec<Post>> {
        if author_ids.is_empty() {
            return Ok(Vec::new());
        }

        let raw: Vec<i64> = author_ids.iter().map(|id| id.into_inner()).collect();
        let results = sqlx::query_as::<_, PostWithTiersModel>(
            r#"
            SELECT p.id, p.title, p.content, p.author_id, p.category_id, p.status, p.is_free,
                   p.created_at, p.updated_at,
                   COALESCE(ARRAY_AGG(pt.tier_id ORDER BY pt.tier_id)
                            FILTER (WHERE pt.tier_id IS NOT NULL), '{}') AS tier_ids
            FROM posts p
            LEFT JOIN post_tiers pt ON pt.post_id = p.id
            WHERE p.status = 'published' AND p.author_id = ANY($1)
            GROUP BY p.id
            ORDER BY p.created_at DESC, p.id
            "#,
        )
        .bind(&raw)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Self::into_posts(results)
    }

    #[instrument(skip(self, post), fields(post_id = %post.id))]
    async fn create(&self, post: &Post) -> RepoResult<()> {
        let row = PostInsert::new(post);
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            r#"
            INSERT INTO posts (id, title, content, author_id, category_id, status, is_free, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(row.id)
        .bind(row.title)
        .bind(row.content)
        .bind(row.author_id)
        .bind(row.category_id)
        .bind(row.status)
        .bind(row.is_free)
        .bind(post.created_at)
        .bind(post.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            map_foreign_key_violation(e, || match post.category_id {
                Some(category_id) => DomainError::CategoryNotFound(category_id),
                None => DomainError::UserNotFound(post.author_id),
            })
        })?;

        Self::replace_tiers(&mut tx, row.id, &row.tier_ids).await?;
        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, post), fields(post_id = %post.id))]
    async fn update(&self, post: &Post) -> RepoResult<()> {
        let row = PostInsert::new(post);
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let result = sqlx::query(
            r#"
            UPDATE posts
            SET title = $2, content = $3, category_id = $4, status = $5, is_free = $6, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(row.id)
        .bind(row.title)
        .bind(row.content)
        .bind(row.category_id)
        .bind(row.status)
        .bind(row.is_free)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            map_foreign_key_violation(e, || {
                DomainError::CategoryNotFound(post.category_id.unwrap_or_default())
            })
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::PostNotFound(post.id));
        }

        Self::replace_tiers(&mut tx, row.id, &row.tier_ids).await?;
        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        // comments and post_tiers cascade
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::PostNotFound(id));
        }

        Ok(())
    }
}
