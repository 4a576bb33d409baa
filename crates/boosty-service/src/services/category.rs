//! Category service
//!
//! Categories are managed by operators; reads are public.

use tracing::{info, instrument};
use validator::Validate;

use boosty_core::{Category, Snowflake};

use crate::dto::{CategoryResponse, CreateCategoryRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Category service
pub struct CategoryService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CategoryService<'a> {
    /// Create a new CategoryService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// All categories ordered by name
    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> ServiceResult<Vec<CategoryResponse>> {
        let categories = self.ctx.category_repo().find_all().await?;
        Ok(categories.iter().map(CategoryResponse::from).collect())
    }

    /// Get a category by id
    #[instrument(skip(self))]
    pub async fn get_category(&self, category_id: Snowflake) -> ServiceResult<CategoryResponse> {
        let category = self
            .ctx
            .category_repo()
            .find_by_id(category_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Category", category_id.to_string()))?;

        Ok(CategoryResponse::from(&category))
    }

    /// Create a category (operator only)
    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create_category(
        &self,
        request: CreateCategoryRequest,
    ) -> ServiceResult<CategoryResponse> {
        request.validate()?;

        let category = Category::new(self.ctx.generate_id(), request.name, request.description);
        self.ctx.category_repo().create(&category).await?;

        info!(category_id = %category.id, name = %category.name, "Category created");
        Ok(CategoryResponse::from(&category))
    }

    /// Delete a category (operator only); its posts become uncategorized
    #[instrument(skip(self))]
    pub async fn delete_category(&self, category_id: Snowflake) -> ServiceResult<()> {
        self.ctx.category_repo().delete(category_id).await?;
        info!(category_id = %category_id, "Category deleted");
        Ok(())
    }
}
