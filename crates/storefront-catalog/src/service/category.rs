//! Category reads and writes.

use super::{or_sentinel, OnReject, ServiceContext};
use crate::catalog::{Category, CategoryDraft, Entity, Subcategory};
use crate::error::CatalogError;
use crate::ids::CategoryId;
use crate::schema::{self, category as fields};
use serde_json::Value;
use storefront_gateway::{Condition, FetchParams, OrderBy};

#[derive(Debug, Clone)]
pub struct CategoryService {
    ctx: ServiceContext,
}

impl CategoryService {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    /// All categories by name. A rejected fetch is shown to the user.
    pub async fn get_all(&self) -> Vec<Category> {
        or_sentinel("categories.get_all", self.try_get_all().await)
    }

    pub async fn try_get_all(&self) -> Result<Vec<Category>, CatalogError> {
        let params = FetchParams::new(Category::projection()).with_order(OrderBy::asc(fields::NAME));
        self.ctx.fetch(&params, OnReject::Notify).await
    }

    pub async fn get_by_id(&self, id: CategoryId) -> Option<Category> {
        or_sentinel("categories.get_by_id", self.try_get_by_id(id).await)
    }

    pub async fn try_get_by_id(&self, id: CategoryId) -> Result<Option<Category>, CatalogError> {
        self.ctx.find(id.get()).await
    }

    /// First category with this slug.
    pub async fn get_by_slug(&self, slug: &str) -> Option<Category> {
        or_sentinel("categories.get_by_slug", self.try_get_by_slug(slug).await)
    }

    pub async fn try_get_by_slug(&self, slug: &str) -> Result<Option<Category>, CatalogError> {
        let params = FetchParams::new(Category::projection())
            .with_condition(Condition::equal_to(fields::SLUG, slug));
        let categories: Vec<Category> = self.ctx.fetch(&params, OnReject::Quiet).await?;
        Ok(categories.into_iter().next())
    }

    /// Subcategories of the category with this slug; empty if there is none.
    pub async fn get_subcategories(&self, slug: &str) -> Vec<Subcategory> {
        or_sentinel(
            "categories.get_subcategories",
            self.try_get_subcategories(slug).await,
        )
    }

    pub async fn try_get_subcategories(&self, slug: &str) -> Result<Vec<Subcategory>, CatalogError> {
        Ok(self
            .try_get_by_slug(slug)
            .await?
            .map(|c| c.subcategories)
            .unwrap_or_default())
    }

    pub async fn create(&self, draft: &CategoryDraft) -> Option<Category> {
        or_sentinel("categories.create", self.try_create(draft).await.map(Some))
    }

    pub async fn try_create(&self, draft: &CategoryDraft) -> Result<Category, CatalogError> {
        self.ctx.create(draft.to_record()?).await
    }

    pub async fn update(&self, id: CategoryId, draft: &CategoryDraft) -> Option<Category> {
        or_sentinel("categories.update", self.try_update(id, draft).await.map(Some))
    }

    pub async fn try_update(
        &self,
        id: CategoryId,
        draft: &CategoryDraft,
    ) -> Result<Category, CatalogError> {
        let mut record = draft.to_record()?;
        record.insert(schema::ID.into(), Value::from(id.get()));
        self.ctx.update(record).await
    }

    pub async fn delete(&self, id: CategoryId) -> bool {
        or_sentinel(
            "categories.delete",
            self.try_delete(id).await.map(|()| true),
        )
    }

    pub async fn try_delete(&self, id: CategoryId) -> Result<(), CatalogError> {
        self.ctx.remove(fields::TABLE, id.get()).await
    }
}
