//! Collection reads and writes.

use super::{or_sentinel, OnReject, ServiceContext};
use crate::catalog::{Collection, CollectionDraft, Entity};
use crate::error::CatalogError;
use crate::ids::CollectionId;
use crate::schema::{self, collection as fields};
use serde_json::Value;
use storefront_gateway::{Condition, FetchParams, OrderBy};

#[derive(Debug, Clone)]
pub struct CollectionService {
    ctx: ServiceContext,
}

impl CollectionService {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    fn by_name() -> FetchParams {
        FetchParams::new(Collection::projection()).with_order(OrderBy::asc(fields::NAME))
    }

    /// All collections by name. A rejected fetch is shown to the user.
    pub async fn get_all(&self) -> Vec<Collection> {
        or_sentinel("collections.get_all", self.try_get_all().await)
    }

    pub async fn try_get_all(&self) -> Result<Vec<Collection>, CatalogError> {
        self.ctx.fetch(&Self::by_name(), OnReject::Notify).await
    }

    pub async fn get_by_id(&self, id: CollectionId) -> Option<Collection> {
        or_sentinel("collections.get_by_id", self.try_get_by_id(id).await)
    }

    pub async fn try_get_by_id(&self, id: CollectionId) -> Result<Option<Collection>, CatalogError> {
        self.ctx.find(id.get()).await
    }

    pub async fn get_by_slug(&self, slug: &str) -> Option<Collection> {
        or_sentinel("collections.get_by_slug", self.try_get_by_slug(slug).await)
    }

    pub async fn try_get_by_slug(&self, slug: &str) -> Result<Option<Collection>, CatalogError> {
        let params = FetchParams::new(Collection::projection())
            .with_condition(Condition::equal_to(fields::SLUG, slug));
        let collections: Vec<Collection> = self.ctx.fetch(&params, OnReject::Quiet).await?;
        Ok(collections.into_iter().next())
    }

    /// Featured collections by name. A rejected fetch is shown to the user.
    pub async fn get_featured(&self) -> Vec<Collection> {
        or_sentinel("collections.get_featured", self.try_get_featured().await)
    }

    pub async fn try_get_featured(&self) -> Result<Vec<Collection>, CatalogError> {
        let params = Self::by_name().with_condition(Condition::equal_to(fields::FEATURED, true));
        self.ctx.fetch(&params, OnReject::Notify).await
    }

    /// Create a collection. Unset `featured` is stored as `false`.
    pub async fn create(&self, draft: &CollectionDraft) -> Option<Collection> {
        or_sentinel("collections.create", self.try_create(draft).await.map(Some))
    }

    pub async fn try_create(&self, draft: &CollectionDraft) -> Result<Collection, CatalogError> {
        let mut record = draft.to_record()?;
        record
            .entry(fields::FEATURED)
            .or_insert(Value::Bool(false));
        self.ctx.create(record).await
    }

    pub async fn update(&self, id: CollectionId, draft: &CollectionDraft) -> Option<Collection> {
        or_sentinel("collections.update", self.try_update(id, draft).await.map(Some))
    }

    pub async fn try_update(
        &self,
        id: CollectionId,
        draft: &CollectionDraft,
    ) -> Result<Collection, CatalogError> {
        let mut record = draft.to_record()?;
        record.insert(schema::ID.into(), Value::from(id.get()));
        self.ctx.update(record).await
    }

    pub async fn delete(&self, id: CollectionId) -> bool {
        or_sentinel(
            "collections.delete",
            self.try_delete(id).await.map(|()| true),
        )
    }

    pub async fn try_delete(&self, id: CollectionId) -> Result<(), CatalogError> {
        self.ctx.remove(fields::TABLE, id.get()).await
    }
}
