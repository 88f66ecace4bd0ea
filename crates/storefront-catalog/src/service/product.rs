//! Product reads: listings, search, featured and related products.

use super::{or_sentinel, OnReject, ServiceContext};
use crate::catalog::Product;
use crate::error::CatalogError;
use crate::ids::ProductId;
use crate::schema::{self, product as fields};
use crate::search::{ProductFilter, ProductQuery};
use storefront_gateway::Condition;
use tracing::debug;

/// Default number of featured products.
pub const FEATURED_LIMIT: u32 = 8;
/// Default number of related products.
pub const RELATED_LIMIT: u32 = 4;

/// Read access to the product table.
#[derive(Debug, Clone)]
pub struct ProductService {
    ctx: ServiceContext,
}

impl ProductService {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    async fn query(
        &self,
        query: ProductQuery,
        on_reject: OnReject,
    ) -> Result<Vec<Product>, CatalogError> {
        self.ctx.fetch(&query.to_params(), on_reject).await
    }

    /// All products by name. A rejected fetch is shown to the user.
    pub async fn get_all(&self) -> Vec<Product> {
        or_sentinel("products.get_all", self.try_get_all().await)
    }

    pub async fn try_get_all(&self) -> Result<Vec<Product>, CatalogError> {
        self.query(ProductQuery::by_name(), OnReject::Notify).await
    }

    pub async fn get_by_id(&self, id: ProductId) -> Option<Product> {
        or_sentinel("products.get_by_id", self.try_get_by_id(id).await)
    }

    pub async fn try_get_by_id(&self, id: ProductId) -> Result<Option<Product>, CatalogError> {
        self.ctx.find(id.get()).await
    }

    /// Products in a category, highest rated first.
    pub async fn get_by_category(&self, category: &str) -> Vec<Product> {
        or_sentinel(
            "products.get_by_category",
            self.try_get_by_category(category).await,
        )
    }

    pub async fn try_get_by_category(&self, category: &str) -> Result<Vec<Product>, CatalogError> {
        let query = ProductQuery::new().with_condition(Condition::equal_to(fields::CATEGORY, category));
        self.query(query, OnReject::Quiet).await
    }

    /// Products in a subcategory, highest rated first.
    pub async fn get_by_subcategory(&self, subcategory: &str) -> Vec<Product> {
        or_sentinel(
            "products.get_by_subcategory",
            self.try_get_by_subcategory(subcategory).await,
        )
    }

    pub async fn try_get_by_subcategory(
        &self,
        subcategory: &str,
    ) -> Result<Vec<Product>, CatalogError> {
        let query =
            ProductQuery::new().with_condition(Condition::equal_to(fields::SUBCATEGORY, subcategory));
        self.query(query, OnReject::Quiet).await
    }

    /// Products whose name, brand, description or tags contain `query`.
    ///
    /// A blank query matches nothing and makes no request.
    pub async fn search(&self, query: &str) -> Vec<Product> {
        or_sentinel("products.search", self.try_search(query).await)
    }

    pub async fn try_search(&self, query: &str) -> Result<Vec<Product>, CatalogError> {
        if query.trim().is_empty() {
            debug!("blank search query");
            return Ok(Vec::new());
        }
        self.query(ProductQuery::new().with_text(query), OnReject::Quiet)
            .await
    }

    /// The `limit` highest rated products.
    pub async fn get_featured(&self, limit: u32) -> Vec<Product> {
        or_sentinel("products.get_featured", self.try_get_featured(limit).await)
    }

    pub async fn try_get_featured(&self, limit: u32) -> Result<Vec<Product>, CatalogError> {
        self.query(ProductQuery::new().with_limit(limit), OnReject::Quiet)
            .await
    }

    /// Up to `limit` other products from the same category, highest rated first.
    ///
    /// Empty when the anchor product does not exist.
    pub async fn get_related(&self, id: ProductId, limit: u32) -> Vec<Product> {
        or_sentinel("products.get_related", self.try_get_related(id, limit).await)
    }

    pub async fn try_get_related(
        &self,
        id: ProductId,
        limit: u32,
    ) -> Result<Vec<Product>, CatalogError> {
        let Some(anchor) = self.try_get_by_id(id).await? else {
            debug!(%id, "related products for missing anchor");
            return Ok(Vec::new());
        };
        let query = ProductQuery::new()
            .with_condition(Condition::equal_to(fields::CATEGORY, anchor.category))
            .with_condition(Condition::not_equal_to(schema::ID, id.get()))
            .with_limit(limit);
        self.query(query, OnReject::Quiet).await
    }

    /// Products matching a listing filter.
    pub async fn filter_products(&self, filter: &ProductFilter) -> Vec<Product> {
        or_sentinel(
            "products.filter_products",
            self.try_filter_products(filter).await,
        )
    }

    pub async fn try_filter_products(
        &self,
        filter: &ProductFilter,
    ) -> Result<Vec<Product>, CatalogError> {
        self.query(filter.to_query(), OnReject::Quiet).await
    }
}
