//! Catalog services for the storefront.
//!
//! This crate turns raw gateway records into typed catalog entities and back:
//!
//! - **Catalog**: products, categories, collections, reviews and their drafts
//! - **Search**: listing filters, sort keys, free-text search
//! - **Rating**: average rating and star histograms
//! - **Service**: one service per table over an injected [`RecordGateway`]
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use storefront_catalog::prelude::*;
//! use storefront_gateway::HttpGateway;
//!
//! let gateway = Arc::new(HttpGateway::from_env()?);
//! let ctx = ServiceContext::new(gateway);
//!
//! let filter = ProductFilter::new()
//!     .category("Skincare")
//!     .in_stock()
//!     .sort_by(SortKey::PriceLow);
//! let products = ctx.products().filter_products(&filter).await;
//!
//! let summary = ctx.reviews().get_summary(products[0].id).await;
//! println!("{} reviews, {:.1} stars", summary.total_reviews, summary.average_rating);
//! ```
//!
//! [`RecordGateway`]: storefront_gateway::RecordGateway

pub mod decode;
pub mod error;
pub mod ids;
pub mod notify;
pub mod rating;
pub mod reconcile;
pub mod schema;

pub mod catalog;
pub mod search;
pub mod service;

pub use error::CatalogError;
pub use ids::*;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CatalogError;
    pub use crate::ids::*;

    // Catalog
    pub use crate::catalog::{
        Category, CategoryDraft, Collection, CollectionDraft, Entity, Product, Review,
        ReviewDraft, Subcategory,
    };

    // Search
    pub use crate::search::{ProductFilter, ProductQuery, SortKey};

    // Aggregation
    pub use crate::rating::{average_rating, RatingDistribution, ReviewSummary};

    // Services
    pub use crate::notify::{MemoryNotifier, Notice, NoticeLevel, Notifier, TracingNotifier};
    pub use crate::service::{
        CategoryService, CollectionService, ProductService, ReviewService, ServiceContext,
        FEATURED_LIMIT, RELATED_LIMIT,
    };
}
