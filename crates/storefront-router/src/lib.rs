//! Page routing for the storefront.
//!
//! Every page is nested under the shared layout:
//!
//! ```text
//! /                                          -> Home (index)
//! /product/:productId                        -> ProductPage
//! /category/:categorySlug                    -> CategoryPage
//! /search                                    -> SearchPage
//! /checkout                                  -> CheckoutPage
//! /login, /signup, /callback, /error
//! /prompt-password/:appId/:emailAddress/:provider
//! /reset-password/:appId/:fields
//! *                                          -> NotFound
//! ```
//!
//! # Usage
//!
//! ```rust
//! use storefront_router::prelude::*;
//!
//! let routes = RouteRegistry::storefront();
//! let resolved = routes.resolve("/product/42");
//! assert_eq!(resolved.page, Page::Product);
//! assert_eq!(resolved.params.get_parsed::<i64>("productId"), Some(42));
//! ```

pub mod lazy;
pub mod page;
pub mod registry;
pub mod route;

pub use lazy::{LazyPages, LoadState, LOADING_FALLBACK};
pub use page::Page;
pub use registry::{RouteEntry, RouteMatch, RouteMeta, RouteRegistry, LAYOUT};
pub use route::{RouteError, RouteParams, RoutePattern, Segment};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        LazyPages, LoadState, Page, RouteEntry, RouteError, RouteMatch, RouteMeta, RouteParams,
        RoutePattern, RouteRegistry,
    };
}
