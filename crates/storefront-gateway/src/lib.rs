//! Typed client for the hosted record gateway behind the storefront.
//!
//! The gateway stores records in named tables (`product_c`, `review_c`, ...)
//! and exposes fetch / get-by-id / create / update / delete over a JSON API.
//! This crate models that wire format and the [`RecordGateway`] seam the
//! catalog services are written against. Services receive the gateway as an
//! injected `Arc<dyn RecordGateway>`; nothing here holds global state.
//!
//! # Example
//!
//! ```rust,ignore
//! use storefront_gateway::{
//!     project, Condition, FetchParams, HttpGateway, OrderBy, RecordGateway,
//! };
//!
//! let gateway = HttpGateway::from_env()?;
//!
//! let params = FetchParams::new(project(&["Id", "name_c", "rating_c"]))
//!     .with_condition(Condition::equal_to("category_c", "Skincare"))
//!     .with_order(OrderBy::desc("rating_c"));
//!
//! let response = gateway.fetch_records("product_c", &params).await?;
//! if response.success {
//!     for record in &response.data {
//!         println!("{:?}", record.get("name_c"));
//!     }
//! }
//! ```

mod client;
mod config;
mod error;
mod request;
mod response;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use client::{HttpGateway, RecordGateway};
pub use config::{GatewayConfig, GATEWAY_URL_VAR, PROJECT_ID_VAR, PUBLIC_KEY_VAR};
pub use error::GatewayError;
pub use request::{
    project, Condition, DeleteParams, FetchParams, FieldRef, FieldSelector, GroupCondition, Logic,
    MutationParams, Operator, OrderBy, PagingInfo, RecordParams, SortType, SubGroup, WhereGroup,
};
pub use response::{FetchResponse, FieldError, MutationResponse, RecordResponse, RecordResult};

/// A raw gateway record: vendor field names mapped to JSON values.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        project, Condition, FetchParams, GatewayConfig, GatewayError, HttpGateway, OrderBy,
        PagingInfo, Record, RecordGateway,
    };
}
