//! Record services.
//!
//! Each service wraps one gateway table. Public methods never fail: a
//! rejected request, a transport error or an undecodable record is logged
//! and degrades to an empty list, `None`, `false` or zero. The `try_*`
//! variants return the underlying [`CatalogError`] instead.

mod category;
mod collection;
mod product;
mod review;

pub use category::CategoryService;
pub use collection::CollectionService;
pub use product::{ProductService, FEATURED_LIMIT, RELATED_LIMIT};
pub use review::ReviewService;

use crate::catalog::Entity;
use crate::error::CatalogError;
use crate::notify::{Notice, Notifier, TracingNotifier};
use crate::reconcile::{BatchOutcome, MutationKind};
use std::sync::Arc;
use storefront_gateway::{
    DeleteParams, FetchParams, MutationParams, MutationResponse, Record, RecordGateway,
    RecordParams,
};
use tracing::{debug, error, warn};

/// What to do when the gateway rejects a read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OnReject {
    /// Tell the user.
    Notify,
    /// Log only.
    Quiet,
}

/// Shared handles injected into every service.
#[derive(Clone)]
pub struct ServiceContext {
    gateway: Arc<dyn RecordGateway>,
    notifier: Arc<dyn Notifier>,
}

impl ServiceContext {
    /// Create a context that reports notices through `tracing`.
    pub fn new(gateway: Arc<dyn RecordGateway>) -> Self {
        Self {
            gateway,
            notifier: Arc::new(TracingNotifier),
        }
    }

    /// Replace the notice sink.
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn gateway(&self) -> &dyn RecordGateway {
        self.gateway.as_ref()
    }

    /// Send a user-visible notice.
    pub fn notify(&self, notice: Notice) {
        self.notifier.notify(notice);
    }

    pub fn products(&self) -> ProductService {
        ProductService::new(self.clone())
    }

    pub fn categories(&self) -> CategoryService {
        CategoryService::new(self.clone())
    }

    pub fn collections(&self) -> CollectionService {
        CollectionService::new(self.clone())
    }

    pub fn reviews(&self) -> ReviewService {
        ReviewService::new(self.clone())
    }

    /// Fetch and decode a page of entities.
    pub(crate) async fn fetch<E: Entity>(
        &self,
        params: &FetchParams,
        on_reject: OnReject,
    ) -> Result<Vec<E>, CatalogError> {
        debug!(
            table = E::TABLE,
            conditions = params.conditions.len(),
            groups = params.where_groups.len(),
            "fetching records"
        );
        let response = self.gateway.fetch_records(E::TABLE, params).await?;
        if !response.success {
            let message = response.message.unwrap_or_default();
            if on_reject == OnReject::Notify {
                self.notify(Notice::error(message.clone()));
            }
            return Err(CatalogError::Rejected {
                table: E::TABLE.to_string(),
                message,
            });
        }
        E::from_records(&response.data)
    }

    /// Look up one entity by id. A missing record is `Ok(None)`.
    pub(crate) async fn find<E: Entity>(&self, id: i64) -> Result<Option<E>, CatalogError> {
        debug!(table = E::TABLE, id, "looking up record");
        let params = RecordParams::new(E::projection());
        let response = self.gateway.get_record_by_id(E::TABLE, id, &params).await?;
        if !response.success {
            return Err(CatalogError::Rejected {
                table: E::TABLE.to_string(),
                message: response.message.unwrap_or_default(),
            });
        }
        response.data.as_ref().map(E::from_record).transpose()
    }

    /// Create one record and decode what the gateway stored.
    pub(crate) async fn create<E: Entity>(&self, record: Record) -> Result<E, CatalogError> {
        debug!(table = E::TABLE, "creating record");
        let params = MutationParams::single(record);
        let response = self.gateway.create_records(E::TABLE, &params).await?;
        self.first_accepted(MutationKind::Create, response)
    }

    /// Update one record (the record carries its `Id`).
    pub(crate) async fn update<E: Entity>(&self, record: Record) -> Result<E, CatalogError> {
        debug!(table = E::TABLE, "updating record");
        let params = MutationParams::single(record);
        let response = self.gateway.update_records(E::TABLE, &params).await?;
        self.first_accepted(MutationKind::Update, response)
    }

    fn first_accepted<E: Entity>(
        &self,
        kind: MutationKind,
        response: MutationResponse,
    ) -> Result<E, CatalogError> {
        let outcome = self.reconcile(E::TABLE, kind, response)?;
        let record = outcome
            .first_success()
            .ok_or_else(|| CatalogError::BatchFailed {
                table: E::TABLE.to_string(),
            })?;
        E::from_record(record)
    }

    /// Delete one record. Succeeds only if exactly one record was deleted.
    pub(crate) async fn remove(&self, table: &str, id: i64) -> Result<(), CatalogError> {
        debug!(table, id, "deleting record");
        let response = self
            .gateway
            .delete_records(table, &DeleteParams::single(id))
            .await?;
        let outcome = self.reconcile(table, MutationKind::Delete, response)?;
        if outcome.single_success() {
            Ok(())
        } else {
            Err(CatalogError::BatchFailed {
                table: table.to_string(),
            })
        }
    }

    /// Split a mutation response, reporting rejections and failed records.
    fn reconcile(
        &self,
        table: &str,
        kind: MutationKind,
        response: MutationResponse,
    ) -> Result<BatchOutcome, CatalogError> {
        let outcome = match BatchOutcome::from_response(table, response) {
            Ok(outcome) => outcome,
            Err(e) => {
                if let CatalogError::Rejected { message, .. } = &e {
                    self.notify(Notice::error(message.clone()));
                }
                return Err(e);
            }
        };
        for result in &outcome.failed {
            warn!(
                table,
                operation = %kind,
                field_errors = result.errors.len(),
                message = result.message.as_deref().unwrap_or_default(),
                "record rejected"
            );
        }
        for notice in outcome.notices(kind) {
            self.notify(notice);
        }
        Ok(outcome)
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext").finish_non_exhaustive()
    }
}

/// Convert an operation result into its failure sentinel, logging the cause.
pub(crate) fn or_sentinel<T: Default>(operation: &str, result: Result<T, CatalogError>) -> T {
    or_fallback(operation, result, T::default)
}

pub(crate) fn or_fallback<T>(
    operation: &str,
    result: Result<T, CatalogError>,
    fallback: impl FnOnce() -> T,
) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            error!(operation, error = %e, "catalog operation failed");
            fallback()
        }
    }
}
