//! A scripted gateway for tests.
//!
//! `RecordingGateway` answers each operation from a queue of scripted
//! responses and records every call it receives, so tests can assert on the
//! exact parameters a service built and on how many round trips it made.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use serde_json::Value;

use crate::{
    DeleteParams, FetchParams, FetchResponse, GatewayError, MutationParams, MutationResponse,
    Record, RecordGateway, RecordParams, RecordResponse,
};

/// One call received by a [`RecordingGateway`].
#[derive(Debug, Clone, PartialEq)]
pub enum GatewayCall {
    Fetch { table: String, params: FetchParams },
    GetById { table: String, id: i64, params: RecordParams },
    Create { table: String, params: MutationParams },
    Update { table: String, params: MutationParams },
    Delete { table: String, params: DeleteParams },
}

impl GatewayCall {
    /// The table the call targeted.
    pub fn table(&self) -> &str {
        match self {
            GatewayCall::Fetch { table, .. }
            | GatewayCall::GetById { table, .. }
            | GatewayCall::Create { table, .. }
            | GatewayCall::Update { table, .. }
            | GatewayCall::Delete { table, .. } => table,
        }
    }

    /// Fetch parameters, if this was a fetch.
    pub fn fetch_params(&self) -> Option<&FetchParams> {
        match self {
            GatewayCall::Fetch { params, .. } => Some(params),
            _ => None,
        }
    }

    /// Submitted records, if this was a create or update.
    pub fn records(&self) -> Option<&[Record]> {
        match self {
            GatewayCall::Create { params, .. } | GatewayCall::Update { params, .. } => {
                Some(&params.records)
            }
            _ => None,
        }
    }
}

type Scripted<T> = Mutex<VecDeque<Result<T, GatewayError>>>;

/// Gateway double answering from scripted queues.
///
/// Unscripted fetches return an empty successful page, unscripted lookups
/// return a successful response with no record, and unscripted mutations
/// return an unsuccessful response.
#[derive(Default)]
pub struct RecordingGateway {
    calls: Mutex<Vec<GatewayCall>>,
    fetches: Scripted<FetchResponse>,
    lookups: Scripted<RecordResponse>,
    mutations: Scripted<MutationResponse>,
}

fn guard<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl RecordingGateway {
    /// Create an empty gateway.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a fetch response.
    pub fn push_fetch(&self, response: FetchResponse) -> &Self {
        guard(&self.fetches).push_back(Ok(response));
        self
    }

    /// Queue a fetch transport error.
    pub fn push_fetch_error(&self, error: GatewayError) -> &Self {
        guard(&self.fetches).push_back(Err(error));
        self
    }

    /// Queue a get-by-id response.
    pub fn push_lookup(&self, response: RecordResponse) -> &Self {
        guard(&self.lookups).push_back(Ok(response));
        self
    }

    /// Queue a get-by-id transport error.
    pub fn push_lookup_error(&self, error: GatewayError) -> &Self {
        guard(&self.lookups).push_back(Err(error));
        self
    }

    /// Queue a create/update/delete response.
    pub fn push_mutation(&self, response: MutationResponse) -> &Self {
        guard(&self.mutations).push_back(Ok(response));
        self
    }

    /// Queue a create/update/delete transport error.
    pub fn push_mutation_error(&self, error: GatewayError) -> &Self {
        guard(&self.mutations).push_back(Err(error));
        self
    }

    /// Every call received so far, oldest first.
    pub fn calls(&self) -> Vec<GatewayCall> {
        guard(&self.calls).clone()
    }

    /// Number of calls received so far.
    pub fn call_count(&self) -> usize {
        guard(&self.calls).len()
    }

    /// The most recent call.
    pub fn last_call(&self) -> Option<GatewayCall> {
        guard(&self.calls).last().cloned()
    }

    fn log_call(&self, call: GatewayCall) {
        guard(&self.calls).push(call);
    }
}

/// Convert a JSON object literal into a [`Record`].
///
/// Non-object values produce an empty record.
pub fn record(value: Value) -> Record {
    match value {
        Value::Object(map) => map,
        _ => Record::new(),
    }
}

#[async_trait]
impl RecordGateway for RecordingGateway {
    async fn fetch_records(
        &self,
        table: &str,
        params: &FetchParams,
    ) -> Result<FetchResponse, GatewayError> {
        self.log_call(GatewayCall::Fetch {
            table: table.to_string(),
            params: params.clone(),
        });
        guard(&self.fetches)
            .pop_front()
            .unwrap_or_else(|| Ok(FetchResponse::ok(Vec::new())))
    }

    async fn get_record_by_id(
        &self,
        table: &str,
        id: i64,
        params: &RecordParams,
    ) -> Result<RecordResponse, GatewayError> {
        self.log_call(GatewayCall::GetById {
            table: table.to_string(),
            id,
            params: params.clone(),
        });
        guard(&self.lookups)
            .pop_front()
            .unwrap_or_else(|| Ok(RecordResponse::missing()))
    }

    async fn create_records(
        &self,
        table: &str,
        params: &MutationParams,
    ) -> Result<MutationResponse, GatewayError> {
        self.log_call(GatewayCall::Create {
            table: table.to_string(),
            params: params.clone(),
        });
        self.next_mutation()
    }

    async fn update_records(
        &self,
        table: &str,
        params: &MutationParams,
    ) -> Result<MutationResponse, GatewayError> {
        self.log_call(GatewayCall::Update {
            table: table.to_string(),
            params: params.clone(),
        });
        self.next_mutation()
    }

    async fn delete_records(
        &self,
        table: &str,
        params: &DeleteParams,
    ) -> Result<MutationResponse, GatewayError> {
        self.log_call(GatewayCall::Delete {
            table: table.to_string(),
            params: params.clone(),
        });
        self.next_mutation()
    }
}

impl RecordingGateway {
    fn next_mutation(&self) -> Result<MutationResponse, GatewayError> {
        guard(&self.mutations)
            .pop_front()
            .unwrap_or_else(|| Ok(MutationResponse::failed("no scripted mutation response")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{project, Condition};
    use serde_json::json;

    #[tokio::test]
    async fn test_scripted_fetch_and_call_log() {
        let gateway = RecordingGateway::new();
        gateway.push_fetch(FetchResponse::ok(vec![record(json!({"Id": 1}))]));

        let params = FetchParams::new(project(&["Id"])).with_condition(Condition::equal_to("Id", 1));
        let resp = gateway.fetch_records("product_c", &params).await.unwrap();
        assert_eq!(resp.data.len(), 1);

        let calls = gateway.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].table(), "product_c");
        assert_eq!(calls[0].fetch_params(), Some(&params));
    }

    #[tokio::test]
    async fn test_unscripted_defaults() {
        let gateway = RecordingGateway::new();
        let fetched = gateway
            .fetch_records("t", &FetchParams::default())
            .await
            .unwrap();
        assert!(fetched.success && fetched.data.is_empty());

        let found = gateway
            .get_record_by_id("t", 1, &RecordParams::default())
            .await
            .unwrap();
        assert!(found.success && found.data.is_none());

        let created = gateway
            .create_records("t", &MutationParams::default())
            .await
            .unwrap();
        assert!(!created.success);
        assert_eq!(gateway.call_count(), 3);
    }

    #[tokio::test]
    async fn test_scripted_error() {
        let gateway = RecordingGateway::new();
        gateway.push_lookup_error(GatewayError::Timeout);
        let result = gateway
            .get_record_by_id("t", 9, &RecordParams::default())
            .await;
        assert!(matches!(result, Err(GatewayError::Timeout)));
    }

    #[test]
    fn test_record_helper() {
        assert_eq!(record(json!({"a": 1}))["a"], json!(1));
        assert!(record(json!([1, 2])).is_empty());
    }
}
