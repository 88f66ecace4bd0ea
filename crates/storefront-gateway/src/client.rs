//! The record gateway seam and its HTTP implementation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Method;
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::{
    DeleteParams, FetchParams, FetchResponse, GatewayConfig, GatewayError, MutationParams,
    MutationResponse, RecordParams, RecordResponse,
};

/// Record operations offered by the hosted gateway.
///
/// Each call is one request/response round trip. Implementations own
/// transport concerns (timeouts, connection reuse); callers never retry.
#[async_trait]
pub trait RecordGateway: Send + Sync {
    /// Fetch many records from `table`.
    async fn fetch_records(
        &self,
        table: &str,
        params: &FetchParams,
    ) -> Result<FetchResponse, GatewayError>;

    /// Fetch one record by primary key.
    async fn get_record_by_id(
        &self,
        table: &str,
        id: i64,
        params: &RecordParams,
    ) -> Result<RecordResponse, GatewayError>;

    /// Create a batch of records.
    async fn create_records(
        &self,
        table: &str,
        params: &MutationParams,
    ) -> Result<MutationResponse, GatewayError>;

    /// Update a batch of records. Each record carries its `Id`.
    async fn update_records(
        &self,
        table: &str,
        params: &MutationParams,
    ) -> Result<MutationResponse, GatewayError>;

    /// Delete a batch of records by id.
    async fn delete_records(
        &self,
        table: &str,
        params: &DeleteParams,
    ) -> Result<MutationResponse, GatewayError>;
}

/// JSON-over-HTTP gateway client.
///
/// Routes, relative to the configured base URL:
///
/// | Operation | Method | Path |
/// |---|---|---|
/// | fetch | `POST` | `/tables/{table}/fetch` |
/// | get by id | `POST` | `/tables/{table}/records/{id}` |
/// | create | `POST` | `/tables/{table}/records` |
/// | update | `PATCH` | `/tables/{table}/records` |
/// | delete | `DELETE` | `/tables/{table}/records` |
pub struct HttpGateway {
    client: reqwest::Client,
    config: GatewayConfig,
}

impl HttpGateway {
    /// Create a client from a validated config.
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayError> {
        let config = config.validate()?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    /// Create a client from environment credentials.
    pub fn from_env() -> Result<Self, GatewayError> {
        Self::new(GatewayConfig::from_env()?)
    }

    /// The active configuration.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn send<B, T>(&self, method: Method, path: String, body: &B) -> Result<T, GatewayError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let url = self.url(&path);
        debug!(method = %method, url = %url, "gateway request");

        let response = self
            .client
            .request(method, &url)
            .header("X-Project-Id", &self.config.project_id)
            .bearer_auth(&self.config.public_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(GatewayError::HttpError {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response.bytes().await?;
        parse_body(&bytes)
    }
}

/// Decode a 2xx response body. Malformed bodies are parse errors.
fn parse_body<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, GatewayError> {
    serde_json::from_slice(bytes).map_err(|e| GatewayError::ParseError(e.to_string()))
}

#[async_trait]
impl RecordGateway for HttpGateway {
    async fn fetch_records(
        &self,
        table: &str,
        params: &FetchParams,
    ) -> Result<FetchResponse, GatewayError> {
        self.send(Method::POST, format!("/tables/{}/fetch", table), params)
            .await
    }

    async fn get_record_by_id(
        &self,
        table: &str,
        id: i64,
        params: &RecordParams,
    ) -> Result<RecordResponse, GatewayError> {
        self.send(Method::POST, format!("/tables/{}/records/{}", table, id), params)
            .await
    }

    async fn create_records(
        &self,
        table: &str,
        params: &MutationParams,
    ) -> Result<MutationResponse, GatewayError> {
        self.send(Method::POST, format!("/tables/{}/records", table), params)
            .await
    }

    async fn update_records(
        &self,
        table: &str,
        params: &MutationParams,
    ) -> Result<MutationResponse, GatewayError> {
        self.send(Method::PATCH, format!("/tables/{}/records", table), params)
            .await
    }

    async fn delete_records(
        &self,
        table: &str,
        params: &DeleteParams,
    ) -> Result<MutationResponse, GatewayError> {
        self.send(Method::DELETE, format!("/tables/{}/records", table), params)
            .await
    }
}
