//! Gateway response envelopes.

use serde::{Deserialize, Deserializer, Serialize};

use crate::Record;

/// Treat an explicit JSON `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Response to a fetch-many request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FetchResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Vec<Record>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

impl FetchResponse {
    /// A successful response carrying `data`.
    pub fn ok(data: Vec<Record>) -> Self {
        Self {
            success: true,
            data,
            ..Self::default()
        }
    }

    /// An unsuccessful response with a gateway message.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            ..Self::default()
        }
    }
}

/// Response to a get-by-id request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<Record>,
}

impl RecordResponse {
    /// A successful response carrying one record.
    pub fn found(record: Record) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(record),
        }
    }

    /// A successful response with no record.
    pub fn missing() -> Self {
        Self {
            success: true,
            message: None,
            data: None,
        }
    }

    /// An unsuccessful response with a gateway message.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
        }
    }
}

/// A field-level validation error on one record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldError {
    #[serde(default)]
    pub field_label: String,
    #[serde(default)]
    pub message: String,
}

impl FieldError {
    /// Create a field error.
    pub fn new(field_label: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field_label: field_label.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field_label, self.message)
    }
}

/// The outcome of one record in a mutation batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordResult {
    pub success: bool,
    #[serde(default)]
    pub data: Option<Record>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub errors: Vec<FieldError>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl RecordResult {
    /// A record that was stored.
    pub fn succeeded(record: Record) -> Self {
        Self {
            success: true,
            data: Some(record),
            ..Self::default()
        }
    }

    /// A record that was rejected.
    pub fn failed(errors: Vec<FieldError>, message: Option<String>) -> Self {
        Self {
            success: false,
            data: None,
            errors,
            message,
        }
    }
}

/// Response to a create, update or delete batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MutationResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default)]
    pub results: Option<Vec<RecordResult>>,
}

impl MutationResponse {
    /// A response that reached the gateway and reports per-record results.
    pub fn with_results(results: Vec<RecordResult>) -> Self {
        Self {
            success: true,
            message: None,
            results: Some(results),
        }
    }

    /// An unsuccessful response with a gateway message.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            results: None,
        }
    }
}
