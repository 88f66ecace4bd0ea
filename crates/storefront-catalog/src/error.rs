//! Catalog error types.

use storefront_gateway::GatewayError;
use thiserror::Error;

/// Errors that can occur inside a catalog operation.
///
/// Service methods convert these into empty/`None`/`false` results at their
/// boundary; the `try_*` variants return them to the caller instead.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The gateway answered but reported failure.
    #[error("Gateway rejected request on {table}: {message}")]
    Rejected { table: String, message: String },

    /// The gateway could not be reached or answered garbage.
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    /// A record field could not be decoded.
    #[error("Failed to decode field {field}: {message}")]
    Decode { field: String, message: String },

    /// A list element contains the list delimiter and cannot be stored.
    #[error("Value {value:?} in field {field} contains the delimiter '{delimiter}'")]
    Delimiter {
        field: String,
        value: String,
        delimiter: char,
    },

    /// A mutation batch came back without any successful record.
    #[error("No record in the {table} batch succeeded")]
    BatchFailed { table: String },
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        CatalogError::Decode {
            field: "<record>".to_string(),
            message: e.to_string(),
        }
    }
}
