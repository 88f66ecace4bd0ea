//! Gateway error types.

use thiserror::Error;

/// Errors that can occur when talking to the record gateway.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Failed to send the request.
    #[error("Request failed: {0}")]
    RequestError(String),

    /// Invalid gateway URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Non-2xx HTTP response from the gateway.
    #[error("HTTP {status}: {message}")]
    HttpError { status: u16, message: String },

    /// Failed to parse the response body.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Request timeout.
    #[error("Request timed out")]
    Timeout,

    /// Missing or unusable client configuration.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<reqwest::Error> for GatewayError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            GatewayError::Timeout
        } else if e.is_builder() {
            GatewayError::InvalidUrl(e.to_string())
        } else if e.is_decode() {
            GatewayError::ParseError(e.to_string())
        } else {
            GatewayError::RequestError(e.to_string())
        }
    }
}
