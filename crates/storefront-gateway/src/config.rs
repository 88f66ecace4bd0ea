//! Gateway client configuration.

use serde::{Deserialize, Serialize};

use crate::GatewayError;

/// Environment variable holding the gateway project id.
pub const PROJECT_ID_VAR: &str = "STOREFRONT_PROJECT_ID";
/// Environment variable holding the gateway public key.
pub const PUBLIC_KEY_VAR: &str = "STOREFRONT_PUBLIC_KEY";
/// Environment variable overriding the gateway base URL.
pub const GATEWAY_URL_VAR: &str = "STOREFRONT_GATEWAY_URL";

/// Credentials and transport settings for the record gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Base URL of the gateway API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Project the records belong to.
    #[serde(default)]
    pub project_id: String,

    /// Public API key for the project.
    #[serde(default)]
    pub public_key: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8787".to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            project_id: String::new(),
            public_key: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl GatewayConfig {
    /// Create a config with explicit credentials.
    pub fn new(project_id: impl Into<String>, public_key: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            public_key: public_key.into(),
            ..Self::default()
        }
    }

    /// Set the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Read credentials from the process environment.
    pub fn from_env() -> Result<Self, GatewayError> {
        Self::default()
            .with_env_from(|key| std::env::var(key).ok())
            .validate()
    }

    /// Override fields with values found through `lookup`.
    ///
    /// Empty values are ignored.
    pub fn with_env_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(project_id) = get(PROJECT_ID_VAR) {
            self.project_id = project_id;
        }
        if let Some(public_key) = get(PUBLIC_KEY_VAR) {
            self.public_key = public_key;
        }
        if let Some(base_url) = get(GATEWAY_URL_VAR) {
            self.base_url = base_url;
        }
        self
    }

    /// Check that credentials are present and the URL is usable.
    pub fn validate(self) -> Result<Self, GatewayError> {
        if self.project_id.trim().is_empty() {
            return Err(GatewayError::ConfigError(format!(
                "missing project id (set {})",
                PROJECT_ID_VAR
            )));
        }
        if self.public_key.trim().is_empty() {
            return Err(GatewayError::ConfigError(format!(
                "missing public key (set {})",
                PUBLIC_KEY_VAR
            )));
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(GatewayError::InvalidUrl(self.base_url));
        }
        Ok(self)
    }

    /// The public key with all but its last four characters hidden.
    pub fn masked_key(&self) -> String {
        let chars: Vec<char> = self.public_key.chars().collect();
        if chars.len() <= 4 {
            return "*".repeat(chars.len());
        }
        let visible: String = chars[chars.len() - 4..].iter().collect();
        format!("{}{}", "*".repeat(chars.len() - 4), visible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_env_overrides_fields() {
        let config = GatewayConfig::default().with_env_from(lookup(&[
            (PROJECT_ID_VAR, "proj-1"),
            (PUBLIC_KEY_VAR, "pk-abcdef"),
            (GATEWAY_URL_VAR, "https://records.test"),
        ]));
        assert_eq!(config.project_id, "proj-1");
        assert_eq!(config.public_key, "pk-abcdef");
        assert_eq!(config.base_url, "https://records.test");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_env_values_are_ignored() {
        let config = GatewayConfig::new("file-proj", "file-key")
            .with_env_from(lookup(&[(PROJECT_ID_VAR, "  ")]));
        assert_eq!(config.project_id, "file-proj");
    }

    #[test]
    fn test_validate_missing_credentials() {
        let err = GatewayConfig::default().validate().unwrap_err();
        assert!(matches!(err, GatewayError::ConfigError(_)));

        let err = GatewayConfig::new("proj", "").validate().unwrap_err();
        assert!(err.to_string().contains(PUBLIC_KEY_VAR));
    }

    #[test]
    fn test_validate_rejects_bad_url() {
        let err = GatewayConfig::new("proj", "key")
            .with_base_url("records.test")
            .validate()
            .unwrap_err();
        assert!(matches!(err, GatewayError::InvalidUrl(_)));
    }

    #[test]
    fn test_masked_key() {
        assert_eq!(GatewayConfig::new("p", "abcdefgh").masked_key(), "****efgh");
        assert_eq!(GatewayConfig::new("p", "abc").masked_key(), "***");
    }

    #[test]
    fn test_deserialize_defaults() {
        let config: GatewayConfig = serde_json::from_str(r#"{"project_id": "p"}"#).unwrap();
        assert_eq!(config.timeout_secs, 15);
        assert_eq!(config.base_url, "http://localhost:8787");
    }
}
