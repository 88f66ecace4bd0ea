//! CLI configuration.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use storefront_catalog::service::{FEATURED_LIMIT, RELATED_LIMIT};
use storefront_gateway::GatewayConfig;

/// File names searched for, in order, in each directory.
pub const CONFIG_NAMES: [&str; 2] = ["storefront.toml", ".storefront.toml"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Record gateway connection.
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Listing defaults.
    #[serde(default)]
    pub catalog: CatalogConfig,
}

impl CliConfig {
    /// Load config from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply `STOREFRONT_*` environment overrides through `lookup`.
    pub fn with_env_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        self.gateway = self.gateway.with_env_from(lookup);
        self
    }
}

/// Limits used by the listing commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Products shown by `products featured`.
    #[serde(default = "default_featured_limit")]
    pub featured_limit: u32,

    /// Products shown by `products related`.
    #[serde(default = "default_related_limit")]
    pub related_limit: u32,
}

fn default_featured_limit() -> u32 {
    FEATURED_LIMIT
}

fn default_related_limit() -> u32 {
    RELATED_LIMIT
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            featured_limit: default_featured_limit(),
            related_limit: default_related_limit(),
        }
    }
}

/// Generate a commented default storefront.toml.
pub fn generate_default_config() -> String {
    format!(
        r#"# Storefront CLI configuration
#
# STOREFRONT_PROJECT_ID, STOREFRONT_PUBLIC_KEY and STOREFRONT_GATEWAY_URL
# override the values below.

[gateway]
base_url = "{base_url}"
project_id = ""
public_key = ""
timeout_secs = {timeout}

[catalog]
featured_limit = {featured}
related_limit = {related}
"#,
        base_url = GatewayConfig::default().base_url,
        timeout = GatewayConfig::default().timeout_secs,
        featured = FEATURED_LIMIT,
        related = RELATED_LIMIT,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_gateway::PROJECT_ID_VAR;

    #[test]
    fn test_generated_config_parses_to_defaults() {
        let config = CliConfig::parse(&generate_default_config()).unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_partial_file() {
        let config = CliConfig::parse(
            r#"
            [gateway]
            project_id = "proj-9"
            "#,
        )
        .unwrap();
        assert_eq!(config.gateway.project_id, "proj-9");
        assert_eq!(config.gateway.timeout_secs, GatewayConfig::default().timeout_secs);
        assert_eq!(config.catalog.featured_limit, FEATURED_LIMIT);
    }

    #[test]
    fn test_env_overrides_file() {
        let config = CliConfig::parse(
            r#"
            [gateway]
            project_id = "from-file"
            public_key = "file-key"
            "#,
        )
        .unwrap()
        .with_env_from(|key| (key == PROJECT_ID_VAR).then(|| "from-env".to_string()));

        assert_eq!(config.gateway.project_id, "from-env");
        assert_eq!(config.gateway.public_key, "file-key");
    }

    #[test]
    fn test_rejects_bad_toml() {
        assert!(CliConfig::parse("[gateway\nproject_id = 1").is_err());
    }
}
