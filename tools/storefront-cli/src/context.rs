//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use storefront_catalog::service::ServiceContext;
use storefront_gateway::HttpGateway;

use crate::config::{CliConfig, CONFIG_NAMES};
use crate::output::{ConsoleNotifier, Output};

/// Execution context for CLI commands.
pub struct Context {
    /// Effective configuration, environment overrides applied.
    pub config: CliConfig,
    /// File the configuration came from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from an explicit config file or the nearest discovered one.
    pub fn load(config_path: Option<&Path>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config_path = match config_path {
            Some(path) => Some(path.to_path_buf()),
            None => find_config(&cwd),
        };
        let config = match &config_path {
            Some(path) => CliConfig::load(path)?,
            None => CliConfig::default(),
        };
        let config = config.with_env_from(|key| std::env::var(key).ok());

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Build catalog services over the configured gateway.
    pub fn services(&self) -> Result<ServiceContext> {
        let gateway_config = self
            .config
            .gateway
            .clone()
            .validate()
            .context("Gateway is not configured. Run `storefront config init` or set STOREFRONT_PROJECT_ID and STOREFRONT_PUBLIC_KEY")?;
        self.output
            .debug(&format!("Using gateway at {}", gateway_config.base_url));
        let gateway = HttpGateway::new(gateway_config).context("Failed to build gateway client")?;
        let notifier = ConsoleNotifier::new(self.output.is_json());
        Ok(ServiceContext::new(Arc::new(gateway)).with_notifier(Arc::new(notifier)))
    }
}

/// Find the nearest config file, walking up from `start`.
pub fn find_config(start: &Path) -> Option<PathBuf> {
    start.ancestors().find_map(|dir| {
        CONFIG_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    })
}
