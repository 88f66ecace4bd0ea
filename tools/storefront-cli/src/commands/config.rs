//! Configuration management commands.

use std::fs;

use anyhow::{bail, Context as _, Result};
use serde_json::json;

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CONFIG_NAMES};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Path => show_path(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    let gateway = &ctx.config.gateway;
    let catalog = &ctx.config.catalog;

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "gateway": {
                "base_url": gateway.base_url,
                "project_id": gateway.project_id,
                "public_key": gateway.masked_key(),
                "timeout_secs": gateway.timeout_secs,
            },
            "catalog": catalog,
        }));
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    ctx.output.info("[gateway]");
    ctx.output.kv("base_url", &gateway.base_url);
    ctx.output.kv("project_id", or_unset(&gateway.project_id));
    let masked = gateway.masked_key();
    ctx.output.kv("public_key", or_unset(&masked));
    ctx.output.kv("timeout_secs", &gateway.timeout_secs.to_string());

    ctx.output.info("[catalog]");
    ctx.output.kv("featured_limit", &catalog.featured_limit.to_string());
    ctx.output.kv("related_limit", &catalog.related_limit.to_string());

    if let Err(e) = gateway.clone().validate() {
        ctx.output.warn(&format!("Gateway not ready: {e}"));
    }

    Ok(())
}

fn show_path(ctx: &Context) -> Result<()> {
    match &ctx.config_path {
        Some(path) => {
            if ctx.output.is_json() {
                ctx.output.json(&json!({ "path": path }));
            } else {
                println!("{}", path.display());
            }
            Ok(())
        }
        None => bail!(
            "No config file found. Run `storefront config init` to create one."
        ),
    }
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())
        .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

fn or_unset(value: &str) -> &str {
    if value.is_empty() {
        "(unset)"
    } else {
        value
    }
}
