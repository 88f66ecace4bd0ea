//! Route table commands. These never touch the gateway.

use anyhow::{anyhow, Context as _, Result};
use storefront_router::{Page, RouteRegistry};

use super::{RouteArgs, RouteCommand};
use crate::context::Context;

/// Run the route command.
pub async fn run(args: RouteArgs, ctx: &Context) -> Result<()> {
    let registry = RouteRegistry::storefront();
    let output = &ctx.output;

    match args.command {
        RouteCommand::List => {
            let metas: Vec<_> = registry.routes().iter().map(|entry| entry.meta()).collect();
            if output.is_json() {
                output.json(&metas);
                return Ok(());
            }
            output.header(&format!(
                "Routes (layout: {})",
                registry.layout().unwrap_or("none")
            ));
            let widths = [48, 16];
            output.table_header(&["PATH", "COMPONENT"], &widths);
            for meta in &metas {
                output.table_row(&[&meta.path, meta.component_name], &widths);
            }
        }
        RouteCommand::Resolve { path } => {
            let resolved = registry.resolve(&path);
            if output.is_json() {
                output.json(&resolved);
                return Ok(());
            }
            output.header(&path);
            output.kv("page", resolved.component_name());
            output.kv("pattern", &resolved.pattern);
            for (name, value) in resolved.params.iter() {
                output.kv(name, value);
            }
        }
        RouteCommand::Href { page, params } => {
            let page: Page = page.parse()?;
            let pairs = parse_params(&params)?;
            let href = registry
                .href(page, &pairs)
                .ok_or_else(|| anyhow!("No route registered for {}", page))?
                .with_context(|| format!("Cannot build a link to {}", page))?;
            if output.is_json() {
                output.json(&serde_json::json!({ "page": page, "href": href }));
            } else {
                println!("{href}");
            }
        }
    }

    Ok(())
}

/// Split `name=value` arguments.
pub fn parse_params(params: &[String]) -> Result<Vec<(&str, &str)>> {
    params
        .iter()
        .map(|param| {
            param
                .split_once('=')
                .ok_or_else(|| anyhow!("Expected name=value, got '{}'", param))
        })
        .collect()
}
