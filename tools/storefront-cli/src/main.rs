//! Storefront CLI - browse and edit the storefront catalog from a terminal.
//!
//! Commands:
//! - `storefront products` - Listings, search, featured and related products
//! - `storefront categories` - Categories and their subcategories
//! - `storefront collections` - Curated collections
//! - `storefront reviews` - Reviews, helpful votes and rating summaries
//! - `storefront route` - Inspect the page route table
//! - `storefront config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{
    CategoriesArgs, CollectionsArgs, ConfigArgs, ProductsArgs, ReviewsArgs, RouteArgs,
};

/// Storefront CLI - Browse and manage the storefront catalog
#[derive(Parser)]
#[command(name = "storefront")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Log filter, overridden by RUST_LOG
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse products
    Products(ProductsArgs),

    /// Browse and edit categories
    Categories(CategoriesArgs),

    /// Browse and edit collections
    Collections(CollectionsArgs),

    /// Browse and submit reviews
    Reviews(ReviewsArgs),

    /// Inspect the page route table
    Route(RouteArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.json);

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let ctx = context::Context::load(cli.config.as_deref(), output)?;

    // Execute command
    let result = match cli.command {
        Commands::Products(args) => commands::products::run(args, &ctx).await,
        Commands::Categories(args) => commands::categories::run(args, &ctx).await,
        Commands::Collections(args) => commands::collections::run(args, &ctx).await,
        Commands::Reviews(args) => commands::reviews::run(args, &ctx).await,
        Commands::Route(args) => commands::route::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_filter_flags() {
        let cli = Cli::try_parse_from([
            "storefront",
            "--json",
            "products",
            "filter",
            "--category",
            "Skincare",
            "--brand",
            "Lumen",
            "--brand",
            "Aura",
            "--in-stock",
        ])
        .unwrap();
        assert!(cli.json);
        match cli.command {
            Commands::Products(ProductsArgs {
                command: commands::ProductsCommand::Filter(filter),
            }) => {
                assert_eq!(filter.category.as_deref(), Some("Skincare"));
                assert_eq!(filter.brand, vec!["Lumen", "Aura"]);
                assert!(filter.in_stock);
            }
            _ => panic!("expected products filter"),
        }
    }

    #[test]
    fn test_review_rating_range() {
        let parse = |rating: &str| {
            Cli::try_parse_from([
                "storefront", "reviews", "create", "--product", "1", "--rating", rating,
                "--title", "t", "--content", "c", "--name", "n",
            ])
        };
        assert!(parse("5").is_ok());
        assert!(parse("0").is_err());
        assert!(parse("6").is_err());
    }
}
