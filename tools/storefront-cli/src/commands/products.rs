//! Product listing commands.

use anyhow::{bail, Context as _, Result};
use storefront_catalog::prelude::*;

use super::{FilterArgs, ProductsArgs, ProductsCommand};
use crate::context::Context;
use crate::output::{format_price, stars, Output};

/// Run the products command.
pub async fn run(args: ProductsArgs, ctx: &Context) -> Result<()> {
    let products = ctx.services()?.products();

    match args.command {
        ProductsCommand::List => {
            let found = fetch(ctx, "Fetching products...", products.try_get_all()).await?;
            print_products(&ctx.output, "Products", &found);
        }
        ProductsCommand::Get { id } => {
            let spinner = ctx.output.spinner("Fetching product...");
            let product = products.try_get_by_id(ProductId::new(id)).await;
            spinner.finish_and_clear();
            match product.context("Failed to fetch product")? {
                Some(product) => print_product(&ctx.output, &product),
                None => bail!("Product {} not found", id),
            }
        }
        ProductsCommand::Category { name } => {
            let found = fetch(ctx, "Fetching category...", products.try_get_by_category(&name)).await?;
            print_products(&ctx.output, &format!("Category: {name}"), &found);
        }
        ProductsCommand::Subcategory { name } => {
            let found = fetch(
                ctx,
                "Fetching subcategory...",
                products.try_get_by_subcategory(&name),
            )
            .await?;
            print_products(&ctx.output, &format!("Subcategory: {name}"), &found);
        }
        ProductsCommand::Search { query } => {
            let found = fetch(ctx, "Searching...", products.try_search(&query)).await?;
            print_products(&ctx.output, &format!("Results for \"{query}\""), &found);
        }
        ProductsCommand::Featured { limit } => {
            let limit = limit.unwrap_or(ctx.config.catalog.featured_limit);
            let found = fetch(ctx, "Fetching featured...", products.try_get_featured(limit)).await?;
            print_products(&ctx.output, "Featured", &found);
        }
        ProductsCommand::Related { id, limit } => {
            let limit = limit.unwrap_or(ctx.config.catalog.related_limit);
            let found = fetch(
                ctx,
                "Fetching related...",
                products.try_get_related(ProductId::new(id), limit),
            )
            .await?;
            print_products(&ctx.output, &format!("Related to {id}"), &found);
        }
        ProductsCommand::Filter(filter_args) => {
            let filter = to_filter(filter_args);
            let found = fetch(ctx, "Filtering...", products.try_filter_products(&filter)).await?;
            let sort = filter.sort_by.unwrap_or_default();
            print_products(
                &ctx.output,
                &format!("{} products, {}", found.len(), sort.display_name()),
                &found,
            );
        }
    }

    Ok(())
}

async fn fetch<F>(ctx: &Context, msg: &str, request: F) -> Result<Vec<Product>>
where
    F: std::future::Future<Output = Result<Vec<Product>, CatalogError>>,
{
    let spinner = ctx.output.spinner(msg);
    let result = request.await;
    spinner.finish_and_clear();
    result.context("Failed to fetch products")
}

/// Build a listing filter from command line flags.
pub fn to_filter(args: FilterArgs) -> ProductFilter {
    let mut filter = ProductFilter::new().price_range(args.price_min, args.price_max);
    if let Some(category) = args.category {
        filter = filter.category(category);
    }
    if let Some(subcategory) = args.subcategory {
        filter = filter.subcategory(subcategory);
    }
    for brand in args.brand {
        filter = filter.brand(brand);
    }
    if args.in_stock {
        filter = filter.in_stock();
    }
    for tag in args.tag {
        filter = filter.tag(tag);
    }
    if let Some(sort) = args.sort {
        filter = filter.sort_by(SortKey::from_param(&sort));
    }
    filter
}

fn print_products(output: &Output, title: &str, products: &[Product]) {
    if output.is_json() {
        output.json(&products);
        return;
    }

    output.header(title);
    if products.is_empty() {
        output.info("No products found");
        return;
    }

    let widths = [6, 28, 14, 14, 10, 6];
    output.table_header(&["ID", "NAME", "BRAND", "CATEGORY", "PRICE", "RATING"], &widths);
    for product in products {
        let id = product.id.to_string();
        let price = format_price(product.effective_price());
        let rating = format!("{:.1}", product.rating);
        output.table_row(
            &[&id, &product.name, &product.brand, &product.category, &price, &rating],
            &widths,
        );
    }
}

fn print_product(output: &Output, product: &Product) {
    if output.is_json() {
        output.json(product);
        return;
    }

    output.header(&product.name);
    output.kv("id", &product.id.to_string());
    output.kv("brand", &product.brand);
    output.kv("category", &product.category);
    if !product.subcategory.is_empty() {
        output.kv("subcategory", &product.subcategory);
    }
    match product.discount_percentage() {
        Some(discount) => output.kv(
            "price",
            &format!(
                "{} (was {}, {:.0}% off)",
                format_price(product.effective_price()),
                format_price(product.price),
                discount
            ),
        ),
        None => output.kv("price", &format_price(product.price)),
    }
    output.kv(
        "rating",
        &format!(
            "{} {:.1} ({} reviews)",
            stars(product.rating),
            product.rating,
            product.review_count
        ),
    );
    output.kv("in stock", if product.in_stock { "yes" } else { "no" });
    if !product.tags.is_empty() {
        output.kv("tags", &product.tags.join(", "));
    }
    if let Some(image) = product.primary_image() {
        output.kv("image", image);
    }
    if !product.description.is_empty() {
        output.kv("description", &product.description);
    }
}
