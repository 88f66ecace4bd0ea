//! CLI command implementations.

pub mod categories;
pub mod collections;
pub mod config;
pub mod products;
pub mod reviews;
pub mod route;

use clap::{Args, Subcommand};

/// Arguments for the products command.
#[derive(Args)]
pub struct ProductsArgs {
    #[command(subcommand)]
    pub command: ProductsCommand,
}

#[derive(Subcommand)]
pub enum ProductsCommand {
    /// List all products by name.
    List,
    /// Show one product.
    Get {
        /// Product id.
        id: i64,
    },
    /// Products in a category, highest rated first.
    Category {
        /// Category name.
        name: String,
    },
    /// Products in a subcategory, highest rated first.
    Subcategory {
        /// Subcategory name.
        name: String,
    },
    /// Free-text search over name, brand, description and tags.
    Search {
        /// Search text.
        query: String,
    },
    /// Highest rated products.
    Featured {
        /// Number of products (default from config).
        #[arg(short, long)]
        limit: Option<u32>,
    },
    /// Products from the same category as another product.
    Related {
        /// Product id.
        id: i64,

        /// Number of products (default from config).
        #[arg(short, long)]
        limit: Option<u32>,
    },
    /// Filtered listing, as on a category page.
    Filter(FilterArgs),
}

/// Listing filter flags.
#[derive(Args, Default)]
pub struct FilterArgs {
    /// Category name.
    #[arg(long)]
    pub category: Option<String>,

    /// Subcategory name.
    #[arg(long)]
    pub subcategory: Option<String>,

    /// Brand (repeatable, any of).
    #[arg(long)]
    pub brand: Vec<String>,

    /// Minimum price.
    #[arg(long)]
    pub price_min: Option<f64>,

    /// Maximum price.
    #[arg(long)]
    pub price_max: Option<f64>,

    /// Only products in stock.
    #[arg(long)]
    pub in_stock: bool,

    /// Tag (repeatable).
    #[arg(long)]
    pub tag: Vec<String>,

    /// Sort order: price-low, price-high, rating or newest.
    #[arg(long)]
    pub sort: Option<String>,
}

/// Arguments for the categories command.
#[derive(Args)]
pub struct CategoriesArgs {
    #[command(subcommand)]
    pub command: CategoriesCommand,
}

#[derive(Subcommand)]
pub enum CategoriesCommand {
    /// List all categories by name.
    List,
    /// Show one category.
    Get {
        /// Category id.
        id: i64,
    },
    /// Show the category with a slug.
    Slug {
        /// Category slug.
        slug: String,
    },
    /// List a category's subcategories.
    Subcategories {
        /// Category slug.
        slug: String,
    },
    /// Create a category.
    Create(CategoryFields),
    /// Replace a category's fields.
    Update {
        /// Category id.
        id: i64,

        #[command(flatten)]
        fields: CategoryFields,
    },
    /// Delete a category.
    Delete {
        /// Category id.
        id: i64,

        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Writable category fields.
#[derive(Args)]
pub struct CategoryFields {
    /// Display name.
    #[arg(long)]
    pub name: String,

    /// URL slug (derived from the name when omitted).
    #[arg(long)]
    pub slug: Option<String>,

    /// Description.
    #[arg(long)]
    pub description: Option<String>,

    /// Image URL.
    #[arg(long)]
    pub image: Option<String>,

    /// Subcategory name (repeatable).
    #[arg(long = "subcategory")]
    pub subcategories: Vec<String>,
}

/// Arguments for the collections command.
#[derive(Args)]
pub struct CollectionsArgs {
    #[command(subcommand)]
    pub command: CollectionsCommand,
}

#[derive(Subcommand)]
pub enum CollectionsCommand {
    /// List all collections by name.
    List,
    /// Show one collection.
    Get {
        /// Collection id.
        id: i64,
    },
    /// Show the collection with a slug.
    Slug {
        /// Collection slug.
        slug: String,
    },
    /// List featured collections.
    Featured,
    /// Create a collection.
    Create(CollectionFields),
    /// Replace a collection's fields.
    Update {
        /// Collection id.
        id: i64,

        #[command(flatten)]
        fields: CollectionFields,
    },
    /// Delete a collection.
    Delete {
        /// Collection id.
        id: i64,

        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Writable collection fields.
#[derive(Args)]
pub struct CollectionFields {
    /// Display name.
    #[arg(long)]
    pub name: String,

    /// URL slug (derived from the name when omitted).
    #[arg(long)]
    pub slug: Option<String>,

    /// Description.
    #[arg(long)]
    pub description: Option<String>,

    /// Image URL.
    #[arg(long)]
    pub image: Option<String>,

    /// Mark as featured.
    #[arg(long)]
    pub featured: Option<bool>,

    /// Product id (repeatable).
    #[arg(long = "product")]
    pub products: Vec<i64>,
}

/// Arguments for the reviews command.
#[derive(Args)]
pub struct ReviewsArgs {
    #[command(subcommand)]
    pub command: ReviewsCommand,
}

#[derive(Subcommand)]
pub enum ReviewsCommand {
    /// List all reviews, newest first.
    List,
    /// Show one review.
    Get {
        /// Review id.
        id: i64,
    },
    /// Reviews of a product, newest first.
    Product {
        /// Product id.
        id: i64,
    },
    /// Review count, average and star histogram for a product.
    Summary {
        /// Product id.
        id: i64,
    },
    /// Submit a review dated today.
    Create {
        /// Product id.
        #[arg(long)]
        product: i64,

        /// Stars, 1 to 5.
        #[arg(long, value_parser = clap::value_parser!(i64).range(1..=5))]
        rating: i64,

        /// Headline.
        #[arg(long)]
        title: String,

        /// Review text.
        #[arg(long)]
        content: String,

        /// Reviewer display name.
        #[arg(long)]
        name: String,
    },
    /// Add a helpful vote to a review.
    Helpful {
        /// Review id.
        id: i64,
    },
}

/// Arguments for the route command.
#[derive(Args)]
pub struct RouteArgs {
    #[command(subcommand)]
    pub command: RouteCommand,
}

#[derive(Subcommand)]
pub enum RouteCommand {
    /// Print the route table.
    List,
    /// Resolve a path to its page and parameters.
    Resolve {
        /// URL path, e.g. /product/42.
        path: String,
    },
    /// Build the path of a page.
    Href {
        /// Page name, e.g. product or reset-password.
        page: String,

        /// Parameters as name=value.
        params: Vec<String>,
    },
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration.
    Show,
    /// Print the config file in use.
    Path,
    /// Write a default storefront.toml.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}
