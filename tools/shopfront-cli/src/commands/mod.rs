//! CLI command implementations.

pub mod browse;
pub mod catalog;
pub mod config;
pub mod quote;
pub mod search;

use clap::{Args, Subcommand};

/// Arguments for the products command.
#[derive(Args)]
pub struct ProductsArgs {
    /// Only products in this category.
    #[arg(short, long)]
    pub category: Option<String>,

    /// Only featured products.
    #[arg(long)]
    pub featured: bool,
}

/// Arguments for the show command.
#[derive(Args)]
pub struct ShowArgs {
    /// Product ID.
    pub id: String,
}

/// Arguments for the browse command.
#[derive(Args)]
pub struct BrowseArgs {
    /// Text to match against name, description and category.
    #[arg(short, long)]
    pub q: Option<String>,

    /// Category filter.
    #[arg(short, long)]
    pub category: Option<String>,

    /// Minimum price in dollars.
    #[arg(long)]
    pub min_price: Option<f64>,

    /// Maximum price in dollars.
    #[arg(long)]
    pub max_price: Option<f64>,

    /// Sort order: featured, price-low, price-high, name, catalog.
    #[arg(short, long, default_value = "featured")]
    pub sort: String,
}

/// Arguments for the search command.
#[derive(Args)]
pub struct SearchArgs {
    /// Search text.
    pub query: String,

    /// Call the deployed search function instead of searching locally.
    #[arg(long)]
    pub remote: bool,

    /// Maximum number of local results.
    #[arg(short, long, default_value = "10")]
    pub limit: usize,
}

/// Arguments for the quote command.
#[derive(Args)]
pub struct QuoteArgs {
    /// Cart lines as `id[:qty[:color[:size]]]`, e.g. `1:2:Black` or `3:1::L`.
    #[arg(required = true)]
    pub lines: Vec<String>,

    /// Tax rate in basis points (1000 = 10%).
    #[arg(long, default_value_t = shopfront_commerce::cart::DEFAULT_TAX_RATE_BPS)]
    pub tax_bps: u32,

    /// Flat shipping charge in display units.
    #[arg(long, default_value_t = 0.0)]
    pub shipping: f64,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Validate a config file, or the environment when no file is given.
    Check {
        /// TOML config file with `[functions]` and optional `[client]`.
        file: Option<String>,
    },
}
