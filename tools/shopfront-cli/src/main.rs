//! Shopfront CLI - inspect the catalog, price carts and check function config.
//!
//! Commands:
//! - `shopfront products` - List products
//! - `shopfront categories` - List categories
//! - `shopfront show` - Show one product
//! - `shopfront browse` - Run a shop listing query
//! - `shopfront search` - Quick search, locally or through the search function
//! - `shopfront quote` - Price a cart
//! - `shopfront config` - Check function configuration

mod commands;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{BrowseArgs, ConfigArgs, ProductsArgs, QuoteArgs, SearchArgs, ShowArgs};

/// Shopfront CLI - storefront catalog and checkout tooling
#[derive(Parser)]
#[command(name = "shopfront")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Catalog JSON file (default: the built-in storefront catalog)
    #[arg(long, global = true)]
    catalog: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products
    Products(ProductsArgs),

    /// List product categories
    Categories,

    /// Show a single product
    Show(ShowArgs),

    /// Filter and sort the catalog like the shop page
    Browse(BrowseArgs),

    /// Search products by name and description
    Search(SearchArgs),

    /// Build a cart and print its total
    Quote(QuoteArgs),

    /// Check function configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    shopfront_functions::init_tracing(if cli.verbose { "debug" } else { "warn" });

    let output = output::Output::new(cli.verbose, cli.json);
    let ctx = context::Context::load(cli.catalog.as_deref(), output)?;

    let result = match cli.command {
        Commands::Products(args) => commands::catalog::products(args, &ctx),
        Commands::Categories => commands::catalog::categories(&ctx),
        Commands::Show(args) => commands::catalog::show(args, &ctx),
        Commands::Browse(args) => commands::browse::run(args, &ctx),
        Commands::Search(args) => commands::search::run(args, &ctx).await,
        Commands::Quote(args) => commands::quote::run(args, &ctx),
        Commands::Config(args) => commands::config::run(args, &ctx),
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
