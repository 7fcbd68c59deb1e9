//! Product search, locally or through the deployed search function.

use anyhow::{Context as _, Result};
use shopfront_commerce::search::{CatalogSearch, SearchService};
use shopfront_data::FetchClient;
use shopfront_functions::{ClientConfig, FunctionsClient};

use super::SearchArgs;
use crate::context::Context;

/// Run the search command.
pub async fn run(args: SearchArgs, ctx: &Context) -> Result<()> {
    let service: Box<dyn SearchService> = if args.remote {
        let config = ClientConfig::from_env().context("Remote search needs client configuration")?;
        ctx.output.debug(&format!("Searching via {}", config.functions_url));
        Box::new(FunctionsClient::new(FetchClient::new(), config))
    } else {
        Box::new(CatalogSearch::new(ctx.catalog.clone()).with_limit(args.limit))
    };

    let spinner = ctx.output.spinner(&format!("Searching for '{}'", args.query));
    let results = service.search(&args.query).await;
    spinner.finish_and_clear();
    let results = results?;

    let products: Vec<_> = results.iter().collect();
    ctx.output.header(&format!("{} match(es) for '{}'", products.len(), args.query));
    ctx.output.products(&products);
    Ok(())
}
