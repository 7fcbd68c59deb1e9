//! Catalog listing commands.

use anyhow::Result;
use shopfront_commerce::catalog::{Catalog, Product};

use super::{ProductsArgs, ShowArgs};
use crate::context::Context;
use crate::output::stock_badge;

/// Run the products command.
pub fn products(args: ProductsArgs, ctx: &Context) -> Result<()> {
    let products = select(&ctx.catalog, args.category.as_deref(), args.featured);

    ctx.output.header(&format!("Products ({})", products.len()));
    ctx.output.products(&products);
    Ok(())
}

/// Run the categories command.
pub fn categories(ctx: &Context) -> Result<()> {
    let categories = ctx.catalog.categories();

    if ctx.output.is_json() {
        ctx.output.json(&categories);
        return Ok(());
    }

    ctx.output.header("Categories");
    for category in &categories {
        let count = ctx.catalog.by_category(category).len();
        ctx.output.list_item(&format!("{category} ({count})"));
    }
    Ok(())
}

/// Run the show command.
pub fn show(args: ShowArgs, ctx: &Context) -> Result<()> {
    let product = ctx.catalog.require(&args.id)?;

    if ctx.output.is_json() {
        ctx.output.json(product);
        return Ok(());
    }

    ctx.output.header(&product.name);
    ctx.output.kv("id", product.id.as_str());
    ctx.output.kv("price", &product.price.display());
    ctx.output.kv("category", &product.category);
    ctx.output.kv("rating", &format!("{:.1}", product.rating));
    ctx.output.kv("stock", &stock_badge(product.stock));
    if product.featured {
        ctx.output.kv("featured", "yes");
    }
    if !product.colors.is_empty() {
        ctx.output.kv("colors", &product.colors.join(", "));
    }
    if !product.sizes.is_empty() {
        ctx.output.kv("sizes", &product.sizes.join(", "));
    }
    if !product.description.is_empty() {
        ctx.output.info("");
        ctx.output.info(&product.description);
    }
    Ok(())
}

/// Products in catalog order, narrowed by category and featured flag.
fn select<'c, C: Catalog>(catalog: &'c C, category: Option<&str>, featured: bool) -> Vec<&'c Product> {
    let mut products = match category {
        Some(category) => catalog.by_category(category),
        None => catalog.products().iter().collect(),
    };
    if featured {
        products.retain(|p| p.featured);
    }
    products
}
