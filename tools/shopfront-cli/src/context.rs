//! CLI execution context.

use std::fs;

use anyhow::{Context as _, Result};
use shopfront_commerce::catalog::InMemoryCatalog;

use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// Catalog the commands run against.
    pub catalog: InMemoryCatalog,
    /// Output handler.
    pub output: Output,
}

impl Context {
    /// Load the catalog from `catalog_path`, or use the built-in one.
    pub fn load(catalog_path: Option<&str>, output: Output) -> Result<Self> {
        let catalog = match catalog_path {
            Some(path) => {
                let json = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read catalog {path}"))?;
                let catalog = InMemoryCatalog::from_json(&json)
                    .with_context(|| format!("Invalid catalog {path}"))?;
                output.debug(&format!("Loaded {} products from {}", catalog.len(), path));
                catalog
            }
            None => InMemoryCatalog::storefront(),
        };

        Ok(Self { catalog, output })
    }
}
