//! Function configuration checks.

use anyhow::{bail, Result};
use serde_json::json;
use shopfront_functions::{ClientConfig, FunctionConfig, ShopfrontConfig};

use super::{ConfigArgs, ConfigCommand};
use crate::context::Context;

/// Run the config command.
pub fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Check { file } => check(file.as_deref(), ctx),
    }
}

fn check(file: Option<&str>, ctx: &Context) -> Result<()> {
    let (source, config) = match file {
        Some(path) => (path.to_string(), ShopfrontConfig::from_file(path)?),
        None => (
            "environment".to_string(),
            ShopfrontConfig {
                functions: FunctionConfig::from_env()?,
                client: ClientConfig::from_env().ok(),
            },
        ),
    };

    let problems = config.problems();
    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "source": source,
            "valid": problems.is_empty(),
            "problems": problems,
        }));
    } else {
        ctx.output.header(&format!("Checking {source}"));
        ctx.output.kv("stripe_api_base", &config.functions.stripe_api_base);
        ctx.output.kv("match_threshold", &config.functions.match_threshold.to_string());
        ctx.output.kv("match_count", &config.functions.match_count.to_string());
        match &config.client {
            Some(client) => ctx.output.kv("functions_url", &client.functions_url),
            None => ctx.output.kv("client", "not configured"),
        }
        for problem in &problems {
            ctx.output.error(problem);
        }
    }

    if !problems.is_empty() {
        bail!("Configuration has {} problem(s)", problems.len());
    }
    ctx.output.success("Configuration is valid");
    Ok(())
}
