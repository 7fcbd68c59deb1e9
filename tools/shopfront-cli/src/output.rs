//! Output formatting for the CLI.

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use shopfront_commerce::catalog::Product;

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    fn status(&self, symbol: console::StyledObject<&str>, msg: &str) {
        if !self.json {
            println!("{symbol} {msg}");
        }
    }

    pub fn info(&self, msg: &str) {
        self.status(style("ℹ").blue(), msg);
    }

    pub fn success(&self, msg: &str) {
        self.status(style("✓").green(), msg);
    }

    /// Warnings go to stderr so piped table output stays clean.
    pub fn warn(&self, msg: &str) {
        if !self.json {
            eprintln!("{} {}", style("⚠").yellow(), msg);
        }
    }

    /// Errors are printed in JSON mode too, as `{"error": ...}`.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        } else {
            eprintln!("{} {}", style("✗").red(), style(msg).red());
        }
    }

    /// Verbose-only detail.
    pub fn debug(&self, msg: &str) {
        if self.verbose && !self.json {
            eprintln!("{} {}", style("→").dim(), style(msg).dim());
        }
    }

    pub fn header(&self, msg: &str) {
        if !self.json {
            println!("\n{}", style(msg).bold().underlined());
        }
    }

    pub fn json<T: serde::Serialize + ?Sized>(&self, value: &T) {
        match serde_json::to_string_pretty(value) {
            Ok(json) => println!("{json}"),
            Err(e) => self.error(&format!("Failed to encode output: {e}")),
        }
    }

    pub fn kv(&self, key: &str, value: &str) {
        if !self.json {
            println!("  {}: {}", style(key).dim(), value);
        }
    }

    pub fn list_item(&self, item: &str) {
        if !self.json {
            println!("  {} {}", style("•").dim(), item);
        }
    }

    /// Left-aligned columns padded to `widths`.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        let row = cols
            .iter()
            .zip(widths)
            .map(|(col, &width)| format!("{col:width$}"))
            .collect::<Vec<_>>()
            .join("  ");
        println!("  {}", row.trim_end());
    }

    /// One table of products, or the products as JSON.
    pub fn products(&self, products: &[&Product]) {
        if self.json {
            self.json(products);
            return;
        }
        if products.is_empty() {
            self.info("No products match");
            return;
        }

        let widths = [4, 30, 12, 10, 6, 0];
        self.table_row(&["ID", "NAME", "CATEGORY", "PRICE", "STOCK", ""], &widths);
        for product in products {
            let price = product.price.display();
            let stock = product.stock.to_string();
            let marker = if product.featured { "★" } else { "" };
            self.table_row(
                &[
                    product.id.as_str(),
                    &product.name,
                    &product.category,
                    &price,
                    &stock,
                    marker,
                ],
                &widths,
            );
        }
    }

    /// Spinner for a network call; hidden in JSON mode.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.json {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(spinner_style);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }
}

/// Stock level, colored by how much is left.
pub fn stock_badge(stock: u32) -> String {
    match stock {
        0 => style("out of stock").red().to_string(),
        1..=5 => style(format!("{stock} left")).yellow().to_string(),
        _ => style(format!("{stock} in stock")).green().to_string(),
    }
}
