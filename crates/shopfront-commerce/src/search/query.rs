//! Catalog browse query: text, category and price filters plus a sort.

use crate::catalog::{Catalog, Product};
use crate::money::{Currency, Money};
use crate::search::Filter;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Upper bound of the default price range.
pub const DEFAULT_MAX_PRICE: Money = Money {
    minor_units: 150_000,
    currency: Currency::USD,
};

/// Sort options for browse results. All sorts are stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortOption {
    /// Featured products first, otherwise catalog order.
    #[default]
    Featured,
    /// Sort by price, low to high.
    PriceLowToHigh,
    /// Sort by price, high to low.
    PriceHighToLow,
    /// Sort by name A-Z.
    Name,
    /// Catalog order.
    Catalog,
}

impl SortOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::Featured => "featured",
            SortOption::PriceLowToHigh => "price-low",
            SortOption::PriceHighToLow => "price-high",
            SortOption::Name => "name",
            SortOption::Catalog => "catalog",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "featured" => Some(SortOption::Featured),
            "price-low" => Some(SortOption::PriceLowToHigh),
            "price-high" => Some(SortOption::PriceHighToLow),
            "name" => Some(SortOption::Name),
            "catalog" => Some(SortOption::Catalog),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortOption::Featured => "Featured",
            SortOption::PriceLowToHigh => "Price: Low to High",
            SortOption::PriceHighToLow => "Price: High to Low",
            SortOption::Name => "Name",
            SortOption::Catalog => "Catalog Order",
        }
    }

    /// Stable sort of products in place.
    pub fn apply(&self, products: &mut [&Product]) {
        match self {
            SortOption::Featured => products.sort_by_key(|p| !p.featured),
            SortOption::PriceLowToHigh => products.sort_by_key(|p| p.price.minor_units),
            SortOption::PriceHighToLow => {
                products.sort_by(|a, b| b.price.minor_units.cmp(&a.price.minor_units))
            }
            SortOption::Name => products.sort_by(|a, b| a.name.cmp(&b.name)),
            SortOption::Catalog => {}
        }
    }
}

/// A browse query over the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrowseQuery {
    /// Text matched against name and description.
    pub query: Option<String>,
    /// Exact category.
    pub category: Option<String>,
    /// Inclusive lower price bound.
    pub min_price: Money,
    /// Inclusive upper price bound.
    pub max_price: Money,
    /// Result order.
    pub sort: SortOption,
}

impl Default for BrowseQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl BrowseQuery {
    /// Everything from 0 to 1500 USD, featured first.
    pub fn new() -> Self {
        Self {
            query: None,
            category: None,
            min_price: Money::zero(Currency::USD),
            max_price: DEFAULT_MAX_PRICE,
            sort: SortOption::Featured,
        }
    }

    /// Set the text query. Blank text clears it.
    pub fn with_query(mut self, q: impl Into<String>) -> Self {
        let q = q.into();
        let trimmed = q.trim();
        self.query = (!trimmed.is_empty()).then(|| trimmed.to_string());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_price_range(mut self, min: Money, max: Money) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    pub fn with_sort(mut self, sort: SortOption) -> Self {
        self.sort = sort;
        self
    }

    /// The filters this query applies.
    pub fn filters(&self) -> Vec<Filter> {
        let mut filters = Vec::with_capacity(3);
        if let Some(q) = &self.query {
            filters.push(Filter::Text(q.clone()));
        }
        if let Some(category) = &self.category {
            filters.push(Filter::Category(category.clone()));
        }
        filters.push(Filter::price_range(self.min_price, self.max_price));
        filters
    }

    /// Run against a catalog, returning matches in sort order.
    pub fn run<'c, C: Catalog + ?Sized>(&self, catalog: &'c C) -> Vec<&'c Product> {
        let filters = self.filters();
        let mut matches: Vec<&Product> = catalog
            .products()
            .iter()
            .filter(|p| filters.iter().all(|f| f.matches(p)))
            .collect();
        self.sort.apply(&mut matches);
        matches
    }

    /// Parse `q`, `category`, `min_price`, `max_price` and `sort` from a URL
    /// query string. Unknown keys and unparseable values are ignored.
    pub fn from_query_string(qs: &str) -> Self {
        let mut query = Self::new();
        let qs = qs.strip_prefix('?').unwrap_or(qs);

        for pair in qs.split('&').filter(|p| !p.is_empty()) {
            let (key, raw) = pair.split_once('=').unwrap_or((pair, ""));
            let value = match urlencoding::decode(&raw.replace('+', " ")) {
                Ok(v) => v.into_owned(),
                Err(e) => {
                    debug!(key, error = %e, "Skipping undecodable query parameter");
                    continue;
                }
            };

            match key {
                "q" => query = query.with_query(value),
                "category" if !value.is_empty() => query.category = Some(value),
                "min_price" => match parse_price(&value) {
                    Some(min) => query.min_price = min,
                    None => debug!(value = %value, "Ignoring invalid min_price"),
                },
                "max_price" => match parse_price(&value) {
                    Some(max) => query.max_price = max,
                    None => debug!(value = %value, "Ignoring invalid max_price"),
                },
                "sort" => match SortOption::from_str(&value) {
                    Some(sort) => query.sort = sort,
                    None => debug!(value = %value, "Ignoring unknown sort"),
                },
                _ => {}
            }
        }
        query
    }
}

fn parse_price(value: &str) -> Option<Money> {
    let amount: f64 = value.trim().parse().ok()?;
    if amount < 0.0 {
        return None;
    }
    Money::from_decimal(amount, Currency::USD)
}
