//! Product search service.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::catalog::{Catalog, Product};
use crate::error::CommerceError;

/// Recommended idle delay before issuing a search for typed input.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Ranked product search.
///
/// Implementations return an empty list for a blank query without doing any
/// remote work, and report backend failures as
/// [`CommerceError::SearchUnavailable`].
#[async_trait]
pub trait SearchService: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<Product>, CommerceError>;
}

/// Search over a local catalog by case-insensitive substring.
///
/// Name matches rank ahead of description-only matches; within each group
/// catalog order is kept.
#[derive(Debug, Clone)]
pub struct CatalogSearch<C> {
    catalog: C,
    limit: usize,
}

impl<C: Catalog> CatalogSearch<C> {
    pub fn new(catalog: C) -> Self {
        Self { catalog, limit: 10 }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Synchronous ranking used by the async trait impl.
    pub fn rank(&self, query: &str) -> Vec<&Product> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        let (mut by_name, by_description): (Vec<&Product>, Vec<&Product>) = self
            .catalog
            .products()
            .iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&needle)
                    || p.description.to_lowercase().contains(&needle)
            })
            .partition(|p| p.name.to_lowercase().contains(&needle));

        by_name.extend(by_description);
        by_name.truncate(self.limit);
        by_name
    }
}

#[async_trait]
impl<C: Catalog + Send + Sync> SearchService for CatalogSearch<C> {
    async fn search(&self, query: &str) -> Result<Vec<Product>, CommerceError> {
        let results: Vec<Product> = self.rank(query).into_iter().cloned().collect();
        debug!(query, results = results.len(), "Catalog search");
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::InMemoryCatalog;

    #[tokio::test]
    async fn test_name_matches_rank_first() {
        let search = CatalogSearch::new(InMemoryCatalog::storefront());
        let results = search.search("sound").await.unwrap();
        // Only description matches: headphones, speaker, earbuds in catalog order.
        let ids: Vec<_> = results.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "5", "8"]);

        let results = search.search("smart").await.unwrap();
        let ids: Vec<_> = results.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "7"]);
    }

    #[tokio::test]
    async fn test_blank_query_returns_nothing() {
        let search = CatalogSearch::new(InMemoryCatalog::storefront());
        assert!(search.search("").await.unwrap().is_empty());
        assert!(search.search("   ").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_limit() {
        let search = CatalogSearch::new(InMemoryCatalog::storefront()).with_limit(1);
        assert_eq!(search.search("a").await.unwrap().len(), 1);
    }

    #[test]
    fn test_debounce_delay() {
        assert_eq!(SEARCH_DEBOUNCE.as_millis(), 300);
    }
}
