//! Content-store collaborator: route registration and article lookup.
//!
//! The scaffolder treats persistence as an opaque service with exactly two
//! operations — look up published articles under a route path, and register
//! a batch of route paths (duplicates silently skipped). [`ContentStore`] is
//! the seam; [`MemoryStore`] is the in-process backend used by tests and the
//! default CLI wiring. A database-backed implementation only needs those two
//! methods.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store backend error: {0}")]
    Backend(String),
}

/// A published article under some route, with tags resolved to names.
///
/// `meta` is a free-form blob; the scaffolder reads `icon`, `shortcut` and
/// `features` out of it when projecting into manifest file entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    pub title: String,
    /// Route segment relative to the owning folder, e.g. `/install`.
    pub segment: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub publisher_id: Option<String>,
    #[serde(default)]
    pub meta: serde_json::Value,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// The two-operation persistence contract.
///
/// `Sync` because sibling folder lookups run in parallel.
pub trait ContentStore: Sync {
    /// All articles whose owning route matches `path` exactly.
    fn articles_by_route_path(&self, path: &str) -> Result<Vec<Article>, StoreError>;

    /// Register route paths in bulk. Already-known paths are skipped, not an
    /// error.
    fn insert_routes(&mut self, paths: &[String]) -> Result<(), StoreError>;
}

/// In-memory store backend.
#[derive(Debug, Default)]
pub struct MemoryStore {
    articles: HashMap<String, Vec<Article>>,
    routes: HashSet<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach an article to a route path (test/seeding convenience).
    pub fn add_article(&mut self, route_path: &str, article: Article) {
        self.articles
            .entry(route_path.to_string())
            .or_default()
            .push(article);
    }

    pub fn routes(&self) -> &HashSet<String> {
        &self.routes
    }
}

impl ContentStore for MemoryStore {
    fn articles_by_route_path(&self, path: &str) -> Result<Vec<Article>, StoreError> {
        Ok(self.articles.get(path).cloned().unwrap_or_default())
    }

    fn insert_routes(&mut self, paths: &[String]) -> Result<(), StoreError> {
        for path in paths {
            self.routes.insert(path.clone());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(id: &str, title: &str) -> Article {
        Article {
            id: id.to_string(),
            title: title.to_string(),
            segment: format!("/{}", title.to_lowercase()),
            date: Utc::now(),
            publisher_id: None,
            meta: serde_json::json!({}),
            tags: vec![],
        }
    }

    #[test]
    fn lookup_unknown_path_is_empty() {
        let store = MemoryStore::new();
        assert!(store.articles_by_route_path("docs/setup").unwrap().is_empty());
    }

    #[test]
    fn lookup_returns_attached_articles() {
        let mut store = MemoryStore::new();
        store.add_article("docs/setup", article("a1", "Install"));
        store.add_article("docs/setup", article("a2", "Upgrade"));

        let found = store.articles_by_route_path("docs/setup").unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].title, "Install");
    }

    #[test]
    fn insert_routes_skips_duplicates() {
        let mut store = MemoryStore::new();
        let batch1 = vec!["docs".to_string(), "docs/setup".to_string()];
        let batch2 = vec!["docs/setup".to_string(), "docs/faq".to_string()];
        store.insert_routes(&batch1).unwrap();
        store.insert_routes(&batch2).unwrap();

        assert_eq!(store.routes().len(), 3);
        assert!(store.routes().contains("docs/faq"));
    }
}
