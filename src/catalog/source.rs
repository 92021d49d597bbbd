//! Catalog data sources: an in-memory seed set and a remote HTTP API.

use super::ingest::{ingest, parse_items};
use super::models::Item;
use crate::config::Config;
use crate::error::CatalogError;
use crate::query::Criteria;
use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, warn};
use wreq::Client;

/// Trait for catalog fetching - enables mocking for tests.
///
/// Implementations may narrow the result using the criteria, but callers
/// always run the query engine over what comes back.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Returns the validated items for a query.
    async fn list(&self, criteria: &Criteria) -> Result<Vec<Item>, CatalogError>;

    /// Short label used in log lines.
    fn name(&self) -> &str;
}

/// A fixed set of items held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    items: Vec<Item>,
}

impl StaticCatalog {
    /// Wraps already-built items, dropping any that fail validation.
    pub fn from_items(items: Vec<Item>) -> Self {
        Self { items: ingest(items) }
    }

    /// Parses a JSON seed file.
    pub fn from_json(body: &str) -> Result<Self, CatalogError> {
        Ok(Self { items: parse_items(body)? })
    }

    /// Loads a JSON seed file from disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        debug!("Loading catalog from: {}", path.display());

        let body = std::fs::read_to_string(path).map_err(|e| {
            CatalogError::upstream(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json(&body)
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Looks up an item by id.
    pub fn get(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }
}

#[async_trait]
impl CatalogRepository for StaticCatalog {
    async fn list(&self, _criteria: &Criteria) -> Result<Vec<Item>, CatalogError> {
        Ok(self.items.clone())
    }

    fn name(&self) -> &str {
        "static"
    }
}

/// Catalog served by a JSON API at `{base_url}/items`.
pub struct HttpCatalog {
    client: Client,
    base_url: String,
}

impl HttpCatalog {
    /// Creates a client for `base_url` using the timeout and proxy from config.
    pub fn new(config: &Config, base_url: impl Into<String>) -> Result<Self, CatalogError> {
        let timeout = Duration::from_secs(config.timeout_secs.max(1));
        let mut builder = Client::builder()
            .gzip(true)
            .brotli(true)
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(10)));

        if let Some(proxy_url) = &config.proxy {
            debug!("Configuring proxy: {}", proxy_url);
            let proxy = wreq::Proxy::all(proxy_url)
                .map_err(|e| CatalogError::upstream(format!("failed to configure proxy: {}", e)))?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| CatalogError::upstream(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client, base_url: base_url.into().trim_end_matches('/').to_string() })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds the request URL, passing the criteria the API can pre-filter on.
    fn items_url(&self, criteria: &Criteria) -> String {
        let mut params = Vec::new();

        let text = criteria.search_text.trim();
        if !text.is_empty() {
            params.push(format!("q={}", urlencoding::encode(text)));
        }
        if let Some(category) = criteria.active_category() {
            params.push(format!("category={}", urlencoding::encode(category)));
        }
        if let Some(subcategory) = criteria.active_subcategory() {
            params.push(format!("subcategory={}", urlencoding::encode(subcategory)));
        }
        for brand in &criteria.brands {
            params.push(format!("brand={}", urlencoding::encode(brand)));
        }

        if params.is_empty() {
            format!("{}/items", self.base_url)
        } else {
            format!("{}/items?{}", self.base_url, params.join("&"))
        }
    }
}

#[async_trait]
impl CatalogRepository for HttpCatalog {
    async fn list(&self, criteria: &Criteria) -> Result<Vec<Item>, CatalogError> {
        let url = self.items_url(criteria);
        info!("Fetching catalog: {}", url);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| CatalogError::upstream(format!("request failed: {}", e)))?;

        let status = response.status();
        debug!("Response status: {}", status);

        if !status.is_success() {
            warn!("Catalog API returned {}", status);
            return Err(CatalogError::upstream(format!("request failed with status: {}", status)));
        }

        let body = response
            .text()
            .await
            .map_err(|e| CatalogError::upstream(format!("failed to read response body: {}", e)))?;

        parse_items(&body)
    }

    fn name(&self) -> &str {
        "http"
    }
}
