//! Search command implementation.

use super::open_catalog;
use crate::catalog::CatalogRepository;
use crate::config::Config;
use crate::format::Formatter;
use crate::query::{paginate, run_query, Criteria};
use anyhow::{Context, Result};
use tracing::info;

/// Runs a catalog query and prints one page of results.
pub struct SearchCommand {
    config: Config,
}

impl SearchCommand {
    /// Creates a new search command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Executes the search against the configured catalog.
    pub async fn execute(&self, criteria: Criteria, page: usize) -> Result<String> {
        let repo = open_catalog(&self.config)?;
        self.execute_with_repo(repo.as_ref(), criteria, page).await
    }

    /// Executes the search with a provided repository (for testing).
    pub async fn execute_with_repo(
        &self,
        repo: &dyn CatalogRepository,
        criteria: Criteria,
        page: usize,
    ) -> Result<String> {
        info!("Searching {} catalog for: {:?}", repo.name(), criteria.search_text);

        let items = repo
            .list(&criteria)
            .await
            .with_context(|| format!("Catalog unavailable ({} source), please retry", repo.name()))?;

        let outcome = run_query(&items, &criteria);
        info!("Found {} items matching criteria", outcome.items.len());

        let page = paginate(outcome.items, page, self.config.per_page);
        let formatter = Formatter::new(self.config.format).with_currency(&self.config.currency);
        Ok(formatter.format_page(&page))
    }

    /// Shows a single item by id.
    pub async fn show(&self, id: &str) -> Result<String> {
        let repo = open_catalog(&self.config)?;
        self.show_with_repo(repo.as_ref(), id).await
    }

    pub async fn show_with_repo(&self, repo: &dyn CatalogRepository, id: &str) -> Result<String> {
        let items = repo
            .list(&Criteria::default())
            .await
            .with_context(|| format!("Catalog unavailable ({} source), please retry", repo.name()))?;

        let item = items
            .iter()
            .find(|item| item.id == id)
            .with_context(|| format!("No item with id '{}'", id))?;

        let formatter = Formatter::new(self.config.format).with_currency(&self.config.currency);
        Ok(formatter.format_item(item))
    }
}
