//! CLI command implementations.

pub mod search;
pub mod totals;
pub mod track;

pub use search::SearchCommand;
pub use totals::TotalsCommand;
pub use track::{track, TrackKind};

use crate::catalog::{CatalogRepository, HttpCatalog, StaticCatalog};
use crate::config::Config;
use anyhow::{Context, Result};
use tracing::debug;

/// Opens the configured catalog: the seed file if set, else the API.
pub fn open_catalog(config: &Config) -> Result<Box<dyn CatalogRepository>> {
    if let Some(path) = &config.catalog_path {
        debug!("Using catalog file {}", path.display());
        let catalog = StaticCatalog::from_file(path)
            .with_context(|| format!("Failed to load catalog: {}", path.display()))?;
        return Ok(Box::new(catalog));
    }

    if let Some(url) = &config.api_url {
        debug!("Using catalog API {}", url);
        let catalog = HttpCatalog::new(config, url.as_str()).context("Failed to create HTTP client")?;
        return Ok(Box::new(catalog));
    }

    anyhow::bail!("No catalog configured. Use --catalog <file>, --api-url <url> or set RIGSHOP_CATALOG.")
}
