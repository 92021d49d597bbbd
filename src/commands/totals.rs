//! Cart totals command: prices a cart file against the catalog.

use super::open_catalog;
use crate::cart::{price_cart, Cart};
use crate::catalog::CatalogRepository;
use crate::config::Config;
use crate::format::Formatter;
use crate::query::Criteria;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{info, warn};

/// One entry of a cart file: `{"id": "...", "quantity": n}`.
#[derive(Debug, Clone, Deserialize)]
pub struct CartEntry {
    pub id: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

/// Parses a cart file.
pub fn read_cart_file(path: impl AsRef<Path>) -> Result<Vec<CartEntry>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read cart file: {}", path.display()))?;

    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse cart file: {}", path.display()))
}

/// Computes totals for a cart with an optional promo code and shipping option.
pub struct TotalsCommand {
    config: Config,
}

impl TotalsCommand {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub async fn execute(
        &self,
        cart_path: &Path,
        promo: Option<&str>,
        shipping: Option<&str>,
    ) -> Result<String> {
        let entries = read_cart_file(cart_path)?;
        let repo = open_catalog(&self.config)?;
        self.execute_with_repo(repo.as_ref(), &entries, promo, shipping).await
    }

    /// Executes with a provided repository (for testing).
    pub async fn execute_with_repo(
        &self,
        repo: &dyn CatalogRepository,
        entries: &[CartEntry],
        promo: Option<&str>,
        shipping: Option<&str>,
    ) -> Result<String> {
        let items = repo
            .list(&Criteria::default())
            .await
            .with_context(|| format!("Catalog unavailable ({} source), please retry", repo.name()))?;

        let mut cart = Cart::new();
        for entry in entries {
            let Some(item) = items.iter().find(|item| item.id == entry.id) else {
                warn!("Skipping unknown item '{}'", entry.id);
                continue;
            };

            let added = cart.add(item, entry.quantity);
            if added == 0 {
                warn!("Skipping '{}': out of stock", entry.id);
            } else if added < entry.quantity {
                warn!("Only {} of '{}' available, quantity reduced", added, entry.id);
            }
        }

        let priced = price_cart(
            cart.lines(),
            promo,
            shipping,
            &self.config.promo_book(),
            &self.config.shipping_table(),
        );
        info!("Cart total: {:.2} ({} issues)", priced.totals.total, priced.issues.len());

        let formatter = Formatter::new(self.config.format).with_currency(&self.config.currency);
        Ok(formatter.format_totals(&priced.totals))
    }
}
