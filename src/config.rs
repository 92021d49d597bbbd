//! Configuration management with TOML, environment variables, and CLI overrides.

use crate::cart::{Promo, PromoBook, ShippingOption, ShippingTable};
use crate::query::{Criteria, SortKey};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Application configuration with layered loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// JSON seed file with catalog items
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,

    /// Base URL of a catalog API; used when no seed file is set
    #[serde(default)]
    pub api_url: Option<String>,

    /// Proxy URL (e.g., socks5://host:port)
    #[serde(default)]
    pub proxy: Option<String>,

    /// Request timeout for the catalog API in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Output format
    #[serde(default)]
    pub format: OutputFormat,

    /// Currency code shown next to amounts
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Results per page
    #[serde(default = "default_per_page")]
    pub per_page: usize,

    /// Subtotal at or above which standard shipping is free
    #[serde(default = "default_free_shipping_threshold")]
    pub free_shipping_threshold: f64,

    /// Shipping options offered at checkout
    #[serde(default = "default_shipping")]
    pub shipping: Vec<ShippingOption>,

    /// Accepted promo codes
    #[serde(default)]
    pub promos: Vec<Promo>,

    /// Default filter: minimum rating
    #[serde(default)]
    pub min_rating: Option<f32>,

    /// Default filter: hide out-of-stock items
    #[serde(default)]
    pub in_stock_only: bool,

    /// Default sort order
    #[serde(default)]
    pub sort: Option<SortKey>,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_currency() -> String {
    "EUR".to_string()
}

fn default_per_page() -> usize {
    24
}

fn default_free_shipping_threshold() -> f64 {
    100.0
}

fn default_shipping() -> Vec<ShippingOption> {
    ShippingTable::default().options
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: None,
            api_url: None,
            proxy: None,
            timeout_secs: default_timeout_secs(),
            format: OutputFormat::Table,
            currency: default_currency(),
            per_page: default_per_page(),
            free_shipping_threshold: default_free_shipping_threshold(),
            shipping: default_shipping(),
            promos: Vec::new(),
            min_rating: None,
            in_stock_only: false,
            sort: None,
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        // 1. Explicit path takes precedence
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        // 2. Try current directory
        let local_config = Path::new("rigshop.toml");
        if local_config.exists() {
            debug!("Found rigshop.toml in current directory");
            return Self::from_file(local_config);
        }

        // 3. Try XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("rigshop").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides. Unparseable values are ignored.
    pub fn with_env(mut self) -> Self {
        if let Ok(path) = std::env::var("RIGSHOP_CATALOG") {
            self.catalog_path = Some(PathBuf::from(path));
        }

        if let Ok(url) = std::env::var("RIGSHOP_API_URL") {
            self.api_url = Some(url);
        }

        if let Ok(proxy) = std::env::var("RIGSHOP_PROXY") {
            self.proxy = Some(proxy);
        }

        if let Ok(format) = std::env::var("RIGSHOP_FORMAT") {
            if let Ok(f) = format.parse() {
                self.format = f;
            }
        }

        if let Ok(timeout) = std::env::var("RIGSHOP_TIMEOUT") {
            if let Ok(t) = timeout.parse() {
                self.timeout_secs = t;
            }
        }

        self
    }

    pub fn shipping_table(&self) -> ShippingTable {
        ShippingTable::new(self.shipping.clone(), self.free_shipping_threshold)
    }

    pub fn promo_book(&self) -> PromoBook {
        PromoBook::new(self.promos.clone())
    }

    /// Criteria seeded with the configured defaults; CLI values replace them.
    pub fn base_criteria(&self) -> Criteria {
        Criteria {
            min_rating: self.min_rating.unwrap_or(0.0),
            in_stock_only: self.in_stock_only,
            sort: self.sort,
            ..Criteria::default()
        }
    }
}

/// Output format for results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Markdown,
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Unknown format: {}. Use: table, json, markdown, csv", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}
