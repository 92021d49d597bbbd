//! rigshop - catalog search, cart totals and order tracking CLI

use anyhow::Result;
use clap::{Parser, Subcommand};
use rigshop::commands::{track, SearchCommand, TotalsCommand, TrackKind};
use rigshop::config::{Config, OutputFormat};
use rigshop::query::{Criteria, SortKey};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "rigshop",
    version,
    about = "Catalog search, cart totals and order tracking for a gaming-hardware shop"
)]
struct Cli {
    /// JSON catalog seed file
    #[arg(long, global = true, env = "RIGSHOP_CATALOG")]
    catalog: Option<PathBuf>,

    /// Catalog API base URL
    #[arg(long, global = true, env = "RIGSHOP_API_URL")]
    api_url: Option<String>,

    /// Proxy URL (e.g., socks5://host:port)
    #[arg(long, global = true, env = "RIGSHOP_PROXY")]
    proxy: Option<String>,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true)]
    format: Option<OutputFormat>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the catalog
    #[command(alias = "s")]
    Search {
        /// Free text matched against title, description and tags
        text: Option<String>,

        /// Exact category ("all" for any)
        #[arg(long)]
        category: Option<String>,

        /// Exact subcategory
        #[arg(long)]
        subcategory: Option<String>,

        /// Accepted brands (repeatable or comma-separated)
        #[arg(long, value_delimiter = ',')]
        brand: Vec<String>,

        /// Minimum price filter
        #[arg(long)]
        min_price: Option<f64>,

        /// Maximum price filter
        #[arg(long)]
        max_price: Option<f64>,

        /// Minimum rating filter (0.0-5.0)
        #[arg(long)]
        min_rating: Option<f32>,

        /// Only show items in stock (`--in-stock false` overrides the config)
        #[arg(long, num_args = 0..=1, default_missing_value = "true")]
        in_stock: Option<bool>,

        /// Only show featured items
        #[arg(long)]
        featured: bool,

        /// Sort order (see `rigshop sorts`)
        #[arg(long)]
        sort: Option<String>,

        /// Page number
        #[arg(long, default_value = "1")]
        page: usize,

        /// Results per page
        #[arg(long)]
        per_page: Option<usize>,
    },

    /// Show a single item
    Show {
        /// Item id
        id: String,
    },

    /// Price a cart file: [{"id": "...", "quantity": n}, ...]
    #[command(alias = "t")]
    Totals {
        /// Cart JSON file
        cart: PathBuf,

        /// Promo code
        #[arg(long)]
        promo: Option<String>,

        /// Shipping option id
        #[arg(long)]
        shipping: Option<String>,
    },

    /// Show progress of an order or repair status
    Track {
        kind: TrackKind,

        /// Current status, e.g. in_progress
        status: String,

        /// Check a move to this status
        #[arg(long)]
        to: Option<String>,
    },

    /// List sort keys
    Sorts,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    // Apply CLI overrides
    if let Some(format) = cli.format {
        config.format = format;
    }
    if let Some(path) = cli.catalog {
        config.catalog_path = Some(path);
    }
    if let Some(url) = cli.api_url {
        config.api_url = Some(url);
    }
    if let Some(proxy) = cli.proxy {
        config.proxy = Some(proxy);
    }

    match cli.command {
        Commands::Search {
            text,
            category,
            subcategory,
            brand,
            min_price,
            max_price,
            min_rating,
            in_stock,
            featured,
            sort,
            page,
            per_page,
        } => {
            if let Some(per_page) = per_page {
                config.per_page = per_page;
            }

            let base = config.base_criteria();
            let mut criteria = Criteria {
                search_text: text.unwrap_or_default(),
                category,
                subcategory,
                brands: brand.into_iter().collect(),
                in_stock_only: in_stock.unwrap_or(base.in_stock_only),
                featured_only: featured,
                min_rating: min_rating.unwrap_or(base.min_rating),
                ..base
            }
            .with_price_range(min_price, max_price);

            if let Some(raw) = sort {
                let (with_sort, issue) = criteria.with_sort_key(&raw);
                if let Some(issue) = issue {
                    eprintln!("{}; showing unsorted results", issue);
                }
                criteria = with_sort;
            }

            let cmd = SearchCommand::new(config);
            let output = cmd.execute(criteria, page).await?;
            println!("{}", output);
        }

        Commands::Show { id } => {
            let cmd = SearchCommand::new(config);
            println!("{}", cmd.show(&id).await?);
        }

        Commands::Totals { cart, promo, shipping } => {
            let cmd = TotalsCommand::new(config);
            let output = cmd.execute(&cart, promo.as_deref(), shipping.as_deref()).await?;
            println!("{}", output);
        }

        Commands::Track { kind, status, to } => {
            println!("{}", track(kind, &status, to.as_deref(), config.format)?);
        }

        Commands::Sorts => {
            println!("{:<12} {}", "Key", "Description");
            println!("{:-<12} {:-<20}", "", "");

            for key in SortKey::all() {
                println!("{:<12} {}", key.to_string(), key.display_name());
            }
        }
    }

    Ok(())
}
