//! rigshop - catalog query engine for a gaming-hardware shop
//!
//! Filters, sorts and pages catalog items, prices carts with promo codes and
//! shipping tiers, and tracks order and repair progress.

pub mod cart;
pub mod catalog;
pub mod commands;
pub mod config;
pub mod configurator;
pub mod error;
pub mod filters;
pub mod format;
pub mod query;

pub use cart::{compute_totals, Cart, Promo, ShippingTable, Totals};
pub use catalog::status::{is_terminal, stage_index};
pub use catalog::{CartLine, Item, OrderStatus, RepairStatus};
pub use config::Config;
pub use error::CatalogError;
pub use query::{filter_and_sort, Criteria, SortKey};
