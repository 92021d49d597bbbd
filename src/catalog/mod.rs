//! Catalog items, data sources, ingestion and progress stages.

pub mod ingest;
pub mod models;
pub mod source;
pub mod status;

pub use models::{from_cents, to_cents, CartLine, Item, ItemKind, MAX_LINE_QUANTITY};
pub use source::{CatalogRepository, HttpCatalog, StaticCatalog};
pub use status::{OrderStatus, RepairStatus, Stage, StatusTone};
