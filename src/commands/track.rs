//! Order and repair progress lookup.

use crate::catalog::status::{advance, Stage};
use crate::catalog::{OrderStatus, RepairStatus};
use crate::config::OutputFormat;
use crate::format::Formatter;
use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;
use std::str::FromStr;

/// Which workflow a status belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TrackKind {
    Order,
    Repair,
}

/// Prints the progress of a status, optionally checking a move to another.
pub fn track(kind: TrackKind, status: &str, to: Option<&str>, format: OutputFormat) -> Result<String> {
    match kind {
        TrackKind::Order => render::<OrderStatus>(status, to, format),
        TrackKind::Repair => render::<RepairStatus>(status, to, format),
    }
}

fn render<S>(status: &str, to: Option<&str>, format: OutputFormat) -> Result<String>
where
    S: Stage + Serialize + FromStr,
    S::Err: std::error::Error + Send + Sync + 'static,
{
    let mut current: S = status.parse().context("Invalid status")?;

    if let Some(to) = to {
        let next: S = to.parse().context("Invalid target status")?;
        current = advance(current, next)?;
    }

    Ok(Formatter::new(format).format_stage(current))
}
