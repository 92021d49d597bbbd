//! Custom build accumulator for PCs and controllers.
//!
//! A build is a base item plus at most one chosen option per slot. Its
//! price is the base price plus every selected option.

use crate::catalog::{from_cents, to_cents, CartLine, Item};
use crate::error::CatalogError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// What is being configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildKind {
    Pc,
    Controller,
}

impl BuildKind {
    /// Slots offered for this kind, in display order.
    pub fn slots(&self) -> &'static [Slot] {
        match self {
            BuildKind::Pc => &[
                Slot::Cpu,
                Slot::Gpu,
                Slot::Motherboard,
                Slot::Memory,
                Slot::Storage,
                Slot::Psu,
                Slot::Case,
                Slot::Cooling,
            ],
            BuildKind::Controller => &[
                Slot::Shell,
                Slot::Thumbsticks,
                Slot::Buttons,
                Slot::Paddles,
                Slot::TriggerStops,
            ],
        }
    }
}

/// A configurable position in a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    Cpu,
    Gpu,
    Motherboard,
    Memory,
    Storage,
    Psu,
    Case,
    Cooling,
    Shell,
    Thumbsticks,
    Buttons,
    Paddles,
    TriggerStops,
}

impl Slot {
    pub fn kind(&self) -> BuildKind {
        match self {
            Slot::Shell | Slot::Thumbsticks | Slot::Buttons | Slot::Paddles | Slot::TriggerStops => {
                BuildKind::Controller
            }
            _ => BuildKind::Pc,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Slot::Cpu => "Processor",
            Slot::Gpu => "Graphics card",
            Slot::Motherboard => "Motherboard",
            Slot::Memory => "Memory",
            Slot::Storage => "Storage",
            Slot::Psu => "Power supply",
            Slot::Case => "Case",
            Slot::Cooling => "Cooling",
            Slot::Shell => "Shell",
            Slot::Thumbsticks => "Thumbsticks",
            Slot::Buttons => "Buttons",
            Slot::Paddles => "Back paddles",
            Slot::TriggerStops => "Trigger stops",
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Slot::Cpu => "cpu",
            Slot::Gpu => "gpu",
            Slot::Motherboard => "motherboard",
            Slot::Memory => "memory",
            Slot::Storage => "storage",
            Slot::Psu => "psu",
            Slot::Case => "case",
            Slot::Cooling => "cooling",
            Slot::Shell => "shell",
            Slot::Thumbsticks => "thumbsticks",
            Slot::Buttons => "buttons",
            Slot::Paddles => "paddles",
            Slot::TriggerStops => "trigger_stops",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Slot {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase().replace('-', "_");
        BuildKind::Pc
            .slots()
            .iter()
            .chain(BuildKind::Controller.slots())
            .find(|slot| slot.code() == s)
            .copied()
            .ok_or_else(|| CatalogError::invalid_criteria(format!("unknown slot '{}'", s)))
    }
}

/// One choice for a slot, e.g. "32 GB DDR5" for memory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigOption {
    pub id: String,
    pub label: String,
    /// Price added on top of the base item
    pub price: f64,
}

impl ConfigOption {
    pub fn new(id: impl Into<String>, label: impl Into<String>, price: f64) -> Self {
        Self { id: id.into(), label: label.into(), price }
    }
}

/// A base item with slot selections.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Build {
    base: Item,
    kind: BuildKind,
    selections: IndexMap<Slot, ConfigOption>,
}

impl Build {
    pub fn new(base: Item, kind: BuildKind) -> Self {
        Self { base, kind, selections: IndexMap::new() }
    }

    pub fn base(&self) -> &Item {
        &self.base
    }

    pub fn kind(&self) -> BuildKind {
        self.kind
    }

    /// Chooses an option for a slot, returning the option it replaces.
    pub fn select(
        &mut self,
        slot: Slot,
        option: ConfigOption,
    ) -> Result<Option<ConfigOption>, CatalogError> {
        if slot.kind() != self.kind {
            return Err(CatalogError::invalid_criteria(format!(
                "slot '{}' does not belong to a {:?} build",
                slot, self.kind
            )));
        }
        if !option.price.is_finite() || option.price < 0.0 {
            return Err(CatalogError::invalid_criteria(format!(
                "option '{}' has an invalid price",
                option.id
            )));
        }

        debug!("Build slot {} -> {}", slot, option.id);
        Ok(self.selections.insert(slot, option))
    }

    pub fn clear(&mut self, slot: Slot) -> Option<ConfigOption> {
        self.selections.shift_remove(&slot)
    }

    pub fn selection(&self, slot: Slot) -> Option<&ConfigOption> {
        self.selections.get(&slot)
    }

    /// Selections in the order they were made.
    pub fn selections(&self) -> impl Iterator<Item = (&Slot, &ConfigOption)> {
        self.selections.iter()
    }

    /// Slots of this build kind that have no selection yet.
    pub fn missing_slots(&self) -> Vec<Slot> {
        self.kind.slots().iter().filter(|s| !self.selections.contains_key(*s)).copied().collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_slots().is_empty()
    }

    /// Base price plus all selected options.
    pub fn total(&self) -> f64 {
        let options: i64 = self.selections.values().map(|o| to_cents(o.price)).sum();
        from_cents(to_cents(self.base.price) + options)
    }

    /// Hands the build to the cart as a single line with quantity 1.
    pub fn into_cart_line(self) -> CartLine {
        let price = self.total();
        let title = if self.selections.is_empty() {
            self.base.title.clone()
        } else {
            let labels: Vec<&str> = self.selections.values().map(|o| o.label.as_str()).collect();
            format!("{} ({})", self.base.title, labels.join(", "))
        };

        CartLine {
            item_id: self.base.id,
            title,
            price,
            original_price: None,
            quantity: 1,
            stock_count: None,
            kind: self.base.kind,
        }
    }
}
