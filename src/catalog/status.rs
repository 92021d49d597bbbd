//! Order and repair progress stages.
//!
//! Both workflows are linear, forward-only sequences. `Cancelled` sits
//! outside the sequence and is reachable from any non-terminal stage.

use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A named point in a linear progress sequence.
pub trait Stage: Copy + Eq + fmt::Display + 'static {
    /// Stages in forward order, excluding the cancelled state.
    fn sequence() -> &'static [Self];

    /// The off-sequence cancelled state.
    fn cancelled() -> Self;
}

/// Position of a status in its sequence, `None` for the cancelled state.
pub fn stage_index<S: Stage>(status: S) -> Option<usize> {
    S::sequence().iter().position(|s| *s == status)
}

/// Returns true for the final stage and for the cancelled state.
pub fn is_terminal<S: Stage>(status: S) -> bool {
    status == S::cancelled() || stage_index(status) == Some(S::sequence().len() - 1)
}

/// Completion fraction `(index + 1) / total`; cancelled reports 0.
pub fn progress<S: Stage>(status: S) -> f64 {
    match stage_index(status) {
        Some(index) => (index + 1) as f64 / S::sequence().len() as f64,
        None => 0.0,
    }
}

/// Moves to `to` if it is the next stage or a cancellation of a live status.
pub fn advance<S: Stage>(from: S, to: S) -> Result<S, CatalogError> {
    let allowed = if is_terminal(from) {
        false
    } else if to == S::cancelled() {
        true
    } else {
        match (stage_index(from), stage_index(to)) {
            (Some(a), Some(b)) => b == a + 1,
            _ => false,
        }
    };

    if allowed {
        Ok(to)
    } else {
        Err(CatalogError::InvalidTransition { from: from.to_string(), to: to.to_string() })
    }
}

/// Visual tone for a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusTone {
    Neutral,
    Info,
    Progress,
    Success,
    Danger,
}

/// Repair request stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RepairStatus {
    #[default]
    Submitted,
    Diagnosed,
    Approved,
    Completed,
    Shipped,
    Cancelled,
}

impl RepairStatus {
    pub fn display_name(&self) -> &'static str {
        match self {
            RepairStatus::Submitted => "Submitted",
            RepairStatus::Diagnosed => "Diagnosed",
            RepairStatus::Approved => "Approved",
            RepairStatus::Completed => "Repair completed",
            RepairStatus::Shipped => "Shipped back",
            RepairStatus::Cancelled => "Cancelled",
        }
    }

    pub fn tone(&self) -> StatusTone {
        match self {
            RepairStatus::Submitted => StatusTone::Neutral,
            RepairStatus::Diagnosed | RepairStatus::Approved => StatusTone::Info,
            RepairStatus::Completed => StatusTone::Progress,
            RepairStatus::Shipped => StatusTone::Success,
            RepairStatus::Cancelled => StatusTone::Danger,
        }
    }
}

impl Stage for RepairStatus {
    fn sequence() -> &'static [Self] {
        &[
            RepairStatus::Submitted,
            RepairStatus::Diagnosed,
            RepairStatus::Approved,
            RepairStatus::Completed,
            RepairStatus::Shipped,
        ]
    }

    fn cancelled() -> Self {
        RepairStatus::Cancelled
    }
}

impl fmt::Display for RepairStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            RepairStatus::Submitted => "submitted",
            RepairStatus::Diagnosed => "diagnosed",
            RepairStatus::Approved => "approved",
            RepairStatus::Completed => "completed",
            RepairStatus::Shipped => "shipped",
            RepairStatus::Cancelled => "cancelled",
        };
        write!(f, "{}", code)
    }
}

impl FromStr for RepairStatus {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "submitted" => Ok(RepairStatus::Submitted),
            "diagnosed" => Ok(RepairStatus::Diagnosed),
            "approved" => Ok(RepairStatus::Approved),
            "completed" => Ok(RepairStatus::Completed),
            "shipped" => Ok(RepairStatus::Shipped),
            "cancelled" | "canceled" => Ok(RepairStatus::Cancelled),
            _ => Err(StatusParseError::new(
                s,
                "submitted, diagnosed, approved, completed, shipped, cancelled",
            )),
        }
    }
}

/// Customer order stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    InProgress,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn display_name(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Confirmed => "Confirmed",
            OrderStatus::InProgress => "In progress",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }

    pub fn tone(&self) -> StatusTone {
        match self {
            OrderStatus::Pending => StatusTone::Neutral,
            OrderStatus::Confirmed => StatusTone::Info,
            OrderStatus::InProgress | OrderStatus::Shipped => StatusTone::Progress,
            OrderStatus::Delivered => StatusTone::Success,
            OrderStatus::Cancelled => StatusTone::Danger,
        }
    }
}

impl Stage for OrderStatus {
    fn sequence() -> &'static [Self] {
        &[
            OrderStatus::Pending,
            OrderStatus::Confirmed,
            OrderStatus::InProgress,
            OrderStatus::Shipped,
            OrderStatus::Delivered,
        ]
    }

    fn cancelled() -> Self {
        OrderStatus::Cancelled
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::InProgress => "in_progress",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        };
        write!(f, "{}", code)
    }
}

impl FromStr for OrderStatus {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "pending" => Ok(OrderStatus::Pending),
            "confirmed" => Ok(OrderStatus::Confirmed),
            "in_progress" | "processing" => Ok(OrderStatus::InProgress),
            "shipped" => Ok(OrderStatus::Shipped),
            "delivered" => Ok(OrderStatus::Delivered),
            "cancelled" | "canceled" => Ok(OrderStatus::Cancelled),
            _ => Err(StatusParseError::new(
                s,
                "pending, confirmed, in_progress, shipped, delivered, cancelled",
            )),
        }
    }
}

fn normalize(s: &str) -> String {
    s.trim().to_lowercase().replace(['-', ' '], "_")
}

#[derive(Debug, Clone)]
pub struct StatusParseError {
    input: String,
    valid: &'static str,
}

impl StatusParseError {
    fn new(input: &str, valid: &'static str) -> Self {
        Self { input: input.to_string(), valid }
    }
}

impl fmt::Display for StatusParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown status '{}'. Valid statuses: {}", self.input, self.valid)
    }
}

impl std::error::Error for StatusParseError {}
