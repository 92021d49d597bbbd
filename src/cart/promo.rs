//! Promo codes.

use crate::catalog::{from_cents, to_cents};
use crate::error::CatalogError;
use serde::{Deserialize, Serialize};

/// How a promo reduces the subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromoKind {
    /// `discount` is a percentage of the subtotal (0.0 - 100.0).
    Percentage,
    /// `discount` is a fixed amount, never more than the subtotal.
    Fixed,
}

/// A redeemable promo code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Promo {
    pub code: String,
    #[serde(rename = "type")]
    pub kind: PromoKind,
    pub discount: f64,
}

impl Promo {
    pub fn percentage(code: impl Into<String>, pct: f64) -> Self {
        Self { code: code.into(), kind: PromoKind::Percentage, discount: pct }
    }

    pub fn fixed(code: impl Into<String>, amount: f64) -> Self {
        Self { code: code.into(), kind: PromoKind::Fixed, discount: amount }
    }

    /// Discount amount for a given subtotal, clamped to `[0, subtotal]`.
    pub fn discount_for(&self, subtotal: f64) -> f64 {
        from_cents(self.discount_cents_for(to_cents(subtotal)))
    }

    /// Discount in cents for a subtotal in cents, clamped to `[0, subtotal]`.
    ///
    /// A non-finite discount value grants nothing.
    pub fn discount_cents_for(&self, subtotal_cents: i64) -> i64 {
        let subtotal_cents = subtotal_cents.max(0);
        if !self.is_valid() {
            return 0;
        }

        let amount = match self.kind {
            PromoKind::Percentage => {
                let pct = self.discount.clamp(0.0, 100.0);
                (subtotal_cents as f64 * pct / 100.0).round() as i64
            }
            PromoKind::Fixed => to_cents(self.discount).max(0),
        };
        amount.min(subtotal_cents)
    }

    /// Returns false when the discount is NaN or infinite.
    pub fn is_valid(&self) -> bool {
        self.discount.is_finite()
    }

    pub fn label(&self) -> String {
        match self.kind {
            PromoKind::Percentage => format!("{} ({}% off)", self.code, self.discount),
            PromoKind::Fixed => format!("{} ({:.2} off)", self.code, self.discount),
        }
    }
}

/// The set of codes a shop accepts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PromoBook {
    promos: Vec<Promo>,
}

impl PromoBook {
    pub fn new(promos: Vec<Promo>) -> Self {
        Self { promos }
    }

    /// Looks up a code case-insensitively.
    ///
    /// Empty and unknown codes are `InvalidCriteria`; callers price the cart
    /// without a promo and show the message.
    pub fn resolve(&self, code: &str) -> Result<&Promo, CatalogError> {
        let code = code.trim();
        if code.is_empty() {
            return Err(CatalogError::invalid_criteria("promo code is empty"));
        }

        let promo = self
            .promos
            .iter()
            .find(|p| p.code.eq_ignore_ascii_case(code))
            .ok_or_else(|| CatalogError::invalid_criteria(format!("unknown promo code '{}'", code)))?;

        if !promo.is_valid() {
            return Err(CatalogError::invalid_criteria(format!(
                "promo code '{}' has an invalid discount",
                promo.code
            )));
        }
        Ok(promo)
    }

    pub fn len(&self) -> usize {
        self.promos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.promos.is_empty()
    }
}
