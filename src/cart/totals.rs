//! Cart totals: subtotal, savings, promo discount, shipping and grand total.

use super::promo::{Promo, PromoBook};
use super::shipping::{ShippingOption, ShippingTable};
use crate::catalog::{from_cents, CartLine};
use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Price breakdown for a set of cart lines.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    /// Sum of price * quantity
    pub subtotal: f64,
    /// Sum of (original price or price) * quantity
    pub original_subtotal: f64,
    /// original_subtotal - subtotal
    pub savings: f64,
    pub promo_discount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promo_code: Option<String>,
    pub shipping_cost: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_option: Option<String>,
    /// subtotal - promo_discount + shipping_cost, never negative
    pub total: f64,
    /// Number of units across all lines
    pub item_count: u32,
}

impl Totals {
    pub fn has_savings(&self) -> bool {
        self.savings > 0.0 || self.promo_discount > 0.0
    }
}

/// Computes the totals for `lines`.
///
/// Amounts are summed in whole cents. Each line is billed at most up to its
/// stock limit. `option` defaults to the table's standard tier. Shipping is
/// free when no line is a physical product.
pub fn compute_totals(
    lines: &[CartLine],
    promo: Option<&Promo>,
    shipping: &ShippingTable,
    option: Option<&ShippingOption>,
) -> Totals {
    for line in lines.iter().filter(|l| l.quantity > l.max_quantity()) {
        warn!(
            "Line '{}' asks for {} units, only {} available",
            line.item_id,
            line.quantity,
            line.max_quantity()
        );
    }

    let subtotal: i64 = lines.iter().map(CartLine::line_total_cents).sum();
    let original_subtotal: i64 = lines.iter().map(CartLine::original_line_total_cents).sum();
    let item_count = lines.iter().map(CartLine::billable_quantity).sum();

    let promo_discount = promo.map(|p| p.discount_cents_for(subtotal)).unwrap_or(0);

    let option = option.or_else(|| shipping.default_option());
    let needs_shipping = lines.iter().any(|l| l.is_physical() && l.billable_quantity() > 0);
    let shipping_cost = match option {
        Some(option) if needs_shipping => shipping.cost_cents_for(option, subtotal),
        _ => 0,
    };

    let total = (subtotal - promo_discount + shipping_cost).max(0);

    Totals {
        subtotal: from_cents(subtotal),
        original_subtotal: from_cents(original_subtotal),
        savings: from_cents((original_subtotal - subtotal).max(0)),
        promo_discount: from_cents(promo_discount),
        promo_code: promo.map(|p| p.code.clone()),
        shipping_cost: from_cents(shipping_cost),
        shipping_option: option.filter(|_| needs_shipping).map(|o| o.id.clone()),
        total: from_cents(total),
        item_count,
    }
}

/// Totals plus any promo or shipping input that had to be ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct PricedCart {
    pub totals: Totals,
    pub issues: Vec<CatalogError>,
}

/// Resolves a promo code and shipping option id, then computes totals.
///
/// Unknown or empty codes and unknown options are reported as issues and
/// priced as if they had not been supplied.
pub fn price_cart(
    lines: &[CartLine],
    promo_code: Option<&str>,
    shipping_id: Option<&str>,
    promos: &PromoBook,
    shipping: &ShippingTable,
) -> PricedCart {
    let mut issues = Vec::new();

    let promo = promo_code.and_then(|code| match promos.resolve(code) {
        Ok(promo) => Some(promo),
        Err(err) => {
            warn!("{}", err);
            issues.push(err);
            None
        }
    });

    let option = shipping_id.and_then(|id| match shipping.find(id) {
        Ok(option) => Some(option),
        Err(err) => {
            warn!("{}", err);
            issues.push(err);
            None
        }
    });

    PricedCart { totals: compute_totals(lines, promo, shipping, option), issues }
}
