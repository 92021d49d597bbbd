//! Shopping cart, promo codes, shipping and totals.

mod promo;
mod shipping;
mod totals;

pub use promo::{Promo, PromoBook, PromoKind};
pub use shipping::{ShippingOption, ShippingTable};
pub use totals::{compute_totals, price_cart, PricedCart, Totals};
pub use crate::catalog::{from_cents, to_cents};

use crate::catalog::{CartLine, Item};
use tracing::debug;

/// An ordered set of cart lines, one per item id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `quantity` units of an item, merging with an existing line.
    ///
    /// The line is clamped to available stock. Returns the resulting line
    /// quantity; out-of-stock items are not added and yield 0.
    pub fn add(&mut self, item: &Item, quantity: u32) -> u32 {
        if quantity == 0 || item.available_quantity() == Some(0) {
            debug!("Not adding '{}' to cart (quantity {}, in stock: {})", item.id, quantity, item.in_stock);
            return 0;
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.item_id == item.id) {
            let wanted = line.quantity.saturating_add(quantity);
            return line.set_quantity(wanted).unwrap_or(line.quantity);
        }

        match CartLine::from_item(item, quantity) {
            Some(line) => {
                let stored = line.quantity;
                self.lines.push(line);
                stored
            }
            None => 0,
        }
    }

    /// Updates a line's quantity; 0 removes the line.
    ///
    /// Returns the stored quantity, or `None` if the item is not in the cart.
    pub fn set_quantity(&mut self, item_id: &str, quantity: u32) -> Option<u32> {
        if quantity == 0 {
            return self.remove(item_id).map(|_| 0);
        }
        let line = self.lines.iter_mut().find(|l| l.item_id == item_id)?;
        Some(line.set_quantity(quantity).unwrap_or(line.quantity))
    }

    pub fn remove(&mut self, item_id: &str) -> Option<CartLine> {
        let pos = self.lines.iter().position(|l| l.item_id == item_id)?;
        Some(self.lines.remove(pos))
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<CartLine> {
        self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total number of units.
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    pub fn totals(
        &self,
        promo: Option<&Promo>,
        shipping: &ShippingTable,
        option: Option<&ShippingOption>,
    ) -> Totals {
        compute_totals(&self.lines, promo, shipping, option)
    }
}

impl From<Vec<CartLine>> for Cart {
    fn from(lines: Vec<CartLine>) -> Self {
        Self { lines }
    }
}
