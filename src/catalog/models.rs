//! Data models for catalog items and cart lines.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// What kind of thing an item is. Only products ship physically.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    #[default]
    Product,
    Service,
    GiftCard,
}

impl ItemKind {
    pub fn is_physical(&self) -> bool {
        matches!(self, ItemKind::Product)
    }
}

/// A sellable or configurable catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Opaque unique identifier
    pub id: String,
    /// Display name
    pub title: String,
    /// Long description or excerpt, searched but not displayed in lists
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Current unit price
    pub price: f64,
    /// Price before discount; presence implies the item is on sale
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    /// Star rating (0.0 - 5.0)
    #[serde(default)]
    pub rating: f32,
    #[serde(default)]
    pub review_count: u32,
    /// Defaults to true when absent; ingestion derives it from `stock_count`
    /// whenever the count is present.
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
    /// Units on hand; `None` means stock is not tracked for this item
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock_count: Option<u32>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Attribute name to display value, in display order
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub specifications: IndexMap<String, String>,
    #[serde(default)]
    pub kind: ItemKind,
}

fn default_in_stock() -> bool {
    true
}

impl Item {
    /// Creates an in-stock product with the required fields set.
    pub fn new(id: impl Into<String>, title: impl Into<String>, price: f64) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            price,
            original_price: None,
            category: String::new(),
            subcategory: None,
            brand: None,
            rating: 0.0,
            review_count: 0,
            in_stock: true,
            stock_count: None,
            featured: false,
            tags: Vec::new(),
            specifications: IndexMap::new(),
            kind: ItemKind::Product,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    pub fn with_rating(mut self, rating: f32, review_count: u32) -> Self {
        self.rating = rating;
        self.review_count = review_count;
        self
    }

    /// Sets the stock level and keeps `in_stock` consistent with it.
    pub fn with_stock(mut self, count: u32) -> Self {
        self.stock_count = Some(count);
        self.in_stock = count > 0;
        self
    }

    pub fn with_original_price(mut self, original: f64) -> Self {
        self.original_price = Some(original);
        self
    }

    pub fn featured(mut self) -> Self {
        self.featured = true;
        self
    }

    /// Returns true if the item carries an original price above its current one.
    pub fn is_discounted(&self) -> bool {
        self.original_price.is_some_and(|orig| orig > self.price)
    }

    /// Returns discount percentage if on sale.
    pub fn discount_percent(&self) -> Option<u8> {
        self.original_price.filter(|orig| *orig > self.price && *orig > 0.0).map(|orig| {
            let discount = ((orig - self.price) / orig * 100.0).round() as u8;
            discount.min(99)
        })
    }

    /// Amount saved per unit versus the original price.
    pub fn savings(&self) -> f64 {
        self.original_price.map(|orig| (orig - self.price).max(0.0)).unwrap_or(0.0)
    }

    pub fn is_physical(&self) -> bool {
        self.kind.is_physical()
    }

    /// Units that can be put in a cart, `None` when stock is untracked.
    pub fn available_quantity(&self) -> Option<u32> {
        if !self.in_stock {
            return Some(0);
        }
        self.stock_count
    }
}

/// An item in a shopping session with a chosen quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub item_id: String,
    pub title: String,
    /// Unit price at the time the line was created
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    pub quantity: u32,
    /// Upper bound for `quantity`; `None` when stock is untracked
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock_count: Option<u32>,
    #[serde(default)]
    pub kind: ItemKind,
}

/// Quantity cap for lines whose stock is not tracked.
pub const MAX_LINE_QUANTITY: u32 = 99;

impl CartLine {
    /// Creates a line for an item with the quantity clamped to what is available.
    ///
    /// Returns `None` when nothing can be added: a zero quantity or an item
    /// that is out of stock.
    pub fn from_item(item: &Item, quantity: u32) -> Option<Self> {
        let mut line = Self {
            item_id: item.id.clone(),
            title: item.title.clone(),
            price: item.price,
            original_price: item.original_price,
            quantity: 0,
            stock_count: item.available_quantity(),
            kind: item.kind,
        };
        line.set_quantity(quantity)?;
        Some(line)
    }

    /// Sets the quantity, clamping to the stock limit instead of failing.
    ///
    /// Returns the quantity actually stored. A request that would leave the
    /// line empty is refused with `None` and the line is left unchanged.
    pub fn set_quantity(&mut self, quantity: u32) -> Option<u32> {
        let clamped = quantity.min(self.max_quantity());
        if clamped == 0 {
            return None;
        }
        self.quantity = clamped;
        Some(clamped)
    }

    pub fn max_quantity(&self) -> u32 {
        self.stock_count.unwrap_or(MAX_LINE_QUANTITY).min(MAX_LINE_QUANTITY)
    }

    /// Quantity that can be billed: the stored one, capped by the stock limit.
    pub fn billable_quantity(&self) -> u32 {
        self.quantity.min(self.max_quantity())
    }

    /// Billable line amount in cents.
    pub fn line_total_cents(&self) -> i64 {
        to_cents(self.price) * i64::from(self.billable_quantity())
    }

    /// Billable line amount at original prices, in cents.
    pub fn original_line_total_cents(&self) -> i64 {
        to_cents(self.original_price.unwrap_or(self.price)) * i64::from(self.billable_quantity())
    }

    pub fn line_total(&self) -> f64 {
        from_cents(self.line_total_cents())
    }

    pub fn original_line_total(&self) -> f64 {
        from_cents(self.original_line_total_cents())
    }

    pub fn is_physical(&self) -> bool {
        self.kind.is_physical()
    }
}

/// Converts an amount to whole cents. Non-finite amounts count as 0.
pub fn to_cents(amount: f64) -> i64 {
    if amount.is_finite() {
        (amount * 100.0).round() as i64
    } else {
        0
    }
}

/// Converts whole cents back to an amount.
pub fn from_cents(cents: i64) -> f64 {
    cents as f64 / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_item() -> Item {
        Item::new("gpu-4070s", "RTX 4070 Super", 599.0)
            .with_category("Hardware")
            .with_brand("NVIDIA")
            .with_rating(4.7, 312)
            .with_original_price(649.0)
            .with_stock(3)
    }

    #[test]
    fn test_item_builders() {
        let item = make_item();
        assert_eq!(item.category, "Hardware");
        assert_eq!(item.brand.as_deref(), Some("NVIDIA"));
        assert_eq!(item.stock_count, Some(3));
        assert!(item.in_stock);
        assert!(!item.featured);
        assert!(item.featured().featured);
    }

    #[test]
    fn test_with_stock_zero_marks_out_of_stock() {
        let item = Item::new("1", "Pad", 10.0).with_stock(0);
        assert!(!item.in_stock);
        assert_eq!(item.available_quantity(), Some(0));
    }

    #[test]
    fn test_discount_helpers() {
        let item = make_item();
        assert!(item.is_discounted());
        assert_eq!(item.discount_percent(), Some(8));
        assert_eq!(item.savings(), 50.0);

        let plain = Item::new("1", "Cable", 9.99);
        assert!(!plain.is_discounted());
        assert!(plain.discount_percent().is_none());
        assert_eq!(plain.savings(), 0.0);
    }

    #[test]
    fn test_item_kind_physical() {
        assert!(ItemKind::Product.is_physical());
        assert!(!ItemKind::Service.is_physical());
        assert!(!ItemKind::GiftCard.is_physical());
    }

    #[test]
    fn test_item_deserialize_camel_case() {
        let json = r#"{
            "id": "7",
            "title": "DualSense Edge",
            "price": 239.99,
            "originalPrice": 259.99,
            "category": "Accessories",
            "subcategory": "Controllers",
            "rating": 4.6,
            "reviewCount": 88,
            "inStock": true,
            "stockCount": 5,
            "tags": ["ps5", "controller"],
            "specifications": {"Connectivity": "Bluetooth", "Battery": "1050 mAh"},
            "kind": "product"
        }"#;

        let item: Item = serde_json::from_str(json).unwrap();
        assert_eq!(item.original_price, Some(259.99));
        assert_eq!(item.review_count, 88);
        assert_eq!(item.stock_count, Some(5));
        let keys: Vec<&str> = item.specifications.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Connectivity", "Battery"]);
    }

    #[test]
    fn test_item_deserialize_defaults() {
        let json = r#"{"id": "g1", "title": "Gift Card", "price": 25, "category": "Gift Cards", "kind": "gift_card"}"#;
        let item: Item = serde_json::from_str(json).unwrap();
        assert_eq!(item.kind, ItemKind::GiftCard);
        assert!(item.tags.is_empty());
        assert!(item.stock_count.is_none());
        assert!(item.in_stock);
        assert_eq!(item.available_quantity(), None);

        let json = r#"{"id": "s1", "title": "Repair", "price": 49, "category": "Services", "inStock": false}"#;
        let item: Item = serde_json::from_str(json).unwrap();
        assert!(!item.in_stock);
    }

    #[test]
    fn test_cart_line_clamps_to_stock() {
        let line = CartLine::from_item(&make_item(), 10).unwrap();
        assert_eq!(line.quantity, 3);
        assert_eq!(line.max_quantity(), 3);
    }

    #[test]
    fn test_cart_line_set_quantity_clamps() {
        let mut line = CartLine::from_item(&make_item(), 1).unwrap();
        assert_eq!(line.set_quantity(7), Some(3));
        assert_eq!(line.quantity, 3);
        assert_eq!(line.set_quantity(2), Some(2));
    }

    #[test]
    fn test_cart_line_never_empty() {
        let mut line = CartLine::from_item(&make_item(), 2).unwrap();
        assert_eq!(line.set_quantity(0), None);
        assert_eq!(line.quantity, 2);

        assert!(CartLine::from_item(&make_item(), 0).is_none());
        let sold_out = Item::new("x", "Sold out", 10.0).with_stock(0);
        assert!(CartLine::from_item(&sold_out, 1).is_none());
    }

    #[test]
    fn test_billable_quantity_caps_deserialized_line() {
        let json = r#"{"itemId": "g", "title": "GPU", "price": 100, "quantity": 10, "stockCount": 2}"#;
        let line: CartLine = serde_json::from_str(json).unwrap();
        assert_eq!(line.billable_quantity(), 2);
        assert_eq!(line.line_total_cents(), 20_000);
        assert_eq!(line.line_total(), 200.0);
    }

    #[test]
    fn test_cents_conversion() {
        assert_eq!(to_cents(86.07), 8607);
        assert_eq!(to_cents(0.1 + 0.2), 30);
        assert_eq!(to_cents(f64::NAN), 0);
        assert_eq!(from_cents(10_000), 100.0);
    }

    #[test]
    fn test_cart_line_untracked_stock_uses_cap() {
        let item = Item::new("svc", "Controller repair", 49.0);
        let mut line = CartLine::from_item(&item, 500).unwrap();
        assert_eq!(line.quantity, MAX_LINE_QUANTITY);
        assert_eq!(line.set_quantity(4), Some(4));
    }

    #[test]
    fn test_cart_line_totals() {
        let line = CartLine::from_item(&make_item(), 2).unwrap();
        assert_eq!(line.line_total(), 1198.0);
        assert_eq!(line.original_line_total(), 1298.0);
    }
}
