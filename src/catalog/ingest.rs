//! Validation of item collections as they arrive from a catalog source.
//!
//! Items that cannot be parsed or break an invariant are dropped and logged;
//! the rest of the collection is kept in its original order.

use crate::catalog::models::Item;
use crate::error::CatalogError;
use serde_json::Value;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Parses a JSON array of items, dropping elements that fail validation.
///
/// Fails only when the payload as a whole is not a JSON array.
pub fn parse_items(body: &str) -> Result<Vec<Item>, CatalogError> {
    let values: Vec<Value> = serde_json::from_str(body)?;
    let mut items = Vec::with_capacity(values.len());

    for (index, value) in values.into_iter().enumerate() {
        let id = value
            .get("id")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| format!("#{}", index));

        match serde_json::from_value::<Item>(value) {
            Ok(item) => items.push(item),
            Err(e) => {
                let err = CatalogError::data_shape(id, e.to_string());
                warn!("{}", err);
            }
        }
    }

    Ok(ingest(items))
}

/// Validates already-typed items: normalizes stock flags and drops violators.
pub fn ingest(items: Vec<Item>) -> Vec<Item> {
    let total = items.len();
    let mut seen = HashSet::new();
    let mut kept = Vec::with_capacity(total);

    for mut item in items {
        if let Err(err) = validate_item(&item) {
            warn!("{}", err);
            continue;
        }

        if !seen.insert(item.id.clone()) {
            warn!("{}", CatalogError::data_shape(&item.id, "duplicate id"));
            continue;
        }

        normalize_stock(&mut item);
        kept.push(item);
    }

    if kept.len() < total {
        debug!("Ingested {} of {} items", kept.len(), total);
    }

    kept
}

/// Checks the item invariants.
pub fn validate_item(item: &Item) -> Result<(), CatalogError> {
    let reject = |reason: &str| Err(CatalogError::data_shape(&item.id, reason));

    if item.id.trim().is_empty() {
        return reject("missing id");
    }
    if item.title.trim().is_empty() {
        return reject("missing title");
    }
    if !item.price.is_finite() || item.price < 0.0 {
        return reject("price must be a non-negative number");
    }
    if let Some(orig) = item.original_price {
        if !orig.is_finite() || orig < item.price {
            return reject("original price is below the current price");
        }
    }
    if !item.rating.is_finite() || !(0.0..=5.0).contains(&item.rating) {
        return reject("rating outside 0-5");
    }

    Ok(())
}

/// Derives `in_stock` from `stock_count` when the count is tracked.
fn normalize_stock(item: &mut Item) {
    if let Some(count) = item.stock_count {
        let derived = count > 0;
        if item.in_stock != derived {
            debug!(
                "Item {} claims in_stock={} with stock_count={}, using {}",
                item.id, item.in_stock, count, derived
            );
            item.in_stock = derived;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_items_keeps_valid_in_order() {
        let body = r#"[
            {"id": "1", "title": "Keyboard", "price": 89.0, "category": "Accessories"},
            {"id": "2", "title": "Mouse", "price": 49.0, "category": "Accessories"}
        ]"#;
        let items = parse_items(body).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, "1");
        assert_eq!(items[1].id, "2");
    }

    #[test]
    fn test_parse_items_drops_missing_fields() {
        let body = r#"[
            {"id": "1", "title": "Keyboard", "price": 89.0, "category": "Accessories"},
            {"id": "2", "title": "No price", "category": "Accessories"},
            {"title": "No id", "price": 1.0, "category": "Accessories"}
        ]"#;
        let items = parse_items(body).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "1");
    }

    #[test]
    fn test_parse_items_rejects_non_array() {
        let err = parse_items(r#"{"items": []}"#).unwrap_err();
        assert!(err.is_retryable());
    }

    #[test]
    fn test_parse_items_empty_array() {
        assert!(parse_items("[]").unwrap().is_empty());
    }

    #[test]
    fn test_validate_negative_price() {
        let item = Item::new("1", "Broken", -5.0);
        let err = validate_item(&item).unwrap_err();
        assert!(err.to_string().contains("non-negative"));
    }

    #[test]
    fn test_validate_nan_price() {
        let item = Item::new("1", "Broken", f64::NAN);
        assert!(validate_item(&item).is_err());
    }

    #[test]
    fn test_validate_original_below_price() {
        let item = Item::new("1", "Odd", 100.0).with_original_price(80.0);
        assert!(validate_item(&item).is_err());

        let item = Item::new("1", "Same", 100.0).with_original_price(100.0);
        assert!(validate_item(&item).is_ok());
    }

    #[test]
    fn test_validate_rating_range() {
        assert!(validate_item(&Item::new("1", "A", 1.0).with_rating(5.0, 1)).is_ok());
        assert!(validate_item(&Item::new("1", "A", 1.0).with_rating(5.5, 1)).is_err());
        assert!(validate_item(&Item::new("1", "A", 1.0).with_rating(-0.1, 1)).is_err());
    }

    #[test]
    fn test_validate_blank_title() {
        assert!(validate_item(&Item::new("1", "  ", 1.0)).is_err());
        assert!(validate_item(&Item::new("", "A", 1.0)).is_err());
    }

    #[test]
    fn test_ingest_drops_duplicates() {
        let items = vec![
            Item::new("1", "First", 10.0),
            Item::new("1", "Second", 20.0),
            Item::new("2", "Third", 30.0),
        ];
        let kept = ingest(items);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].title, "First");
        assert_eq!(kept[1].id, "2");
    }

    #[test]
    fn test_ingest_derives_in_stock() {
        let mut claims_stock = Item::new("1", "Ghost", 10.0);
        claims_stock.in_stock = true;
        claims_stock.stock_count = Some(0);

        let mut claims_none = Item::new("2", "Hidden", 10.0);
        claims_none.in_stock = false;
        claims_none.stock_count = Some(4);

        let mut untracked = Item::new("3", "Service", 10.0);
        untracked.in_stock = true;
        untracked.stock_count = None;

        let kept = ingest(vec![claims_stock, claims_none, untracked]);
        assert!(!kept[0].in_stock);
        assert!(kept[1].in_stock);
        assert!(kept[2].in_stock);
    }
}
