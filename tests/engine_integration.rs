//! Integration tests for the query engine and cart pricing using a fixture catalog.

use rigshop::cart::{compute_totals, price_cart, Cart, Promo, PromoBook, ShippingTable};
use rigshop::catalog::status::{advance, is_terminal, progress, stage_index};
use rigshop::catalog::{CartLine, CatalogRepository, Item, OrderStatus, RepairStatus, StaticCatalog};
use rigshop::query::{filter_and_sort, paginate, run_query, Criteria, Facets, SortKey};
use std::collections::HashSet;

const CATALOG_FIXTURE: &str = include_str!("fixtures/catalog.json");

fn catalog() -> Vec<Item> {
    StaticCatalog::from_json(CATALOG_FIXTURE).unwrap().items().to_vec()
}

fn ids(items: &[Item]) -> Vec<&str> {
    items.iter().map(|i| i.id.as_str()).collect()
}

#[test]
fn test_fixture_ingestion_drops_bad_items() {
    let items = catalog();
    assert_eq!(items.len(), 8);
    assert!(!ids(&items).contains(&"1007"));
    assert!(!ids(&items).contains(&"1008"));

    // Stock flag derived from the count
    let rx = items.iter().find(|i| i.id == "1002").unwrap();
    assert!(!rx.in_stock);
    let rtx = items.iter().find(|i| i.id == "1001").unwrap();
    assert!(rtx.in_stock);
    let keys: Vec<&str> = rtx.specifications.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["Memory", "TDP", "Outputs"]);
}

#[tokio::test]
async fn test_static_repository_lists_everything() {
    let repo = StaticCatalog::from_json(CATALOG_FIXTURE).unwrap();
    let items = repo.list(&Criteria::default().with_category("Hardware")).await.unwrap();
    assert_eq!(items.len(), 8);
}

#[test]
fn test_category_filter() {
    let items = vec![
        Item::new("a", "Tower", 100.0).with_category("Hardware"),
        Item::new("b", "Mouse", 50.0).with_category("Accessories"),
    ];
    let result = filter_and_sort(&items, &Criteria::new().with_category("Hardware"));
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].price, 100.0);
}

#[test]
fn test_price_low_sort() {
    let items = vec![Item::new("a", "A", 30.0), Item::new("b", "B", 10.0), Item::new("c", "C", 20.0)];
    let result = filter_and_sort(&items, &Criteria::new().with_sort(SortKey::PriceLow));
    let prices: Vec<f64> = result.iter().map(|i| i.price).collect();
    assert_eq!(prices, vec![10.0, 20.0, 30.0]);
}

#[test]
fn test_text_search_case_insensitive() {
    let items = vec![Item::new("a", "RTX 4070 Super", 599.0), Item::new("b", "Keyboard", 89.0)];
    let result = filter_and_sort(&items, &Criteria::new().with_search("rtx"));
    assert_eq!(ids(&result), vec!["a"]);
}

#[test]
fn test_text_search_matches_description_and_tags() {
    let items = catalog();
    let by_description = filter_and_sort(&items, &Criteria::new().with_search("hot-swap"));
    assert_eq!(ids(&by_description), vec!["1004"]);

    let by_tag = filter_and_sort(&items, &Criteria::new().with_search("AM5"));
    assert_eq!(ids(&by_tag), vec!["1003"]);
}

#[test]
fn test_cart_totals_with_percentage_promo() {
    let item = Item::new("h", "Headset", 100.0).with_original_price(120.0).with_stock(5);
    let lines = vec![CartLine::from_item(&item, 2).unwrap()];
    let promo = Promo::percentage("GAMER10", 10.0);

    let totals = compute_totals(&lines, Some(&promo), &ShippingTable::default(), None);
    assert_eq!(totals.subtotal, 200.0);
    assert_eq!(totals.original_subtotal, 240.0);
    assert_eq!(totals.savings, 40.0);
    assert_eq!(totals.promo_discount, 20.0);
    assert_eq!(totals.total, 180.0 + totals.shipping_cost);
}

#[test]
fn test_idempotence() {
    let items = catalog();
    let criteria = Criteria::new()
        .with_category("Accessories")
        .with_min_rating(4.5)
        .with_sort(SortKey::Rating);

    let first = filter_and_sort(&items, &criteria);
    let second = filter_and_sort(&items, &criteria);
    assert_eq!(first, second);
}

#[test]
fn test_filter_monotonicity() {
    let items = catalog();
    let narrowing = [
        (Criteria::new(), Criteria::new().with_price_range(Some(50.0), None)),
        (
            Criteria::new().with_price_range(Some(50.0), None),
            Criteria::new().with_price_range(Some(50.0), Some(400.0)),
        ),
        (Criteria::new().with_category("Hardware"), Criteria::new().with_category("Hardware").in_stock_only()),
        (Criteria::new().with_search("gaming"), Criteria::new().with_search("gaming").with_min_rating(4.7)),
        (Criteria::new().with_brand("AMD").with_brand("NVIDIA"), Criteria::new().with_brand("AMD")),
    ];

    for (wide, narrow) in narrowing {
        let wide_ids: HashSet<String> =
            filter_and_sort(&items, &wide).into_iter().map(|i| i.id).collect();
        let narrow_ids: HashSet<String> =
            filter_and_sort(&items, &narrow).into_iter().map(|i| i.id).collect();
        assert!(narrow_ids.is_subset(&wide_ids), "{:?} not within {:?}", narrow_ids, wide_ids);
    }
}

#[test]
fn test_sort_correctness_on_fixture() {
    let items = catalog();

    let low = filter_and_sort(&items, &Criteria::new().with_sort(SortKey::PriceLow));
    assert!(low.windows(2).all(|w| w[0].price <= w[1].price));

    let high = filter_and_sort(&items, &Criteria::new().with_sort(SortKey::PriceHigh));
    assert!(high.windows(2).all(|w| w[0].price >= w[1].price));

    let popular = filter_and_sort(&items, &Criteria::new().with_sort(SortKey::Popular));
    assert!(popular.windows(2).all(|w| w[0].review_count >= w[1].review_count));
}

#[test]
fn test_stability_with_equal_keys() {
    let items = catalog();
    // 1005, 1006 and 1002 share a 4.6 rating
    let rated = filter_and_sort(&items, &Criteria::new().with_sort(SortKey::Rating));
    let tied: Vec<&str> =
        rated.iter().filter(|i| i.rating == 4.6).map(|i| i.id.as_str()).collect();
    assert_eq!(tied, vec!["1002", "1005", "1006"]);

    // Featured keeps input order inside both groups
    let featured = filter_and_sort(&items, &Criteria::new().with_sort(SortKey::Featured));
    assert_eq!(&ids(&featured)[..3], &["1001", "1003", "1002"]);
}

#[test]
fn test_newest_sort_uses_numeric_ids() {
    let items = catalog();
    let newest = filter_and_sort(&items, &Criteria::new().with_sort(SortKey::Newest));
    assert_eq!(&ids(&newest)[..3], &["3001", "2001", "1006"]);
}

#[test]
fn test_invalid_criteria_are_repaired() {
    let items = catalog();
    let criteria = Criteria::new().with_price_range(Some(500.0), Some(100.0)).with_min_rating(9.0);

    let outcome = run_query(&items, &criteria);
    assert_eq!(outcome.issues.len(), 2);
    // Range dropped, rating clamped to 5.0: nothing rates a perfect 5
    assert!(outcome.is_empty());

    let (criteria, issue) = Criteria::new().with_sort_key("cheapest");
    assert!(issue.is_some());
    assert_eq!(ids(&filter_and_sort(&items, &criteria)), ids(&items));
}

#[test]
fn test_totals_non_negative() {
    let item = Item::new("x", "Cable", 4.0).with_stock(3);
    let lines = vec![CartLine::from_item(&item, 1).unwrap()];
    let table = ShippingTable::default();

    for promo in [
        Promo::fixed("BIG", 1_000.0),
        Promo::percentage("ALL", 100.0),
        Promo::percentage("MORE", 250.0),
        Promo::fixed("NEG", -20.0),
    ] {
        let totals = compute_totals(&lines, Some(&promo), &table, None);
        assert!(totals.total >= 0.0, "{} produced {}", promo.code, totals.total);
        assert!(totals.promo_discount <= totals.subtotal);
    }
}

#[test]
fn test_stock_clamp() {
    let items = catalog();
    let controller = items.iter().find(|i| i.id == "1005").unwrap();

    let mut cart = Cart::new();
    assert_eq!(cart.add(controller, 10), 2);
    assert_eq!(cart.set_quantity("1005", 50), Some(2));
    assert_eq!(cart.lines()[0].quantity, 2);

    let sold_out = items.iter().find(|i| i.id == "1002").unwrap();
    assert_eq!(cart.add(sold_out, 1), 0);
    assert_eq!(cart.lines().len(), 1);
}

#[test]
fn test_checkout_flow() {
    let items = catalog();
    let mut cart = Cart::new();
    for (id, qty) in [("1004", 1), ("2001", 1), ("3001", 1)] {
        let item = items.iter().find(|i| i.id == id).unwrap();
        cart.add(item, qty);
    }

    let promos = PromoBook::new(vec![Promo::fixed("WELCOME5", 5.0)]);
    let priced = price_cart(cart.lines(), Some("welcome5"), Some("express"), &promos, &ShippingTable::default());

    assert!(priced.issues.is_empty());
    let totals = priced.totals;
    assert_eq!(totals.subtotal, 178.99);
    assert_eq!(totals.savings, 20.0);
    assert_eq!(totals.shipping_cost, 12.99);
    assert_eq!(totals.total, 186.98);
    assert_eq!(totals.item_count, 3);
}

#[test]
fn test_paging_and_facets() {
    let items = catalog();
    let result = filter_and_sort(&items, &Criteria::new().with_sort(SortKey::PriceLow));

    let facets = Facets::from_items(&result);
    assert_eq!(facets.categories.get("Accessories"), Some(&3));
    assert_eq!(facets.brands.get("AMD"), Some(&2));
    assert_eq!(facets.min_price, Some(19.99));
    assert_eq!(facets.max_price, Some(599.0));

    let page = paginate(result, 2, 3);
    assert_eq!(page.pagination.total_pages, 3);
    assert_eq!(ids(&page.items), vec!["1004", "1005", "1003"]);
}

#[test]
fn test_status_stages() {
    assert_eq!(stage_index(OrderStatus::Pending), Some(0));
    assert_eq!(stage_index(OrderStatus::Cancelled), None);
    assert!(is_terminal(OrderStatus::Delivered));
    assert!(is_terminal(RepairStatus::Cancelled));
    assert!(!is_terminal(RepairStatus::Approved));
    assert_eq!(progress(RepairStatus::Shipped), 1.0);

    assert_eq!(advance(RepairStatus::Submitted, RepairStatus::Diagnosed).unwrap(), RepairStatus::Diagnosed);
    assert!(advance(RepairStatus::Submitted, RepairStatus::Completed).is_err());
    assert!(advance(OrderStatus::Shipped, OrderStatus::Cancelled).is_ok());
    assert!(advance(OrderStatus::Delivered, OrderStatus::Cancelled).is_err());
}

#[test]
fn test_free_shipping_boundary_through_cart() {
    let items = vec![
        Item::new("c1", "Cable tie", 0.08).with_stock(10),
        Item::new("c2", "Wrist rest", 86.07).with_stock(10),
        Item::new("c3", "Mouse bungee", 13.85).with_stock(10),
    ];
    let mut cart = Cart::new();
    for item in &items {
        cart.add(item, 1);
    }

    let totals = cart.totals(None, &ShippingTable::default(), None);
    assert_eq!(totals.subtotal, 100.0);
    assert_eq!(totals.shipping_cost, 0.0);
    assert_eq!(totals.total, 100.0);
}

#[test]
fn test_handoff_lines_are_clamped_when_priced() {
    let json = r#"[
        {"itemId": "1005", "title": "Controller", "price": 100, "quantity": 10, "stockCount": 2},
        {"itemId": "svc", "title": "Repair", "price": 49, "quantity": 500, "kind": "service"}
    ]"#;
    let lines: Vec<CartLine> = serde_json::from_str(json).unwrap();

    let priced = price_cart(&lines, None, None, &PromoBook::default(), &ShippingTable::default());
    assert_eq!(priced.totals.item_count, 2 + 99);
    assert_eq!(priced.totals.subtotal, 200.0 + 49.0 * 99.0);
}

#[test]
fn test_unvalidated_items_never_reach_results() {
    let items = vec![
        Item::new("1", "Keyboard", 10.0),
        Item::new("2", "Negative", -5.0),
        Item::new("3", "Not a number", f64::NAN),
        Item::new("4", "Bad original", 20.0).with_original_price(15.0),
    ];

    let outcome = run_query(&items, &Criteria::new().with_sort(SortKey::PriceLow));
    assert_eq!(ids(&outcome.items), vec!["1"]);
    assert!(outcome.issues.is_empty());
}
