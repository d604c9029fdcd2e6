//! Restoring state written by earlier sessions.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use luxury_jewelry_core::{Price, ProductId, Quantity};
use luxury_jewelry_integration_tests::{TestContext, entry, sample_catalog};

#[test]
fn test_cart_survives_reload() {
    let ctx = TestContext::new();
    {
        let mut app = ctx.open();
        let mut catalog = sample_catalog();
        app.load_catalog(&mut catalog);
        app.add_product(&ProductId::new("ring-gold"), Quantity::new(2).unwrap())
            .unwrap();
    }

    let app = ctx.open();
    assert_eq!(app.cart().total_item_count(), 2);
    assert_eq!(app.cart().subtotal(), Price::new(90_000));
}

#[test]
fn test_corrupt_cart_opens_empty() {
    let ctx = TestContext::new();
    ctx.write_raw("luxuryJewelryCart", "[{\"id\": \"x\", \"name\": ");
    let mut app = ctx.open();
    assert!(app.cart().is_empty());

    let mut catalog = sample_catalog();
    app.load_catalog(&mut catalog);
    app.add_product(&ProductId::new("chain-silver"), Quantity::ONE)
        .unwrap();
    let stored: serde_json::Value =
        serde_json::from_str(&ctx.read_raw("luxuryJewelryCart").unwrap()).unwrap();
    assert_eq!(stored.as_array().unwrap().len(), 1);
}

#[test]
fn test_cart_written_by_older_sessions() {
    let ctx = TestContext::new();
    ctx.write_raw(
        "luxuryJewelryCart",
        r#"[
            {"id":1718000000000,"name":"Кулон","price":12000,"image":"p.jpg","material":"gold","category":"pendants","quantity":1},
            {"id":"ring","name":"Кольцо","price":5000,"image":"","material":"","category":"","quantity":0},
            {"id":1718000000000,"name":"Кулон","price":12000,"image":"p.jpg","material":"gold","category":"pendants","quantity":2}
        ]"#,
    );

    let app = ctx.open();
    assert_eq!(app.cart().len(), 1);
    assert_eq!(app.cart().lines()[0].id.as_str(), "1718000000000");
    assert_eq!(app.cart().total_item_count(), 3);

    // The repaired cart was written back
    let stored: serde_json::Value =
        serde_json::from_str(&ctx.read_raw("luxuryJewelryCart").unwrap()).unwrap();
    assert_eq!(stored.as_array().unwrap().len(), 1);
    assert_eq!(stored[0]["quantity"], 3);
}

#[test]
fn test_legacy_cart_is_migrated_once() {
    let ctx = TestContext::new();
    ctx.write_raw(
        "luxuryJewelryCart",
        r#"[{"id":"ring-silver","name":"Кольцо классика","price":5000,"image":"","material":"silver","category":"rings","quantity":1}]"#,
    );
    ctx.write_raw(
        "jewelryCart",
        r#"[
            {"id":1717000000000,"name":"Кольцо классика","price":5000,"quantity":1},
            {"id":1717000000001,"name":"Браслет","price":7000,"quantity":1}
        ]"#,
    );

    let app = ctx.open();
    assert_eq!(app.cart().len(), 2);
    assert_eq!(app.cart().lines()[0].quantity.get(), 2);
    assert_eq!(app.cart().lines()[1].id.as_str(), "legacy-1717000000001");
    assert!(ctx.read_raw("jewelryCart").is_none());
    drop(app);

    let app = ctx.open();
    assert_eq!(app.cart().total_item_count(), 3);
}

#[test]
fn test_synthesized_ids_stick_to_entries() {
    let ctx = TestContext::new();
    let mut app = ctx.open();
    let mut catalog = vec![entry("", "Браслет", "7 000 ₽", "silver", "bracelets", false)];

    let first = app.add_to_cart(&mut catalog[0], None).unwrap();
    let second = app.add_to_cart(&mut catalog[0], None).unwrap();
    assert_eq!(first.id, second.id);
    assert_eq!(second.quantity.get(), 2);
    assert_eq!(catalog[0].id(), Some(first.id.as_str()));
}

#[test]
fn test_missing_price_is_surfaced() {
    let ctx = TestContext::new();
    let mut app = ctx.open();
    let mut broken = entry("b", "Брошь", "", "gold", "brooches", false);
    broken.price_text = None;

    assert!(app.add_to_cart(&mut broken, None).is_err());
    assert!(app.cart().is_empty());
    assert!(ctx.read_raw("luxuryJewelryCart").is_none());
}

#[test]
fn test_checkout_keeps_orders_from_older_sessions() {
    let ctx = TestContext::new();
    ctx.write_raw(
        "luxuryJewelryOrders",
        r#"[{"id":1700000000000,"date":"14.11.2023, 22:13:20","items":[{"id":"ring","name":"Кольцо","price":5000,"quantity":1}],"subtotal":5000,"total":5000}]"#,
    );

    let mut app = ctx.open();
    let mut catalog = sample_catalog();
    app.load_catalog(&mut catalog);
    app.add_product(&ProductId::new("ring-gold"), Quantity::ONE)
        .unwrap();
    let order = app.checkout().unwrap();

    let stored: serde_json::Value =
        serde_json::from_str(&ctx.read_raw("luxuryJewelryOrders").unwrap()).unwrap();
    let stored = stored.as_array().unwrap();
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[0]["id"], 1_700_000_000_000_i64);
    assert_eq!(stored[0]["date"], "14.11.2023, 22:13:20");
    assert_eq!(stored[1]["id"], order.id.as_i64());
}
