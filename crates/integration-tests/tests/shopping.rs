//! Cart and checkout through the storefront, backed by files.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use chrono::TimeDelta;
use luxury_jewelry_core::{Order, Price, ProductId, Quantity};
use luxury_jewelry_integration_tests::{TestContext, sample_catalog};
use luxury_jewelry_storefront::cart::CartError;
use luxury_jewelry_storefront::config::StorefrontConfig;
use luxury_jewelry_storefront::error::AppError;
use luxury_jewelry_storefront::state::{Page, PageView};

fn id(s: &str) -> ProductId {
    ProductId::new(s)
}

#[test]
fn test_browse_add_and_checkout() {
    let ctx = TestContext::new();
    let mut app = ctx.open();
    let mut catalog = sample_catalog();
    app.load_catalog(&mut catalog);

    app.add_to_cart(&mut catalog[1], Some("btn-ring-silver")).unwrap();
    app.add_to_cart(&mut catalog[1], Some("btn-ring-silver")).unwrap();
    app.add_to_cart(&mut catalog[3], None).unwrap();

    let view = app.cart_view();
    assert_eq!(view.item_count, 3);
    assert_eq!(view.summary.subtotal, "13\u{a0}000 ₽");
    assert_eq!(view.summary.delivery, "300 ₽");
    assert_eq!(view.summary.total, "13\u{a0}300 ₽");

    let order = app.checkout().unwrap();
    assert_eq!(order.subtotal, Price::new(13_000));
    assert_eq!(order.total, Price::new(13_000));
    assert!(app.cart().is_empty());

    let stored: Vec<Order> =
        serde_json::from_str(&ctx.read_raw("luxuryJewelryOrders").unwrap()).unwrap();
    assert_eq!(stored, vec![order]);
    assert_eq!(ctx.read_raw("luxuryJewelryCart").as_deref(), Some("[]"));
}

#[test]
fn test_free_shipping_from_threshold() {
    let ctx = TestContext::new();
    let mut app = ctx.open();
    let mut catalog = sample_catalog();
    app.load_catalog(&mut catalog);

    app.add_product(&id("earrings-gold"), Quantity::ONE).unwrap();
    assert_eq!(app.cart_view().summary.delivery, "300 ₽");

    app.add_product(&id("chain-silver"), Quantity::ONE).unwrap();
    // 12 500 + 3 000 crosses 15 000
    assert_eq!(app.cart_view().summary.delivery, "Бесплатно");
    assert_eq!(app.cart_view().summary.total, "15\u{a0}500 ₽");
}

#[test]
fn test_empty_checkout_leaves_log_alone() {
    let ctx = TestContext::new();
    let mut app = ctx.open();

    let err = app.checkout().unwrap_err();
    assert!(matches!(err, AppError::Cart(CartError::EmptyCart)));
    assert!(ctx.read_raw("luxuryJewelryOrders").is_none());
    assert_eq!(app.drain_notices()[0].message, "Корзина пуста");
}

#[test]
fn test_order_totals_can_include_shipping() {
    let mut config = StorefrontConfig::default();
    config.cart.order_total_includes_shipping = true;
    let ctx = TestContext::with_config(config);
    let mut app = ctx.open();
    let mut catalog = sample_catalog();
    app.load_catalog(&mut catalog);

    app.add_product(&id("ring-silver"), Quantity::ONE).unwrap();
    let order = app.checkout().unwrap();
    assert_eq!(order.subtotal, Price::new(5_000));
    assert_eq!(order.total, Price::new(5_300));
}

#[test]
fn test_orders_accumulate_across_sessions() {
    let ctx = TestContext::new();
    let mut catalog = sample_catalog();

    let first = {
        let mut app = ctx.open();
        app.load_catalog(&mut catalog);
        app.add_product(&id("ring-gold"), Quantity::ONE).unwrap();
        app.checkout().unwrap()
    };

    // Same millisecond, new session
    let second = {
        let mut app = ctx.open();
        app.load_catalog(&mut catalog);
        app.add_product(&id("chain-silver"), Quantity::ONE).unwrap();
        app.checkout().unwrap()
    };
    assert!(second.id > first.id);

    ctx.clock.advance(TimeDelta::minutes(5));
    let app = ctx.open();
    let orders = app.cart().orders().orders();
    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0].id, first.id);
}

#[test]
fn test_set_quantity_and_remove() {
    let ctx = TestContext::new();
    let mut app = ctx.open();
    let mut catalog = sample_catalog();
    app.load_catalog(&mut catalog);

    app.add_product(&id("ring-gold"), Quantity::ONE).unwrap();
    app.add_product(&id("ring-silver"), Quantity::ONE).unwrap();

    app.set_quantity(&id("ring-gold"), 4).unwrap();
    assert_eq!(app.badge().count, 5);

    app.set_quantity(&id("ring-gold"), -1).unwrap();
    assert!(app.cart().get(&id("ring-gold")).is_none());

    app.remove_item(&id("ring-silver")).unwrap();
    assert!(!app.badge().visible);

    let messages: Vec<_> = app.drain_notices().into_iter().map(|n| n.message).collect();
    assert_eq!(
        messages.iter().filter(|m| *m == "Товар удален из корзины").count(),
        2
    );
}

#[test]
fn test_cart_page_view() {
    let ctx = TestContext::new();
    let mut app = ctx.open();
    let mut catalog = sample_catalog();
    app.load_catalog(&mut catalog);
    app.add_product(&id("earrings-gold"), Quantity::new(2).unwrap())
        .unwrap();

    let PageView::Cart { badge, cart } = app.on_page_load(Page::Cart) else {
        panic!("expected cart view");
    };
    assert_eq!(badge.count, 2);
    assert_eq!(cart.items[0].material, "Золото 585");
    assert_eq!(cart.items[0].line_price, "25\u{a0}000 ₽");
    assert!(cart.summary.checkout_enabled);
}
