//! Saved catalog filters.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use luxury_jewelry_core::{FilterSpec, Material, Price};
use luxury_jewelry_integration_tests::{TestContext, sample_catalog};
use luxury_jewelry_storefront::state::{Page, PageView};
use proptest::prelude::*;

#[test]
fn test_default_ceiling_hides_expensive_items() {
    let ctx = TestContext::new();
    let mut app = ctx.open();
    let mut catalog = sample_catalog();
    app.load_catalog(&mut catalog);

    let outcome = app.visible_products();
    assert_eq!(outcome.total(), 5);
    // The 150 000 necklace is above the default ceiling
    assert_eq!(outcome.matched_count(), 4);
}

#[test]
fn test_apply_persists_and_restores() {
    let ctx = TestContext::new();
    let mut spec = FilterSpec::with_max_price(Price::new(50_000));
    spec.materials.insert(Material::Gold);
    spec.require_stones = true;

    {
        let mut app = ctx.open();
        let mut catalog = sample_catalog();
        app.load_catalog(&mut catalog);
        let status = app.apply_filters(spec.clone()).unwrap();
        assert_eq!(status.shown, 2);
        assert_eq!(app.drain_notices()[0].message, "Фильтры применены");
    }

    let mut app = ctx.open();
    let mut catalog = sample_catalog();
    app.load_catalog(&mut catalog);
    assert_eq!(app.filters().active(), Some(&spec));
    let PageView::Catalog { status, .. } = app.on_page_load(Page::Catalog) else {
        panic!("expected catalog view");
    };
    assert_eq!(status.shown, 2);
    assert!(status.empty_message.is_none());
}

#[test]
fn test_no_results_state() {
    let ctx = TestContext::new();
    let mut app = ctx.open();
    let mut catalog = sample_catalog();
    app.load_catalog(&mut catalog);

    let mut spec = FilterSpec::default();
    spec.materials.insert(Material::Silver);
    spec.require_stones = true;
    let status = app.apply_filters(spec).unwrap();
    assert_eq!(status.shown, 0);
    assert_eq!(
        status.empty_message.unwrap().title,
        "Товары не найдены"
    );

    let status = app.reset_filters().unwrap();
    assert_eq!(status.shown, 4);
    assert!(ctx.read_raw("jewelryFilters").is_none());
}

#[test]
fn test_legacy_stones_field_restores() {
    let ctx = TestContext::new();
    ctx.write_raw(
        "jewelryFilters",
        r#"{"maxPrice":20000,"materials":["silver"],"stones":false,"categories":[]}"#,
    );
    let app = ctx.open();
    let spec = app.filters().active().unwrap();
    assert_eq!(spec.max_price, Price::new(20_000));
    assert!(spec.materials.contains(&Material::Silver));
}

proptest! {
    #[test]
    fn prop_saved_filter_reloads_equal(
        max_price in 0_u64..500_000,
        gold in any::<bool>(),
        silver in any::<bool>(),
        stones in any::<bool>(),
        categories in proptest::collection::btree_set("[a-z]{1,12}", 0..5),
    ) {
        let ctx = TestContext::new();
        let mut spec = FilterSpec::with_max_price(Price::new(max_price));
        if gold {
            spec.materials.insert(Material::Gold);
        }
        if silver {
            spec.materials.insert(Material::Silver);
        }
        spec.require_stones = stones;
        spec.categories = categories;

        ctx.open().apply_filters(spec.clone()).unwrap();
        prop_assert_eq!(ctx.open().filters().load(), Some(spec));
    }
}
