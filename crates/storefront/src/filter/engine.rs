//! Catalog filter predicate.

use luxury_jewelry_core::{FilterSpec, Product};

/// Whether `product` satisfies every constraint of `spec`.
///
/// Products above the price ceiling are rejected. A non-empty material or
/// category set must contain the product's value, and a product without
/// stones is rejected when stones are required.
#[must_use]
pub fn matches(product: &Product, spec: &FilterSpec) -> bool {
    if product.price > spec.max_price {
        return false;
    }
    if !spec.materials.is_empty() && !spec.materials.contains(&product.material) {
        return false;
    }
    if spec.require_stones && !product.has_stones {
        return false;
    }
    spec.categories.is_empty() || spec.categories.contains(&product.category)
}

/// Products that passed a filter, with the size of the catalog they came
/// from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOutcome<'a> {
    total: usize,
    matched: Vec<&'a Product>,
}

impl<'a> FilterOutcome<'a> {
    /// Matching products in catalog order.
    #[must_use]
    pub fn matched(&self) -> &[&'a Product] {
        &self.matched
    }

    #[must_use]
    pub fn matched_count(&self) -> usize {
        self.matched.len()
    }

    /// Size of the catalog that was filtered.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.total
    }

    /// Products hidden by the filter.
    #[must_use]
    pub fn hidden_count(&self) -> usize {
        self.total - self.matched.len()
    }

    /// No product matched; the catalog shows its "nothing found" state.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matched.is_empty()
    }

    #[must_use]
    pub fn into_matched(self) -> Vec<&'a Product> {
        self.matched
    }
}

/// Filter `products` by `spec`, keeping catalog order.
pub fn apply<'a, I>(products: I, spec: &FilterSpec) -> FilterOutcome<'a>
where
    I: IntoIterator<Item = &'a Product>,
{
    let mut total = 0;
    let matched = products
        .into_iter()
        .inspect(|_| total += 1)
        .filter(|product| matches(product, spec))
        .collect();
    FilterOutcome { total, matched }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use luxury_jewelry_core::{Material, Price, ProductId};
    use proptest::prelude::*;

    use super::*;

    fn product(material: Material, price: u64, category: &str, has_stones: bool) -> Product {
        Product {
            id: ProductId::new(format!("{}-{price}", material.as_str())),
            name: "Изделие".to_string(),
            price: Price::new(price),
            image: String::new(),
            material,
            category: category.to_string(),
            has_stones,
        }
    }

    fn gold_only() -> FilterSpec {
        let mut spec = FilterSpec::default();
        spec.materials.insert(Material::Gold);
        spec
    }

    #[test]
    fn test_default_spec_only_limits_price() {
        let spec = FilterSpec::default();
        assert!(matches(&product(Material::None, 100_000, "", false), &spec));
        assert!(!matches(&product(Material::Gold, 100_001, "rings", true), &spec));
    }

    #[test]
    fn test_material_set() {
        let spec = gold_only();
        assert!(matches(&product(Material::Gold, 90_000, "rings", false), &spec));
        assert!(!matches(&product(Material::Silver, 1_000, "rings", false), &spec));
        assert!(!matches(&product(Material::None, 1_000, "rings", false), &spec));
    }

    #[test]
    fn test_material_set_is_disjunctive() {
        let mut spec = gold_only();
        spec.materials.insert(Material::Silver);
        assert!(matches(&product(Material::Silver, 1_000, "", false), &spec));
        assert!(matches(&product(Material::Gold, 1_000, "", false), &spec));
    }

    #[test]
    fn test_price_ceiling_beats_material() {
        let mut spec = gold_only();
        spec.max_price = Price::new(10_000);
        assert!(!matches(&product(Material::Gold, 10_001, "rings", false), &spec));
        assert!(matches(&product(Material::Gold, 10_000, "rings", false), &spec));
    }

    #[test]
    fn test_stones_and_categories() {
        let mut spec = FilterSpec::default();
        spec.require_stones = true;
        spec.categories.insert("earrings".to_string());

        assert!(matches(&product(Material::Gold, 1, "earrings", true), &spec));
        assert!(!matches(&product(Material::Gold, 1, "earrings", false), &spec));
        assert!(!matches(&product(Material::Gold, 1, "rings", true), &spec));
    }

    #[test]
    fn test_apply_counts() {
        let catalog = vec![
            product(Material::Gold, 5_000, "rings", false),
            product(Material::Silver, 3_000, "rings", false),
            product(Material::Gold, 200_000, "necklaces", true),
        ];
        let outcome = apply(&catalog, &gold_only());
        assert_eq!(outcome.total(), 3);
        assert_eq!(outcome.matched_count(), 1);
        assert_eq!(outcome.hidden_count(), 2);
        assert!(!outcome.is_empty());

        let mut none = gold_only();
        none.max_price = Price::ZERO;
        assert!(apply(&catalog, &none).is_empty());
    }

    fn material() -> impl Strategy<Value = Material> {
        prop_oneof![
            Just(Material::Gold),
            Just(Material::Silver),
            Just(Material::None)
        ]
    }

    proptest! {
        #[test]
        fn prop_gold_filter_ignores_price_below_ceiling(
            m in material(),
            price in 0_u64..=100_000,
            stones in any::<bool>(),
        ) {
            let p = product(m, price, "rings", stones);
            prop_assert_eq!(matches(&p, &gold_only()), m == Material::Gold);
        }

        #[test]
        fn prop_matches_is_conjunction_of_rules(
            m in material(),
            price in 0_u64..200_000,
            stones in any::<bool>(),
            ceiling in 0_u64..200_000,
            require_stones in any::<bool>(),
            want_gold in any::<bool>(),
            want_rings in any::<bool>(),
        ) {
            let p = product(m, price, "rings", stones);
            let mut spec = FilterSpec::with_max_price(Price::new(ceiling));
            spec.require_stones = require_stones;
            if want_gold {
                spec.materials.insert(Material::Gold);
            }
            if want_rings {
                spec.categories.insert("rings".to_string());
            }

            let expected = price <= ceiling
                && (!want_gold || m == Material::Gold)
                && (!require_stones || stones);
            prop_assert_eq!(matches(&p, &spec), expected);
        }
    }
}
