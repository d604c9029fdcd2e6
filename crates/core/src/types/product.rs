//! Catalog products and cart line items.

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::material::Material;
use super::price::Price;
use super::quantity::Quantity;

/// A product as read from the rendered catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub material: Material,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub has_stones: bool,
}

/// One product in the cart together with how many units were added.
///
/// Serialized with the field names the storefront has always written to
/// local storage (`price`, `image`), so carts saved by earlier sessions
/// restore unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    pub id: ProductId,
    pub name: String,
    /// Unit price in minor units.
    #[serde(rename = "price")]
    pub unit_price: Price,
    #[serde(rename = "image", default)]
    pub image_ref: String,
    #[serde(default)]
    pub material: Material,
    #[serde(default)]
    pub category: String,
    pub quantity: Quantity,
}

impl CartLineItem {
    /// Create a line for `product` holding `quantity` units.
    #[must_use]
    pub fn from_product(product: &Product, quantity: Quantity) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            unit_price: product.price,
            image_ref: product.image.clone(),
            material: product.material,
            category: product.category.clone(),
            quantity,
        }
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price.times(self.quantity)
    }
}
