//! Cart commands.
//!
//! # Usage
//!
//! ```bash
//! lj-cli cart show
//! lj-cli cart add ring-1 -q 2
//! lj-cli cart set ring-1 5
//! lj-cli cart remove ring-1
//! lj-cli cart clear
//! ```

use luxury_jewelry_core::{ProductId, Quantity};
use luxury_jewelry_storefront::views::CartView;

use super::{CliError, Context};

/// Print cart contents and the order summary.
///
/// # Errors
///
/// Returns an error if JSON output cannot be encoded.
pub fn show(ctx: &Context) -> Result<(), CliError> {
    let view = ctx.app.cart_view();
    if ctx.json {
        return ctx.print_json(&view);
    }
    print_cart(&view);
    Ok(())
}

/// Add `quantity` units of catalog product `id`.
///
/// # Errors
///
/// Returns an error if the quantity is zero, the product is not in the
/// catalog or the cart cannot be saved.
pub fn add(ctx: &mut Context, id: &str, quantity: u32) -> Result<(), CliError> {
    let quantity = Quantity::new(quantity)
        .ok_or_else(|| CliError::InvalidArgument("quantity must be at least 1".to_string()))?;
    let line = ctx.app.add_product(&ProductId::new(id), quantity)?;
    tracing::debug!(id, total = line.quantity.get(), "Added via CLI");
    show(ctx)
}

/// Set the quantity of the line for `id`.
///
/// # Errors
///
/// Returns an error if the cart cannot be saved.
pub fn set_quantity(ctx: &mut Context, id: &str, quantity: i64) -> Result<(), CliError> {
    let id = ProductId::new(id);
    let existed = ctx.app.cart().get(&id).is_some();
    ctx.app.set_quantity(&id, quantity)?;
    if !existed && quantity >= 1 {
        tracing::warn!(%id, "Product is not in the cart");
    }
    show(ctx)
}

/// Remove the line for `id`.
///
/// # Errors
///
/// Returns an error if the cart cannot be saved.
pub fn remove(ctx: &mut Context, id: &str) -> Result<(), CliError> {
    ctx.app.remove_item(&ProductId::new(id))?;
    show(ctx)
}

/// Empty the cart.
///
/// # Errors
///
/// Returns an error if the cart cannot be saved.
pub fn clear(ctx: &mut Context) -> Result<(), CliError> {
    if !ctx.app.clear_cart()? {
        tracing::info!("Cart is already empty");
    }
    show(ctx)
}

fn print_cart(view: &CartView) {
    #[allow(clippy::print_stdout)]
    {
        if view.is_empty() {
            println!("Корзина пуста");
        }
        for item in &view.items {
            println!(
                "{:<24} {:<32} {:>12} × {:<4} {:>12}  {}",
                item.id, item.name, item.price, item.quantity, item.line_price, item.material
            );
        }
        println!();
        println!("Товары:   {}", view.summary.subtotal);
        println!("Доставка: {}", view.summary.delivery);
        println!("Итого:    {}", view.summary.total);
        println!("[{}]", view.summary.checkout_label);
    }
}
