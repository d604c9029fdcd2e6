//! Checkout and order history commands.
//!
//! # Usage
//!
//! ```bash
//! lj-cli checkout
//! lj-cli orders
//! ```

use luxury_jewelry_storefront::views::OrderConfirmationView;

use super::{CliError, Context};

/// Turn the cart into an order.
///
/// An empty cart is reported but is not a failure of the command.
///
/// # Errors
///
/// Returns an error if the order cannot be recorded.
pub fn checkout(ctx: &mut Context) -> Result<(), CliError> {
    let order = match ctx.app.checkout() {
        Ok(order) => order,
        Err(e) if !e.is_storage() => {
            tracing::info!(error = %e, "Nothing to check out");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let confirmation = OrderConfirmationView::from(&order);
    if ctx.json {
        return ctx.print_json(&confirmation);
    }

    #[allow(clippy::print_stdout)]
    {
        println!("Заказ оформлен успешно!");
        println!("Номер вашего заказа: {}", confirmation.number);
        println!("Сумма заказа: {}", confirmation.total);
    }
    Ok(())
}

/// List recorded orders, oldest first.
///
/// # Errors
///
/// Returns an error if JSON output cannot be encoded.
pub fn list(ctx: &Context) -> Result<(), CliError> {
    let orders = ctx.app.cart().orders().orders();
    if ctx.json {
        return ctx.print_json(&orders);
    }

    #[allow(clippy::print_stdout)]
    {
        if orders.is_empty() {
            println!("Заказов пока нет");
        }
        for order in &orders {
            println!(
                "#{:<16} {}  {:>4} шт.  {:>12}",
                order.id,
                order.created_at.format("%Y-%m-%d %H:%M"),
                order.item_count(),
                order.total.to_string()
            );
        }
    }
    Ok(())
}
