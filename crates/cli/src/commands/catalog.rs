//! Catalog commands.
//!
//! # Usage
//!
//! ```bash
//! lj-cli catalog list
//! lj-cli catalog list --filtered
//! ```

use luxury_jewelry_core::Product;
use luxury_jewelry_storefront::views::CatalogStatusView;
use serde::Serialize;

use super::{CliError, Context};

#[derive(Serialize)]
struct CatalogListing<'a> {
    products: Vec<&'a Product>,
    status: CatalogStatusView,
}

/// List catalog products, optionally only those passing the saved filter.
///
/// # Errors
///
/// Returns an error if JSON output cannot be encoded.
pub fn list(ctx: &Context, filtered: bool) -> Result<(), CliError> {
    let outcome = ctx.app.visible_products();
    let status = CatalogStatusView::from(&outcome);
    let products: Vec<&Product> = if filtered {
        outcome.into_matched()
    } else {
        ctx.app.catalog().iter().collect()
    };

    if ctx.json {
        return ctx.print_json(&CatalogListing { products, status });
    }

    #[allow(clippy::print_stdout)]
    {
        for product in &products {
            println!(
                "{:<24} {:<32} {:>12}  {:<12} {}{}",
                product.id.as_str(),
                product.name,
                product.price.to_string(),
                product.material.label(),
                product.category,
                if product.has_stones { "  ◆" } else { "" },
            );
        }
        if filtered {
            match &status.empty_message {
                Some(message) => {
                    println!("{}", message.title);
                    println!("{}", message.hint);
                }
                None => println!("Показано {} из {}", status.shown, status.total),
            }
        }
    }
    Ok(())
}
