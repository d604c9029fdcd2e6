//! Catalog filter commands.
//!
//! # Usage
//!
//! ```bash
//! lj-cli filter show
//! lj-cli filter apply --max-price 50000 --material gold --category rings --stones
//! lj-cli filter reset
//! ```

use luxury_jewelry_core::{FilterSpec, Material, Price};
use luxury_jewelry_storefront::views::CatalogStatusView;

use super::{CliError, Context};

/// Print the saved filter, or the defaults when none is saved.
///
/// # Errors
///
/// Returns an error if JSON output cannot be encoded.
pub fn show(ctx: &Context) -> Result<(), CliError> {
    let filters = ctx.app.filters();
    let spec = filters.effective();
    if ctx.json {
        return ctx.print_json(&spec);
    }

    #[allow(clippy::print_stdout)]
    {
        if filters.active().is_none() {
            println!("Фильтр не задан");
        }
        println!("Цена до:   {}", spec.max_price);
        println!("Материалы: {}", join(spec.materials.iter().map(|m| m.label())));
        println!("Категории: {}", join(spec.categories.iter().map(String::as_str)));
        println!("С камнями: {}", if spec.require_stones { "да" } else { "нет" });
    }
    Ok(())
}

/// Save a new filter, replacing the current one.
///
/// # Errors
///
/// Returns an error if a material is not recognized or the filter cannot be
/// saved.
pub fn apply(
    ctx: &mut Context,
    max_price: Option<u64>,
    materials: &[String],
    require_stones: bool,
    categories: Vec<String>,
) -> Result<(), CliError> {
    let materials = materials
        .iter()
        .map(|value| match Material::from_attr(value) {
            Material::None => Err(CliError::InvalidArgument(format!(
                "unknown material {value:?} (expected gold or silver)"
            ))),
            material => Ok(material),
        })
        .collect::<Result<_, _>>()?;

    let spec = FilterSpec {
        max_price: max_price.map_or(ctx.app.config().filters.default_max_price, Price::new),
        materials,
        require_stones,
        categories: categories.into_iter().collect(),
    };
    let status = ctx.app.apply_filters(spec)?;
    print_status(ctx, &status)
}

/// Forget the saved filter.
///
/// # Errors
///
/// Returns an error if the saved filter cannot be removed.
pub fn reset(ctx: &mut Context) -> Result<(), CliError> {
    let status = ctx.app.reset_filters()?;
    print_status(ctx, &status)
}

fn print_status(ctx: &Context, status: &CatalogStatusView) -> Result<(), CliError> {
    if ctx.json {
        return ctx.print_json(status);
    }
    #[allow(clippy::print_stdout)]
    {
        match &status.empty_message {
            Some(message) => println!("{}", message.title),
            None => println!("Показано {} из {}", status.shown, status.total),
        }
    }
    Ok(())
}

fn join<'a>(values: impl Iterator<Item = &'a str>) -> String {
    let joined = values.collect::<Vec<_>>().join(", ");
    if joined.is_empty() {
        "любые".to_string()
    } else {
        joined
    }
}
