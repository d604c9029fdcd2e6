//! Luxury Jewelry CLI - drive the storefront state from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # List the catalog, optionally only what the saved filter lets through
//! lj-cli catalog list --filtered
//!
//! # Add two units of a product and look at the cart
//! lj-cli cart add ring-1 -q 2
//! lj-cli cart show
//!
//! # Save a filter
//! lj-cli filter apply --max-price 50000 --material gold --stones
//!
//! # Place the order
//! lj-cli checkout
//! ```
//!
//! # Commands
//!
//! - `catalog list` - List catalog products
//! - `cart` - Show or change the cart
//! - `checkout` - Turn the cart into an order
//! - `orders` - List recorded orders
//! - `filter` - Show, save or reset the catalog filter
//!
//! State is kept in `JEWELRY_STORAGE_DIR` (see the storefront crate's config
//! module for every variable). Logs go to stderr; set `RUST_LOG` to filter
//! them and `JEWELRY_LOG_FORMAT=json` for structured output.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "lj-cli")]
#[command(author, version, about = "Luxury Jewelry storefront CLI")]
struct Cli {
    /// Catalog file (JSON array of catalog entries)
    #[arg(long, global = true, default_value = "catalog.json")]
    catalog: PathBuf,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Show or change the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Place an order for the cart contents
    Checkout,
    /// List recorded orders
    Orders,
    /// Manage the catalog filter
    Filter {
        #[command(subcommand)]
        action: FilterAction,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List products
    List {
        /// Only show products passing the saved filter
        #[arg(short, long)]
        filtered: bool,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart contents and summary
    Show,
    /// Add a catalog product
    Add {
        /// Product id
        id: String,

        /// Units to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Set a line's quantity (0 or less removes it)
    Set {
        /// Product id
        id: String,

        /// New quantity
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove a line
    Remove {
        /// Product id
        id: String,
    },
    /// Remove every line
    Clear,
}

#[derive(Subcommand)]
enum FilterAction {
    /// Show the saved filter
    Show,
    /// Save a new filter, replacing the current one
    Apply {
        /// Price ceiling
        #[arg(long)]
        max_price: Option<u64>,

        /// Allowed material (`gold`, `silver`); repeatable
        #[arg(long = "material")]
        materials: Vec<String>,

        /// Only products with stones
        #[arg(long)]
        stones: bool,

        /// Allowed category; repeatable
        #[arg(long = "category")]
        categories: Vec<String>,
    },
    /// Forget the saved filter
    Reset,
}

fn main() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "luxury_jewelry_storefront=info,lj_cli=info".into());

    // JSON logs for machine consumption, text otherwise; stdout is for output
    let is_json = std::env::var("JEWELRY_LOG_FORMAT").is_ok_and(|format| format == "json");
    let json_layer = is_json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer =
        (!is_json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), commands::CliError> {
    let mut ctx = commands::Context::open(&cli.catalog, cli.json)?;

    match cli.command {
        Commands::Catalog { action } => match action {
            CatalogAction::List { filtered } => commands::catalog::list(&ctx, filtered)?,
        },
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&ctx)?,
            CartAction::Add { id, quantity } => commands::cart::add(&mut ctx, &id, quantity)?,
            CartAction::Set { id, quantity } => {
                commands::cart::set_quantity(&mut ctx, &id, quantity)?;
            }
            CartAction::Remove { id } => commands::cart::remove(&mut ctx, &id)?,
            CartAction::Clear => commands::cart::clear(&mut ctx)?,
        },
        Commands::Checkout => commands::orders::checkout(&mut ctx)?,
        Commands::Orders => commands::orders::list(&ctx)?,
        Commands::Filter { action } => match action {
            FilterAction::Show => commands::filter::show(&ctx)?,
            FilterAction::Apply {
                max_price,
                materials,
                stones,
                categories,
            } => commands::filter::apply(&mut ctx, max_price, &materials, stones, categories)?,
            FilterAction::Reset => commands::filter::reset(&mut ctx)?,
        },
    }

    ctx.print_notices();
    Ok(())
}
