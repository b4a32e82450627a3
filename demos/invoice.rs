//! Invoice Example
//!
//! Loads a catalog, fills a cart and prints its invoice.
//!
//! Use `--catalog` to load a different catalog file
//! Use `--add NAME[=QTY]` (repeatable) to put products in the cart
//! Use `--coupon` to apply a coupon by name
//! Use `--list` to print the catalog instead of an invoice

use std::{io, path::PathBuf, str::FromStr};

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use till::{
    cart::{Cart, CartError},
    catalog::{
        listing::{coupons_table, products_table},
        load_inventory,
    },
    invoice::write_to,
};

/// A `NAME[=QTY]` cart line from the command line
#[derive(Debug, Clone)]
struct LineArg {
    name: String,
    quantity: u32,
}

impl FromStr for LineArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, quantity) = match s.rsplit_once('=') {
            Some((name, quantity)) => (
                name,
                quantity
                    .trim()
                    .parse()
                    .map_err(|e| format!("invalid quantity in {s:?}: {e}"))?,
            ),
            None => (s, 1),
        };

        Ok(Self {
            name: name.trim().to_string(),
            quantity,
        })
    }
}

/// Arguments for the invoice example
#[derive(Debug, Parser)]
#[command(about = "Build a cart from a catalog and print its invoice")]
struct InvoiceArgs {
    /// Catalog YAML file
    #[arg(long, default_value = "fixtures/catalogs/tea-shop.yml")]
    catalog: PathBuf,

    /// Product to add, as `NAME` or `NAME=QTY`
    #[arg(long = "add", value_name = "NAME[=QTY]")]
    lines: Vec<LineArg>,

    /// Coupon to apply
    #[arg(long)]
    coupon: Option<String>,

    /// Print the catalog's products and coupons
    #[arg(long)]
    list: bool,
}

/// Invoice Example
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = InvoiceArgs::parse();

    let inventory = load_inventory(&args.catalog)?;

    if args.list {
        println!("{}", products_table(&inventory));
        println!("{}", coupons_table(&inventory));

        return Ok(());
    }

    let mut cart = inventory.new_cart();
    fill_cart(&mut cart, &args.lines, args.coupon.as_deref())?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    write_to(&mut handle, &cart)?;

    Ok(())
}

/// Add every line to the cart, then apply the coupon. Unknown coupons leave the cart
/// without a discount.
fn fill_cart(
    cart: &mut Cart<'_>,
    lines: &[LineArg],
    coupon: Option<&str>,
) -> Result<(), CartError> {
    for line in lines {
        cart.add(&line.name, line.quantity)?;
    }

    if let Some(coupon) = coupon {
        cart.use_coupon(coupon);

        if cart.coupon().is_nil() {
            tracing::warn!(coupon, "unknown coupon, no discount applied");
        }
    }

    Ok(())
}
