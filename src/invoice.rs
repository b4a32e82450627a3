//! Invoice
//!
//! Fixed-width text rendering of a cart. The layout is compared byte-for-byte by
//! consumers, so column widths must not change.
//!
//! ```text
//! +------------------------------------------------+----------+
//! | Name                                       qty |    price |
//! +------------------------------------------------+----------+
//! | Green Tea                                    6 |     4.74 |
//! |   (buy 2, get 1 free)                          |    -1.58 |
//! | Coupon TEATIME - 20% off                       |    -0.63 |
//! +------------------------------------------------+----------+
//! | TOTAL                                          |     2.53 |
//! +------------------------------------------------+----------+
//! ```

use std::{
    fmt::{self, Write},
    io,
};

use thiserror::Error;

use crate::{cart::Cart, discounts::DiscountError, money::Amount, products::Product};

const SEPARATOR: &str = "+------------------------------------------------+----------+";

/// Errors that can occur while rendering an invoice.
#[derive(Debug, Error)]
pub enum InvoiceError {
    /// A price or discount could not be calculated.
    #[error(transparent)]
    Discount(#[from] DiscountError),

    /// Formatting into the output buffer failed.
    #[error("failed to format invoice")]
    Format(#[from] fmt::Error),

    /// Writing the rendered invoice failed.
    #[error("failed to write invoice: {0}")]
    Io(#[from] io::Error),
}

/// Render the invoice for a cart.
///
/// # Errors
///
/// Returns [`InvoiceError::Discount`] if an amount cannot be calculated.
pub fn render(cart: &Cart<'_>) -> Result<String, InvoiceError> {
    let mut out = String::new();

    write_invoice(&mut out, cart)?;

    Ok(out)
}

/// Render the invoice for a cart into `out`.
///
/// # Errors
///
/// Returns an [`InvoiceError`] if an amount cannot be calculated or writing fails.
pub fn write_to(mut out: impl io::Write, cart: &Cart<'_>) -> Result<(), InvoiceError> {
    let invoice = render(cart)?;

    out.write_all(invoice.as_bytes())?;

    Ok(())
}

fn write_invoice(out: &mut impl Write, cart: &Cart<'_>) -> Result<(), InvoiceError> {
    writeln!(out, "{SEPARATOR}")?;
    writeln!(out, "| {:<42} qty |    price |", "Name")?;
    writeln!(out, "{SEPARATOR}")?;

    for (product, quantity) in cart.lines() {
        write_line(out, product, quantity)?;
    }

    let coupon_discount = cart.coupon_discount()?.to_minor_units();

    if coupon_discount > 0 {
        writeln!(
            out,
            "| {:<46} |{:>9} |",
            cart.coupon().display(),
            Amount(-coupon_discount)
        )?;
    }

    writeln!(out, "{SEPARATOR}")?;
    writeln!(out, "| {:<46} |{:>9} |", "TOTAL", Amount::from(cart.total()?))?;
    writeln!(out, "{SEPARATOR}")?;

    Ok(())
}

fn write_line(
    out: &mut impl Write,
    product: &Product<'_>,
    quantity: u32,
) -> Result<(), InvoiceError> {
    writeln!(
        out,
        "| {:<44}{:>2} |{:>9} |",
        product.name(),
        quantity,
        Amount::from(product.line_price(quantity)?)
    )?;

    let discount = product.discount(quantity)?.to_minor_units();

    if discount > 0 {
        writeln!(
            out,
            "|   {:<45}|{:>9} |",
            format!("({})", product.discount_description()),
            Amount(-discount)
        )?;
    }

    Ok(())
}
