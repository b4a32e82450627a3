//! Money
//!
//! Every price in the engine is a two decimal fixed point amount. Arithmetic happens on
//! minor units (pence/cents) and is only wrapped back into [`Money`] at the edges.

use std::fmt;

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{
    Money,
    iso::{Currency, EUR, GBP, USD},
};
use thiserror::Error;

/// Minor units in one major unit.
pub const MINOR_PER_MAJOR: i64 = 100;

/// Errors converting a decimal amount into minor units.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AmountError {
    /// The amount has a fractional part smaller than one minor unit.
    #[error("amount {0} has more than two decimal places")]
    Precision(Decimal),

    /// The amount does not fit into minor units.
    #[error("amount {0} is out of range")]
    OutOfRange(Decimal),
}

/// Convert an exact decimal amount (e.g. `2.50`) into minor units (`250`).
///
/// # Errors
///
/// - [`AmountError::Precision`]: the amount cannot be represented in whole minor units.
/// - [`AmountError::OutOfRange`]: the amount overflows an `i64` of minor units.
pub fn minor_units(amount: Decimal) -> Result<i64, AmountError> {
    let scaled = amount
        .checked_mul(Decimal::from(MINOR_PER_MAJOR))
        .ok_or(AmountError::OutOfRange(amount))?;

    if !scaled.fract().is_zero() {
        return Err(AmountError::Precision(amount));
    }

    scaled.to_i64().ok_or(AmountError::OutOfRange(amount))
}

/// Build a [`Money`] value from an exact decimal amount.
///
/// # Errors
///
/// See [`minor_units`].
pub fn money_from_decimal(
    amount: Decimal,
    currency: &Currency,
) -> Result<Money<'_, Currency>, AmountError> {
    Ok(Money::from_minor(minor_units(amount)?, currency))
}

/// Returns the smaller of two amounts in the same currency.
pub fn min<'a>(a: Money<'a, Currency>, b: Money<'a, Currency>) -> Money<'a, Currency> {
    if b.to_minor_units() < a.to_minor_units() {
        b
    } else {
        a
    }
}

/// Returns the larger of two amounts in the same currency.
pub fn max<'a>(a: Money<'a, Currency>, b: Money<'a, Currency>) -> Money<'a, Currency> {
    if b.to_minor_units() > a.to_minor_units() {
        b
    } else {
        a
    }
}

/// Look up one of the supported ISO currencies by code.
pub fn currency_from_code(code: &str) -> Option<&'static Currency> {
    match code.trim() {
        "GBP" => Some(GBP),
        "USD" => Some(USD),
        "EUR" => Some(EUR),
        _ => None,
    }
}

/// Display adapter printing minor units the way `%.2f` prints a major amount.
///
/// Honours width and alignment flags, so `format!("{:>9}", Amount(-250))` yields `"    -2.50"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Amount(pub i64);

impl From<&Money<'_, Currency>> for Amount {
    fn from(money: &Money<'_, Currency>) -> Self {
        Amount(money.to_minor_units())
    }
}

impl From<Money<'_, Currency>> for Amount {
    fn from(money: Money<'_, Currency>) -> Self {
        Amount(money.to_minor_units())
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let per_major = MINOR_PER_MAJOR.unsigned_abs();

        f.pad(&format!(
            "{sign}{}.{:02}",
            abs / per_major,
            abs % per_major
        ))
    }
}
