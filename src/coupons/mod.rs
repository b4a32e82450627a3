//! Coupons
//!
//! Cart-level discounts applied to the price of all items after promotions. A cart always
//! has exactly one coupon; [`CouponKind::Nil`] is the neutral default.

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use serde::Deserialize;
use thiserror::Error;

use crate::{
    discounts::{DiscountError, percent_of_minor},
    money::{self, Amount, AmountError},
};

/// Errors building a coupon from its spec.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CouponError {
    /// Amount off must not be negative.
    #[error("coupon amount {0} is negative")]
    NegativeAmount(Decimal),

    /// Amount off is not a valid money amount.
    #[error(transparent)]
    Amount(#[from] AmountError),

    /// Percent off must be between 0 and 100.
    #[error("coupon percent {0} is outside 0-100")]
    PercentOutOfRange(Decimal),
}

/// Coupon description as supplied at registration time.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CouponSpec {
    /// Percentage off the order, e.g. `12.5`.
    Percent {
        /// Percent points
        percent: Decimal,
    },

    /// Fixed amount off the order, e.g. `5.00`.
    Amount {
        /// Amount in major units
        amount: Decimal,
    },

    /// Any other coupon type; resolves to the nil coupon.
    #[serde(other)]
    Unrecognized,
}

/// Percent off, kept as both the points shown on the invoice and the fraction applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PercentOff {
    points: Decimal,
    fraction: Percentage,
}

impl PercentOff {
    /// Create a percent-off discount from percent points (`10` means 10%).
    ///
    /// # Errors
    ///
    /// Returns [`CouponError::PercentOutOfRange`] if `points` is outside `0..=100`.
    pub fn new(points: Decimal) -> Result<Self, CouponError> {
        if points < Decimal::ZERO || points > Decimal::ONE_HUNDRED {
            return Err(CouponError::PercentOutOfRange(points));
        }

        Ok(Self {
            points: points.normalize(),
            fraction: Percentage::from(points / Decimal::ONE_HUNDRED),
        })
    }

    /// Percent points, normalised (`10`, `12.5`).
    pub fn points(&self) -> Decimal {
        self.points
    }
}

/// The discount carried by a coupon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CouponKind<'a> {
    /// No discount.
    Nil,

    /// Fixed amount off, capped at the order price.
    AmountOff(Money<'a, Currency>),

    /// Percentage of the order price.
    PercentOff(PercentOff),
}

/// A named coupon.
#[derive(Debug, Clone, PartialEq)]
pub struct Coupon<'a> {
    name: String,
    kind: CouponKind<'a>,
}

impl<'a> Coupon<'a> {
    /// The neutral coupon every cart starts with.
    pub fn nil() -> Self {
        Self {
            name: String::new(),
            kind: CouponKind::Nil,
        }
    }

    /// Create a named coupon.
    pub fn new(name: impl Into<String>, kind: CouponKind<'a>) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// Coupon name; empty for the nil coupon.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The discount this coupon carries.
    pub fn kind(&self) -> &CouponKind<'a> {
        &self.kind
    }

    /// Whether this is the neutral coupon.
    pub fn is_nil(&self) -> bool {
        matches!(self.kind, CouponKind::Nil)
    }

    /// Discount on an order costing `order_price`. Never more than the order itself.
    ///
    /// # Errors
    ///
    /// Returns [`DiscountError::PercentConversion`] if a percentage cannot be applied.
    pub fn discount(
        &self,
        order_price: Money<'a, Currency>,
    ) -> Result<Money<'a, Currency>, DiscountError> {
        let currency = order_price.currency();

        match &self.kind {
            CouponKind::Nil => Ok(Money::from_minor(0, currency)),
            CouponKind::AmountOff(amount) => Ok(money::min(order_price, *amount)),
            CouponKind::PercentOff(percent) => {
                let minor = percent_of_minor(&percent.fraction, order_price.to_minor_units())?;

                Ok(Money::from_minor(minor, currency))
            }
        }
    }

    /// Invoice line text, e.g. `"Coupon TEATIME - 20% off"`. Empty for the nil coupon.
    pub fn display(&self) -> String {
        match &self.kind {
            CouponKind::Nil => String::new(),
            CouponKind::AmountOff(amount) => {
                format!("Coupon {} - {} off", self.name, Amount::from(amount))
            }
            CouponKind::PercentOff(percent) => {
                format!("Coupon {} - {}% off", self.name, percent.points)
            }
        }
    }
}

impl Default for Coupon<'_> {
    fn default() -> Self {
        Self::nil()
    }
}

/// Build a coupon from its spec. An unrecognised spec gives the nil coupon.
///
/// # Errors
///
/// Returns a [`CouponError`] if the amount or percent is invalid.
pub fn resolve_coupon<'a>(
    name: &str,
    spec: &CouponSpec,
    currency: &'a Currency,
) -> Result<Coupon<'a>, CouponError> {
    let kind = match spec {
        CouponSpec::Percent { percent } => CouponKind::PercentOff(PercentOff::new(*percent)?),
        CouponSpec::Amount { amount } => {
            if *amount < Decimal::ZERO {
                return Err(CouponError::NegativeAmount(*amount));
            }

            CouponKind::AmountOff(money::money_from_decimal(*amount, currency)?)
        }
        CouponSpec::Unrecognized => {
            tracing::warn!(coupon = name, "unrecognised coupon type, using nil coupon");

            return Ok(Coupon::nil());
        }
    };

    Ok(Coupon::new(name, kind))
}
