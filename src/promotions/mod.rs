//! Promotions
//!
//! Per-product discount policies. A [`PromotionSpec`] is the raw description supplied at
//! registration (or read from a catalog file) and [`resolve_promotion`] turns it into a
//! validated [`Promotion`].

use rusty_money::{Money, iso::Currency};
use serde::Deserialize;
use thiserror::Error;

use crate::discounts::DiscountError;

pub mod types;

use types::{BuyNGetOneFree, PackageDiscount, ThresholdDiscount};

/// Largest whole percent a promotion may take off.
pub const MAX_PERCENT: u32 = 100;

/// Errors building a promotion from its spec.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PromotionError {
    /// "Every 0th unit free" has no meaning.
    #[error("free unit position must be at least 1")]
    ZeroNth,

    /// Packages must contain at least one unit.
    #[error("package size must be at least 1")]
    ZeroPackageSize,

    /// Percent off beyond 100 would make prices negative.
    #[error("discount of {0}% exceeds 100%")]
    PercentTooLarge(u32),
}

/// Promotion description as supplied at registration time.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PromotionSpec {
    /// Every `nth` unit free.
    GetOneFree {
        /// Position of the free unit
        nth: u32,
    },

    /// `percent` off every full package of `size` units.
    Package {
        /// Units per package
        size: u32,

        /// Whole percent off
        percent: u32,
    },

    /// `percent` off every unit after the first `count`.
    Threshold {
        /// Units at full price
        count: u32,

        /// Whole percent off
        percent: u32,
    },

    /// Any other promotion type; resolves to no promotion.
    #[serde(other)]
    Unrecognized,
}

/// Promotion attached to a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Promotion {
    /// Full price, always.
    #[default]
    NoPromotion,

    /// Every n-th unit free
    BuyNGetOneFree(BuyNGetOneFree),

    /// Percent off full packages
    PackageDiscount(PackageDiscount),

    /// Percent off units past a threshold
    ThresholdDiscount(ThresholdDiscount),
}

impl Promotion {
    /// Calculate the discount for `count` units at `unit_price`.
    ///
    /// The result is never negative and never exceeds `unit_price * count`.
    ///
    /// # Errors
    ///
    /// Returns [`DiscountError::Overflow`] if the discount does not fit in minor units.
    pub fn discount<'a>(
        &self,
        unit_price: &Money<'a, Currency>,
        count: u32,
    ) -> Result<Money<'a, Currency>, DiscountError> {
        let unit_minor = unit_price.to_minor_units();

        let discount_minor = match self {
            Promotion::NoPromotion => 0,
            Promotion::BuyNGetOneFree(promo) => promo.discount_minor(unit_minor, count)?,
            Promotion::PackageDiscount(promo) => promo.discount_minor(unit_minor, count)?,
            Promotion::ThresholdDiscount(promo) => promo.discount_minor(unit_minor, count)?,
        };

        Ok(Money::from_minor(discount_minor, unit_price.currency()))
    }

    /// Human readable description; empty for [`Promotion::NoPromotion`].
    pub fn description(&self) -> String {
        match self {
            Promotion::NoPromotion => String::new(),
            Promotion::BuyNGetOneFree(promo) => promo.description(),
            Promotion::PackageDiscount(promo) => promo.description(),
            Promotion::ThresholdDiscount(promo) => promo.description(),
        }
    }

    /// Whether this is the neutral promotion.
    pub fn is_neutral(&self) -> bool {
        matches!(self, Promotion::NoPromotion)
    }
}

/// Build a promotion from its spec. A missing or unrecognised spec gives [`Promotion::NoPromotion`].
///
/// # Errors
///
/// Returns a [`PromotionError`] when the promotion parameters are invalid.
pub fn resolve_promotion(spec: Option<&PromotionSpec>) -> Result<Promotion, PromotionError> {
    let promotion = match spec {
        Some(PromotionSpec::GetOneFree { nth }) => {
            Promotion::BuyNGetOneFree(BuyNGetOneFree::new(*nth)?)
        }
        Some(PromotionSpec::Package { size, percent }) => {
            Promotion::PackageDiscount(PackageDiscount::new(*size, *percent)?)
        }
        Some(PromotionSpec::Threshold { count, percent }) => {
            Promotion::ThresholdDiscount(ThresholdDiscount::new(*count, *percent)?)
        }
        Some(PromotionSpec::Unrecognized) => {
            tracing::warn!("unrecognised promotion type, product will be sold at full price");

            Promotion::NoPromotion
        }
        None => Promotion::NoPromotion,
    };

    Ok(promotion)
}
