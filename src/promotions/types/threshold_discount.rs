//! Threshold Discount
//!
//! A percentage off every unit bought beyond a threshold count.

use crate::{
    discounts::{DiscountError, times, whole_percent_of_minor},
    promotions::{MAX_PERCENT, PromotionError},
};

/// `percent` off every unit after the first `threshold` units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdDiscount {
    threshold: u32,
    percent: u32,
}

impl ThresholdDiscount {
    /// Create a threshold discount.
    ///
    /// # Errors
    ///
    /// Returns [`PromotionError::PercentTooLarge`] if `percent` is above 100.
    pub fn new(threshold: u32, percent: u32) -> Result<Self, PromotionError> {
        if percent > MAX_PERCENT {
            return Err(PromotionError::PercentTooLarge(percent));
        }

        Ok(Self { threshold, percent })
    }

    /// Units bought at full price before the discount starts.
    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// Whole percent taken off units past the threshold.
    pub fn percent(&self) -> u32 {
        self.percent
    }

    /// Discount in minor units for `count` units at `unit_minor` each.
    ///
    /// # Errors
    ///
    /// Returns [`DiscountError::Overflow`] if the discount does not fit in minor units.
    pub fn discount_minor(&self, unit_minor: i64, count: u32) -> Result<i64, DiscountError> {
        let discounted = count.saturating_sub(self.threshold);

        whole_percent_of_minor(self.percent, times(unit_minor, discounted)?)
    }

    /// Receipt description, e.g. `"10% off of every after the 3rd"`.
    pub fn description(&self) -> String {
        format!(
            "{}% off of every after the {}{}",
            self.percent,
            self.threshold,
            ordinal_suffix(self.threshold)
        )
    }
}

/// Only 1, 2 and 3 get a special suffix; 21 prints as "21th".
fn ordinal_suffix(n: u32) -> &'static str {
    match n {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}
