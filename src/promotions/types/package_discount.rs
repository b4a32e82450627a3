//! Package Discount
//!
//! A percentage off every complete package of units. Leftover units pay full price.

use std::num::NonZeroU32;

use crate::{
    discounts::{DiscountError, times, whole_percent_of_minor},
    promotions::{MAX_PERCENT, PromotionError},
};

/// `percent` off each full package of `size` units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackageDiscount {
    size: NonZeroU32,
    percent: u32,
}

impl PackageDiscount {
    /// Create a package discount.
    ///
    /// # Errors
    ///
    /// - [`PromotionError::ZeroPackageSize`]: `size` is zero.
    /// - [`PromotionError::PercentTooLarge`]: `percent` is above 100.
    pub fn new(size: u32, percent: u32) -> Result<Self, PromotionError> {
        let size = NonZeroU32::new(size).ok_or(PromotionError::ZeroPackageSize)?;

        if percent > MAX_PERCENT {
            return Err(PromotionError::PercentTooLarge(percent));
        }

        Ok(Self { size, percent })
    }

    /// Units per package.
    pub fn size(&self) -> u32 {
        self.size.get()
    }

    /// Whole percent taken off packaged units.
    pub fn percent(&self) -> u32 {
        self.percent
    }

    /// Discount in minor units for `count` units at `unit_minor` each.
    ///
    /// # Errors
    ///
    /// Returns [`DiscountError::Overflow`] if the discount does not fit in minor units.
    pub fn discount_minor(&self, unit_minor: i64, count: u32) -> Result<i64, DiscountError> {
        let size = self.size.get();
        let packaged = (count / size) * size;

        whole_percent_of_minor(self.percent, times(unit_minor, packaged)?)
    }

    /// Receipt description, e.g. `"get 20% off for every 4"`.
    pub fn description(&self) -> String {
        format!("get {}% off for every {}", self.percent, self.size)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn only_full_packages_are_discounted() -> TestResult {
        let promo = PackageDiscount::new(2, 10)?;

        assert_eq!(promo.discount_minor(5_00, 5)?, 2_00);
        assert_eq!(promo.discount_minor(5_00, 1)?, 0);

        Ok(())
    }

    #[test]
    fn percentage_truncates_to_whole_cents() -> TestResult {
        let promo = PackageDiscount::new(4, 20)?;

        // 4 x 0.79 = 3.16, 20% = 0.632
        assert_eq!(promo.discount_minor(79, 4)?, 63);

        Ok(())
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        assert_eq!(
            PackageDiscount::new(0, 10),
            Err(PromotionError::ZeroPackageSize)
        );
        assert_eq!(
            PackageDiscount::new(3, 101),
            Err(PromotionError::PercentTooLarge(101))
        );
    }

    #[test]
    fn description_names_percent_and_size() -> TestResult {
        let promo = PackageDiscount::new(4, 20)?;

        assert_eq!(promo.description(), "get 20% off for every 4");
        assert_eq!(promo.size(), 4);
        assert_eq!(promo.percent(), 20);

        Ok(())
    }
}
