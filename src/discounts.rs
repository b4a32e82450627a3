//! Discounts
//!
//! Shared arithmetic for promotions and coupons. Everything works on minor units.

use decimal_percentage::Percentage;
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use thiserror::Error;

/// Errors specific to discount calculations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DiscountError {
    /// Minor unit arithmetic overflowed.
    #[error("discount arithmetic overflowed")]
    Overflow,

    /// Percentage calculation could not be safely converted.
    #[error("percentage conversion overflowed or was not finite")]
    PercentConversion,
}

/// Multiply a minor unit amount by a quantity.
///
/// # Errors
///
/// Returns [`DiscountError::Overflow`] if the product does not fit.
pub fn times(minor: i64, count: u32) -> Result<i64, DiscountError> {
    minor
        .checked_mul(i64::from(count))
        .ok_or(DiscountError::Overflow)
}

/// Take a whole-number percentage of a minor unit amount, truncating toward zero.
///
/// `whole_percent_of_minor(15, 333)` is `49` (49.95 truncated), exactly what integer
/// division produces.
///
/// # Errors
///
/// Returns [`DiscountError::Overflow`] if the intermediate product does not fit.
pub fn whole_percent_of_minor(percent: u32, minor: i64) -> Result<i64, DiscountError> {
    Ok(times(minor, percent)? / 100)
}

/// Take a fractional [`Percentage`] of a minor unit amount, rounding half away from zero.
///
/// # Errors
///
/// Returns [`DiscountError::PercentConversion`] if the calculation overflows or cannot be
/// represented in minor units.
pub fn percent_of_minor(percent: &Percentage, minor: i64) -> Result<i64, DiscountError> {
    // decimal_percentage does not expose the inner Decimal
    ((*percent) * Decimal::ONE)
        .checked_mul(Decimal::from(minor))
        .ok_or(DiscountError::PercentConversion)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(DiscountError::PercentConversion)
}

#[cfg(test)]
mod tests {
    use decimal_percentage::Percentage;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn times_multiplies_minor_units() -> TestResult {
        assert_eq!(times(10_00, 6)?, 60_00);
        assert_eq!(times(10_00, 0)?, 0);

        Ok(())
    }

    #[test]
    fn times_reports_overflow() {
        assert_eq!(times(i64::MAX, 2), Err(DiscountError::Overflow));
    }

    #[test]
    fn whole_percent_truncates_toward_zero() -> TestResult {
        assert_eq!(whole_percent_of_minor(10, 10_00)?, 1_00);
        assert_eq!(whole_percent_of_minor(15, 333)?, 49);
        assert_eq!(whole_percent_of_minor(50, 1)?, 0);
        assert_eq!(whole_percent_of_minor(0, 12_00)?, 0);

        Ok(())
    }

    #[test]
    fn percent_of_minor_rounds_half_away_from_zero() -> TestResult {
        assert_eq!(percent_of_minor(&Percentage::from(0.25), 2_00)?, 50);
        assert_eq!(percent_of_minor(&Percentage::from(0.5), 3)?, 2);
        assert_eq!(percent_of_minor(&Percentage::from(0.1), 4)?, 0);

        Ok(())
    }

    #[test]
    fn percent_of_minor_decimal_input_is_exact() -> TestResult {
        let fraction: Decimal = "0.125".parse()?;

        assert_eq!(percent_of_minor(&Percentage::from(fraction), 80_00)?, 10_00);

        Ok(())
    }
}
