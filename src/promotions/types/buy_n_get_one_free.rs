//! Buy N Get One Free
//!
//! Every n-th unit on a line is free.

use std::num::NonZeroU32;

use crate::{
    discounts::{DiscountError, times},
    promotions::PromotionError,
};

/// Every `nth` unit of the product costs nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuyNGetOneFree {
    nth: NonZeroU32,
}

impl BuyNGetOneFree {
    /// Create a promotion giving away every `nth` unit.
    ///
    /// # Errors
    ///
    /// Returns [`PromotionError::ZeroNth`] when `nth` is zero.
    pub fn new(nth: u32) -> Result<Self, PromotionError> {
        let nth = NonZeroU32::new(nth).ok_or(PromotionError::ZeroNth)?;

        Ok(Self { nth })
    }

    /// Which unit is free (3 means "buy 2, get the 3rd free").
    pub fn nth(&self) -> u32 {
        self.nth.get()
    }

    /// Discount in minor units for `count` units at `unit_minor` each.
    ///
    /// # Errors
    ///
    /// Returns [`DiscountError::Overflow`] if the discount does not fit in minor units.
    pub fn discount_minor(&self, unit_minor: i64, count: u32) -> Result<i64, DiscountError> {
        times(unit_minor, count / self.nth.get())
    }

    /// Receipt description, e.g. `"buy 2, get 1 free"`.
    pub fn description(&self) -> String {
        format!("buy {}, get 1 free", self.nth.get() - 1)
    }
}
