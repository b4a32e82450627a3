//! Products

use rusty_money::{Money, iso::Currency};
use slotmap::new_key_type;

use crate::{
    discounts::{DiscountError, times},
    money,
    promotions::Promotion,
};

new_key_type! {
    /// Product Key
    pub struct ProductKey;
}

/// Catalog entry. Created by [`crate::inventory::Inventory::register`] and immutable after.
#[derive(Debug, Clone, PartialEq)]
pub struct Product<'a> {
    name: String,
    price: Money<'a, Currency>,
    promotion: Promotion,
}

impl<'a> Product<'a> {
    pub(crate) fn new(name: String, price: Money<'a, Currency>, promotion: Promotion) -> Self {
        Self {
            name,
            price,
            promotion,
        }
    }

    /// Product name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unit price
    pub fn price(&self) -> &Money<'a, Currency> {
        &self.price
    }

    /// Promotion applied to every line of this product
    pub fn promotion(&self) -> &Promotion {
        &self.promotion
    }

    /// Undiscounted price of `count` units.
    ///
    /// # Errors
    ///
    /// Returns [`DiscountError::Overflow`] if the price does not fit in minor units.
    pub fn line_price(&self, count: u32) -> Result<Money<'a, Currency>, DiscountError> {
        let minor = times(self.price.to_minor_units(), count)?;

        Ok(Money::from_minor(minor, self.price.currency()))
    }

    /// Promotion discount on `count` units.
    ///
    /// # Errors
    ///
    /// Returns [`DiscountError::Overflow`] if the discount does not fit in minor units.
    pub fn discount(&self, count: u32) -> Result<Money<'a, Currency>, DiscountError> {
        self.promotion.discount(&self.price, count)
    }

    /// Price of `count` units after the promotion. Never below zero.
    ///
    /// # Errors
    ///
    /// Returns [`DiscountError::Overflow`] if the price does not fit in minor units.
    pub fn discounted_price(&self, count: u32) -> Result<Money<'a, Currency>, DiscountError> {
        let currency = self.price.currency();
        let full = self.line_price(count)?.to_minor_units();
        let discount = self.discount(count)?.to_minor_units();

        let minor = full.checked_sub(discount).ok_or(DiscountError::Overflow)?;

        Ok(money::max(
            Money::from_minor(minor, currency),
            Money::from_minor(0, currency),
        ))
    }

    /// Description of the promotion, empty when there is none.
    pub fn discount_description(&self) -> String {
        self.promotion.description()
    }
}
