//! Cart
//!
//! Per-session quantities keyed by product, plus the active coupon.

use rustc_hash::FxHashMap;
use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    coupons::Coupon,
    discounts::DiscountError,
    inventory::Inventory,
    invoice::{self, InvoiceError},
    products::{Product, ProductKey},
};

/// Most units of a single product one cart may hold.
pub const MAX_QUANTITY: u32 = 99;

/// Errors raised while filling a cart.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// No product with this name is registered.
    #[error("Bad name: {0}")]
    ProductNotFound(String),

    /// Adding `requested` units to `current` would leave 1..=99 units.
    #[error("Number invalid: cannot add {requested} {product} to {current}")]
    InvalidQuantity {
        /// Product name
        product: String,

        /// Units already in the cart
        current: u32,

        /// Units asked for
        requested: u32,
    },
}

impl CartError {
    /// Whether the error is a validation failure (as opposed to a missing product).
    pub fn is_validation(&self) -> bool {
        matches!(self, CartError::InvalidQuantity { .. })
    }

    /// Whether the error is a missing product.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CartError::ProductNotFound(_))
    }
}

/// One product's accumulated quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CartLine {
    product: ProductKey,
    quantity: u32,
}

/// A shopping cart bound to the inventory that opened it.
#[derive(Debug)]
pub struct Cart<'a> {
    inventory: &'a Inventory<'a>,

    /// Lines in first-add order
    lines: SmallVec<[CartLine; 8]>,

    /// Product key -> index into `lines`
    index: FxHashMap<ProductKey, usize>,

    coupon: &'a Coupon<'a>,
}

impl<'a> Cart<'a> {
    /// Create an empty cart using the inventory's nil coupon.
    pub fn new(inventory: &'a Inventory<'a>) -> Self {
        Self {
            inventory,
            lines: SmallVec::new(),
            index: FxHashMap::default(),
            coupon: inventory.nil_coupon(),
        }
    }

    /// Add `count` units of the product called `name`.
    ///
    /// Repeated adds accumulate into a single line. On error the cart is left untouched.
    ///
    /// # Errors
    ///
    /// - [`CartError::ProductNotFound`]: no such product in the inventory.
    /// - [`CartError::InvalidQuantity`]: `count` is zero or the line would exceed
    ///   [`MAX_QUANTITY`].
    pub fn add(&mut self, name: &str, count: u32) -> Result<(), CartError> {
        let key = self
            .inventory
            .key(name)
            .ok_or_else(|| CartError::ProductNotFound(name.to_string()))?;

        let slot = self.index.get(&key).copied();
        let current = slot
            .and_then(|idx| self.lines.get(idx))
            .map_or(0, |line| line.quantity);

        let quantity = current
            .checked_add(count)
            .filter(|&quantity| count > 0 && quantity <= MAX_QUANTITY)
            .ok_or_else(|| CartError::InvalidQuantity {
                product: name.to_string(),
                current,
                requested: count,
            })?;

        match slot {
            Some(idx) => {
                if let Some(line) = self.lines.get_mut(idx) {
                    line.quantity = quantity;
                }
            }
            None => {
                self.index.insert(key, self.lines.len());
                self.lines.push(CartLine {
                    product: key,
                    quantity,
                });
            }
        }

        tracing::debug!(product = name, quantity, "added to cart");

        Ok(())
    }

    /// Add a single unit of the product called `name`.
    ///
    /// # Errors
    ///
    /// See [`Cart::add`].
    pub fn add_one(&mut self, name: &str) -> Result<(), CartError> {
        self.add(name, 1)
    }

    /// Activate the coupon called `name`. Unknown names activate the nil coupon.
    pub fn use_coupon(&mut self, name: &str) {
        self.coupon = self.inventory.coupon(name);

        tracing::debug!(coupon = name, nil = self.coupon.is_nil(), "using coupon");
    }

    /// Sum of every line's price after promotions.
    ///
    /// # Errors
    ///
    /// Returns a [`DiscountError`] if a line cannot be priced.
    pub fn items_price(&self) -> Result<Money<'a, Currency>, DiscountError> {
        let minor = self.lines().try_fold(0_i64, |acc, (product, quantity)| {
            let price = product.discounted_price(quantity)?.to_minor_units();

            acc.checked_add(price).ok_or(DiscountError::Overflow)
        })?;

        Ok(Money::from_minor(minor, self.inventory.currency()))
    }

    /// Discount given by the active coupon on [`Cart::items_price`].
    ///
    /// # Errors
    ///
    /// Returns a [`DiscountError`] if the discount cannot be calculated.
    pub fn coupon_discount(&self) -> Result<Money<'a, Currency>, DiscountError> {
        self.coupon.discount(self.items_price()?)
    }

    /// Amount to pay: items price minus coupon discount.
    ///
    /// # Errors
    ///
    /// Returns a [`DiscountError`] if either component cannot be calculated.
    pub fn total(&self) -> Result<Money<'a, Currency>, DiscountError> {
        let items = self.items_price()?.to_minor_units();
        let coupon = self.coupon_discount()?.to_minor_units();

        let minor = items.checked_sub(coupon).ok_or(DiscountError::Overflow)?;

        Ok(Money::from_minor(minor, self.inventory.currency()))
    }

    /// Render the invoice for the cart's current state.
    ///
    /// # Errors
    ///
    /// Returns an [`InvoiceError`] if any amount cannot be calculated.
    pub fn invoice(&self) -> Result<String, InvoiceError> {
        invoice::render(self)
    }

    /// Products and quantities in first-add order.
    pub fn lines(&self) -> impl Iterator<Item = (&'a Product<'a>, u32)> + '_ {
        let inventory = self.inventory;

        self.lines.iter().filter_map(move |line| {
            inventory
                .product(line.product)
                .map(|product| (product, line.quantity))
        })
    }

    /// Units of the product called `name`; zero if absent.
    pub fn quantity(&self, name: &str) -> u32 {
        self.inventory
            .key(name)
            .and_then(|key| self.index.get(&key))
            .and_then(|&idx| self.lines.get(idx))
            .map_or(0, |line| line.quantity)
    }

    /// The active coupon.
    pub fn coupon(&self) -> &'a Coupon<'a> {
        self.coupon
    }

    /// The inventory this cart draws from.
    pub fn inventory(&self) -> &'a Inventory<'a> {
        self.inventory
    }

    /// Number of distinct products in the cart.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
