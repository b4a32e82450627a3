//! Inventory
//!
//! Registry of products and coupons. Registration is append-only; carts borrow the
//! inventory, so nothing can be registered while a cart is open.

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use rusty_money::{Money, iso::Currency};
use slotmap::SlotMap;
use thiserror::Error;

use crate::{
    cart::Cart,
    coupons::{Coupon, CouponError, CouponSpec, resolve_coupon},
    money::{Amount, AmountError, minor_units},
    products::{Product, ProductKey},
    promotions::{PromotionError, PromotionSpec, resolve_promotion},
};

/// Longest product name, in characters.
pub const MAX_NAME_LEN: usize = 40;

/// Cheapest allowed unit price, in minor units.
pub const MIN_PRICE_MINOR: i64 = 1;

/// Most expensive allowed unit price, in minor units.
pub const MAX_PRICE_MINOR: i64 = 999_99;

/// Validation errors raised while registering products and coupons.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InventoryError {
    /// A product with this name is already registered.
    #[error("Bad name: {0} is already registered")]
    DuplicateName(String),

    /// Product names may not be empty.
    #[error("Bad name: product name is empty")]
    EmptyName,

    /// Product name is longer than [`MAX_NAME_LEN`] characters.
    #[error("Bad name: {0} is longer than 40 characters")]
    NameTooLong(String),

    /// Unit price outside 0.01..=999.99.
    #[error("Bad price: {0} is outside 0.01-999.99")]
    PriceOutOfRange(Decimal),

    /// Unit price with more than two decimal places.
    #[error("Bad price: {0}")]
    PricePrecision(#[from] AmountError),

    /// Promotion spec with invalid parameters.
    #[error("Bad promotion: {0}")]
    Promotion(#[from] PromotionError),

    /// Coupon spec with invalid parameters.
    #[error("Bad coupon: {0}")]
    Coupon(#[from] CouponError),
}

/// Inventory of products and coupons, priced in a single currency.
#[derive(Debug)]
pub struct Inventory<'a> {
    currency: &'a Currency,

    /// Append-only, so slot order is registration order
    products: SlotMap<ProductKey, Product<'a>>,
    names: FxHashMap<String, ProductKey>,

    coupons: Vec<Coupon<'a>>,
    nil_coupon: Coupon<'a>,
}

impl<'a> Inventory<'a> {
    /// Create an empty inventory priced in `currency`.
    pub fn new(currency: &'a Currency) -> Self {
        Self {
            currency,
            products: SlotMap::with_key(),
            names: FxHashMap::default(),
            coupons: Vec::new(),
            nil_coupon: Coupon::nil(),
        }
    }

    /// Register a product.
    ///
    /// On error the inventory is left untouched.
    ///
    /// # Errors
    ///
    /// - [`InventoryError::DuplicateName`], [`InventoryError::EmptyName`],
    ///   [`InventoryError::NameTooLong`]: the name is unusable.
    /// - [`InventoryError::PriceOutOfRange`], [`InventoryError::PricePrecision`]: the price is
    ///   not a whole number of cents between 0.01 and 999.99.
    /// - [`InventoryError::Promotion`]: the promotion spec is invalid.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        price: Decimal,
        promotion: Option<&PromotionSpec>,
    ) -> Result<ProductKey, InventoryError> {
        let name = name.into();

        self.verify_name(&name)?;
        let price_minor = verify_price(price)?;
        let promotion = resolve_promotion(promotion)?;

        tracing::debug!(
            product = %name,
            price = %Amount(price_minor),
            promotion = %promotion.description(),
            "registered product"
        );

        let product = Product::new(
            name.clone(),
            Money::from_minor(price_minor, self.currency),
            promotion,
        );
        let key = self.products.insert(product);
        self.names.insert(name, key);

        Ok(key)
    }

    fn verify_name(&self, name: &str) -> Result<(), InventoryError> {
        if self.names.contains_key(name) {
            Err(InventoryError::DuplicateName(name.to_string()))
        } else if name.is_empty() {
            Err(InventoryError::EmptyName)
        } else if name.chars().count() > MAX_NAME_LEN {
            Err(InventoryError::NameTooLong(name.to_string()))
        } else {
            Ok(())
        }
    }

    /// Register a coupon. Names need not be unique; lookups return the first match.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::Coupon`] when the coupon amount or percent is invalid.
    pub fn register_coupon(
        &mut self,
        name: impl Into<String>,
        spec: &CouponSpec,
    ) -> Result<(), InventoryError> {
        let name = name.into();
        let coupon = resolve_coupon(&name, spec, self.currency)?;

        tracing::debug!(coupon = %name, display = %coupon.display(), "registered coupon");

        self.coupons.push(coupon);

        Ok(())
    }

    /// Look up a product by name.
    pub fn lookup(&self, name: &str) -> Option<&Product<'a>> {
        self.key(name).and_then(|key| self.products.get(key))
    }

    /// Look up a product's key by name.
    pub fn key(&self, name: &str) -> Option<ProductKey> {
        self.names.get(name).copied()
    }

    /// Get a product by key.
    pub fn product(&self, key: ProductKey) -> Option<&Product<'a>> {
        self.products.get(key)
    }

    /// Iterate over products in registration order.
    pub fn products(&self) -> impl Iterator<Item = &Product<'a>> {
        self.products.values()
    }

    /// First coupon registered under `name`, or the nil coupon. Never fails.
    pub fn coupon(&self, name: &str) -> &Coupon<'a> {
        self.coupons
            .iter()
            .find(|coupon| coupon.name() == name)
            .unwrap_or_else(|| {
                tracing::debug!(coupon = name, "unknown coupon, falling back to nil coupon");

                &self.nil_coupon
            })
    }

    /// The neutral coupon carts start with.
    pub fn nil_coupon(&self) -> &Coupon<'a> {
        &self.nil_coupon
    }

    /// Iterate over coupons in registration order.
    pub fn coupons(&self) -> impl Iterator<Item = &Coupon<'a>> {
        self.coupons.iter()
    }

    /// Open a new, empty cart bound to this inventory.
    pub fn new_cart(&self) -> Cart<'_> {
        Cart::new(self)
    }

    /// Currency used for all prices.
    pub fn currency(&self) -> &'a Currency {
        self.currency
    }

    /// Number of registered products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether no products are registered.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

fn verify_price(price: Decimal) -> Result<i64, InventoryError> {
    let minor = minor_units(price)?;

    if (MIN_PRICE_MINOR..=MAX_PRICE_MINOR).contains(&minor) {
        Ok(minor)
    } else {
        Err(InventoryError::PriceOutOfRange(price))
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::USD;
    use testresult::TestResult;

    use super::*;

    fn price(value: &str) -> Result<Decimal, rust_decimal::Error> {
        value.parse()
    }

    #[test]
    fn register_and_lookup() -> TestResult {
        let mut inventory = Inventory::new(USD);
        let key = inventory.register(
            "Green Tea",
            price("0.79")?,
            Some(&PromotionSpec::GetOneFree { nth: 3 }),
        )?;

        let product = inventory.lookup("Green Tea").ok_or("missing product")?;

        assert_eq!(product.price(), &Money::from_minor(79, USD));
        assert_eq!(product.discount_description(), "buy 2, get 1 free");
        assert_eq!(inventory.product(key), Some(product));
        assert_eq!(inventory.key("Green Tea"), Some(key));
        assert!(inventory.lookup("Black Tea").is_none());

        Ok(())
    }

    #[test]
    fn duplicate_name_is_rejected_and_inventory_unchanged() -> TestResult {
        let mut inventory = Inventory::new(USD);
        inventory.register("Green Tea", price("0.79")?, None)?;

        let result = inventory.register("Green Tea", price("1.99")?, None);

        assert_eq!(
            result,
            Err(InventoryError::DuplicateName("Green Tea".to_string()))
        );
        assert_eq!(inventory.len(), 1);
        assert_eq!(
            inventory.lookup("Green Tea").map(Product::price),
            Some(&Money::from_minor(79, USD))
        );

        Ok(())
    }

    #[test]
    fn name_length_is_bounded() -> TestResult {
        let mut inventory = Inventory::new(USD);
        let forty = "x".repeat(MAX_NAME_LEN);
        let forty_one = "x".repeat(MAX_NAME_LEN + 1);

        inventory.register(forty, price("1.00")?, None)?;

        assert_eq!(
            inventory.register(forty_one.clone(), price("1.00")?, None),
            Err(InventoryError::NameTooLong(forty_one))
        );
        assert_eq!(
            inventory.register("", price("1.00")?, None),
            Err(InventoryError::EmptyName)
        );

        Ok(())
    }

    #[test]
    fn name_length_counts_characters() -> TestResult {
        let mut inventory = Inventory::new(USD);

        // 40 characters, 80 bytes
        inventory.register("é".repeat(MAX_NAME_LEN), price("1.00")?, None)?;

        Ok(())
    }

    #[test]
    fn price_range_is_enforced() -> TestResult {
        let mut inventory = Inventory::new(USD);

        inventory.register("Cheapest", price("0.01")?, None)?;
        inventory.register("Dearest", price("999.99")?, None)?;

        for bad in ["0.00", "-1.00", "1000.00"] {
            assert_eq!(
                inventory.register(bad, price(bad)?, None),
                Err(InventoryError::PriceOutOfRange(price(bad)?))
            );
        }

        assert_eq!(inventory.len(), 2);

        Ok(())
    }

    #[test]
    fn sub_cent_price_is_rejected() -> TestResult {
        let mut inventory = Inventory::new(USD);

        let result = inventory.register("Saffron", price("1.005")?, None);

        assert!(matches!(result, Err(InventoryError::PricePrecision(_))));
        assert!(inventory.is_empty());

        Ok(())
    }

    #[test]
    fn invalid_promotion_is_rejected() -> TestResult {
        let mut inventory = Inventory::new(USD);

        let result = inventory.register(
            "Oolong",
            price("3.00")?,
            Some(&PromotionSpec::Package {
                size: 0,
                percent: 10,
            }),
        );

        assert_eq!(
            result,
            Err(InventoryError::Promotion(PromotionError::ZeroPackageSize))
        );
        assert!(inventory.lookup("Oolong").is_none());

        Ok(())
    }

    #[test]
    fn products_iterate_in_registration_order() -> TestResult {
        let mut inventory = Inventory::new(USD);

        for name in ["Sencha", "Assam", "Matcha"] {
            inventory.register(name, price("1.00")?, None)?;
        }

        let names: Vec<&str> = inventory.products().map(Product::name).collect();

        assert_eq!(names, vec!["Sencha", "Assam", "Matcha"]);

        Ok(())
    }

    #[test]
    fn unknown_coupon_falls_back_to_nil() {
        let inventory = Inventory::new(USD);

        let coupon = inventory.coupon("NOPE");

        assert!(coupon.is_nil());
        assert_eq!(coupon, inventory.nil_coupon());
    }

    #[test]
    fn duplicate_coupon_names_first_registered_wins() -> TestResult {
        let mut inventory = Inventory::new(USD);
        inventory.register_coupon(
            "SAVE",
            &CouponSpec::Percent {
                percent: price("10")?,
            },
        )?;
        inventory.register_coupon(
            "SAVE",
            &CouponSpec::Amount {
                amount: price("5.00")?,
            },
        )?;

        assert_eq!(inventory.coupon("SAVE").display(), "Coupon SAVE - 10% off");
        assert_eq!(inventory.coupons().count(), 2);

        Ok(())
    }

    #[test]
    fn invalid_coupon_is_rejected() -> TestResult {
        let mut inventory = Inventory::new(USD);

        let result = inventory.register_coupon(
            "HUGE",
            &CouponSpec::Percent {
                percent: price("150")?,
            },
        );

        assert!(matches!(
            result,
            Err(InventoryError::Coupon(CouponError::PercentOutOfRange(_)))
        ));
        assert_eq!(inventory.coupons().count(), 0);

        Ok(())
    }
}
