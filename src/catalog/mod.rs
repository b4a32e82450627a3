//! Catalog
//!
//! YAML description of an inventory: currency, products with their promotions, and coupons.
//!
//! ```yaml
//! currency: USD
//! products:
//!   - name: Green Tea
//!     price: "0.79"
//!     promotion: { type: get_one_free, nth: 3 }
//! coupons:
//!   - name: TEATIME
//!     type: percent
//!     percent: "20"
//! ```

use std::{fs, path::Path};

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use crate::{
    coupons::CouponSpec,
    inventory::{Inventory, InventoryError},
    money::currency_from_code,
    promotions::PromotionSpec,
};

pub mod listing;

/// Catalog loading errors
#[derive(Debug, Error)]
pub enum CatalogError {
    /// IO error reading the catalog file
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// A product or coupon failed validation
    #[error("Invalid catalog entry {entry}: {source}")]
    Inventory {
        /// Name of the offending product or coupon
        entry: String,

        /// Validation failure
        source: InventoryError,
    },
}

/// Whole catalog file
#[derive(Debug, Deserialize)]
pub struct CatalogFixture {
    /// ISO currency code for every price
    pub currency: String,

    /// Products, in registration order
    #[serde(default)]
    pub products: Vec<ProductFixture>,

    /// Coupons, in registration order
    #[serde(default)]
    pub coupons: Vec<CouponFixture>,
}

/// Product entry
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Product name
    pub name: String,

    /// Unit price (e.g. `"2.99"`)
    pub price: Decimal,

    /// Optional promotion
    #[serde(default)]
    pub promotion: Option<PromotionSpec>,
}

/// Coupon entry
#[derive(Debug, Deserialize)]
pub struct CouponFixture {
    /// Coupon name
    pub name: String,

    /// Coupon type and value
    #[serde(flatten)]
    pub spec: CouponSpec,
}

impl CatalogFixture {
    /// Parse a catalog from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Yaml`] if the text is not a valid catalog.
    pub fn from_yaml(yaml: &str) -> Result<Self, CatalogError> {
        Ok(serde_norway::from_str(yaml)?)
    }

    /// Build an inventory from the catalog, registering entries in file order.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::UnknownCurrency`]: the currency code is not supported.
    /// - [`CatalogError::Inventory`]: a product or coupon failed validation.
    pub fn into_inventory(self) -> Result<Inventory<'static>, CatalogError> {
        let currency = currency_from_code(&self.currency)
            .ok_or_else(|| CatalogError::UnknownCurrency(self.currency.clone()))?;

        let mut inventory = Inventory::new(currency);

        for product in self.products {
            inventory
                .register(product.name.clone(), product.price, product.promotion.as_ref())
                .map_err(|source| CatalogError::Inventory {
                    entry: product.name,
                    source,
                })?;
        }

        for coupon in self.coupons {
            inventory
                .register_coupon(coupon.name.clone(), &coupon.spec)
                .map_err(|source| CatalogError::Inventory {
                    entry: coupon.name,
                    source,
                })?;
        }

        tracing::debug!(
            products = inventory.len(),
            coupons = inventory.coupons().count(),
            "loaded catalog"
        );

        Ok(inventory)
    }
}

/// Parse YAML text and build an inventory from it.
///
/// # Errors
///
/// See [`CatalogFixture::from_yaml`] and [`CatalogFixture::into_inventory`].
pub fn inventory_from_yaml(yaml: &str) -> Result<Inventory<'static>, CatalogError> {
    CatalogFixture::from_yaml(yaml)?.into_inventory()
}

/// Read a catalog file and build an inventory from it.
///
/// # Errors
///
/// Returns [`CatalogError::Io`] if the file cannot be read, otherwise see
/// [`inventory_from_yaml`].
pub fn load_inventory(path: impl AsRef<Path>) -> Result<Inventory<'static>, CatalogError> {
    let contents = fs::read_to_string(path)?;

    inventory_from_yaml(&contents)
}
