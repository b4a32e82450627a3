//! Till prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartError, MAX_QUANTITY},
    catalog::{CatalogError, CatalogFixture, inventory_from_yaml, load_inventory},
    coupons::{Coupon, CouponError, CouponKind, CouponSpec, resolve_coupon},
    discounts::DiscountError,
    inventory::{Inventory, InventoryError},
    invoice::InvoiceError,
    money::Amount,
    products::{Product, ProductKey},
    promotions::{
        Promotion, PromotionError, PromotionSpec, resolve_promotion,
        types::{BuyNGetOneFree, PackageDiscount, ThresholdDiscount},
    },
};
