//! Till
//!
//! Till is a small retail pricing engine: products with per-line promotions, a single
//! cart-level coupon, exact two-decimal money arithmetic and a fixed-width text invoice.

pub mod cart;
pub mod catalog;
pub mod coupons;
pub mod discounts;
pub mod inventory;
pub mod invoice;
pub mod money;
pub mod prelude;
pub mod products;
pub mod promotions;
