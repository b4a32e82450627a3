//! Promotion Types

mod buy_n_get_one_free;
mod package_discount;
mod threshold_discount;

pub use buy_n_get_one_free::*;
pub use package_discount::*;
pub use threshold_discount::*;
