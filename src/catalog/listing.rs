//! Catalog listing
//!
//! Human readable tables of what an inventory sells.

use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};

use crate::{inventory::Inventory, money::Amount};

/// Table of products in registration order: name, unit price and promotion.
pub fn products_table(inventory: &Inventory<'_>) -> String {
    let mut builder = Builder::default();

    builder.push_record(["Name", "Price", "Promotion"]);

    for product in inventory.products() {
        builder.push_record([
            product.name().to_string(),
            Amount::from(product.price()).to_string(),
            product.discount_description(),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::modern_rounded());
    table.modify(Columns::new(1..2), Alignment::right());

    table.to_string()
}

/// Table of coupons in registration order, as they appear on invoices.
pub fn coupons_table(inventory: &Inventory<'_>) -> String {
    let mut builder = Builder::default();

    builder.push_record(["Name", "Coupon"]);

    for coupon in inventory.coupons() {
        builder.push_record([coupon.name().to_string(), coupon.display()]);
    }

    let mut table = builder.build();
    table.with(Style::modern_rounded());

    table.to_string()
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::USD;
    use testresult::TestResult;

    use crate::{coupons::CouponSpec, promotions::PromotionSpec};

    use super::*;

    #[test]
    fn products_table_lists_every_product() -> TestResult {
        let mut inventory = Inventory::new(USD);
        inventory.register(
            "Earl Grey",
            "1.99".parse()?,
            Some(&PromotionSpec::Package {
                size: 4,
                percent: 20,
            }),
        )?;
        inventory.register("Honey", "4.20".parse()?, None)?;

        let table = products_table(&inventory);

        assert!(table.contains("Earl Grey"));
        assert!(table.contains("1.99"));
        assert!(table.contains("get 20% off for every 4"));
        assert!(table.contains("Honey"));
        assert!(table.contains("4.20"));

        let earl = table.find("Earl Grey").ok_or("missing Earl Grey")?;
        let honey = table.find("Honey").ok_or("missing Honey")?;
        assert!(earl < honey);

        Ok(())
    }

    #[test]
    fn coupons_table_uses_invoice_text() -> TestResult {
        let mut inventory = Inventory::new(USD);
        inventory.register_coupon(
            "FIVER",
            &CouponSpec::Amount {
                amount: "5".parse()?,
            },
        )?;

        let table = coupons_table(&inventory);

        assert!(table.contains("FIVER"));
        assert!(table.contains("Coupon FIVER - 5.00 off"));

        Ok(())
    }
}
