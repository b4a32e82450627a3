//! Integration tests for loading catalogs from disk.

use std::io::Write;

use rusty_money::iso::USD;
use tempfile::NamedTempFile;
use testresult::TestResult;

use till::{
    catalog::{CatalogError, listing::products_table, load_inventory},
    inventory::InventoryError,
};

const TEA_SHOP: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures/catalogs/tea-shop.yml");

#[test]
fn test_tea_shop_fixture_loads() -> TestResult {
    let inventory = load_inventory(TEA_SHOP)?;

    assert_eq!(inventory.currency(), USD);

    let names: Vec<&str> = inventory.products().map(|product| product.name()).collect();
    assert_eq!(
        names,
        ["Green Tea", "Earl Grey", "Rooibos", "Black Coffee", "Red Tea"]
    );

    let coupons: Vec<String> = inventory.coupons().map(|coupon| coupon.display()).collect();
    assert_eq!(
        coupons,
        ["Coupon TEATIME - 20% off", "Coupon FIVER - 5.00 off"]
    );

    let table = products_table(&inventory);
    assert!(table.contains("10% off of every after the 10th"));

    Ok(())
}

#[test]
fn test_catalog_from_temp_file() -> TestResult {
    let mut file = NamedTempFile::new()?;
    writeln!(
        file,
        "currency: USD\nproducts:\n  - name: Matcha\n    price: \"12.00\"\n    promotion: {{ type: threshold, count: 3, percent: 30 }}\n"
    )?;

    let inventory = load_inventory(file.path())?;
    let mut cart = inventory.new_cart();
    cart.add("Matcha", 4)?;

    assert_eq!(cart.total()?.to_minor_units(), 44_40);

    Ok(())
}

#[test]
fn test_missing_file_is_an_io_error() {
    let result = load_inventory(concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures/catalogs/missing.yml"));

    assert!(matches!(result, Err(CatalogError::Io(_))));
}

#[test]
fn test_duplicate_product_is_rejected() -> TestResult {
    let mut file = NamedTempFile::new()?;
    writeln!(
        file,
        "currency: USD\nproducts:\n  - name: Matcha\n    price: \"12.00\"\n  - name: Matcha\n    price: \"13.00\"\n"
    )?;

    let result = load_inventory(file.path());

    assert!(matches!(
        result,
        Err(CatalogError::Inventory {
            entry,
            source: InventoryError::DuplicateName(_),
        }) if entry == "Matcha"
    ));

    Ok(())
}

#[test]
fn test_sub_cent_price_is_rejected() -> TestResult {
    let mut file = NamedTempFile::new()?;
    writeln!(
        file,
        "currency: USD\nproducts:\n  - name: Saffron\n    price: \"9.999\"\n"
    )?;

    let result = load_inventory(file.path());

    assert!(matches!(
        result,
        Err(CatalogError::Inventory {
            source: InventoryError::PricePrecision(_),
            ..
        })
    ));

    Ok(())
}
