// 🧹 Cleaning Rules - One pure transform per source table
// Each rule takes ownership of the raw table and returns the cleaned one

use crate::table::{Table, TableSet};
use anyhow::Result;

/// The fixed nine-column layout of the cleaned products table.
pub const PRODUCT_COLUMNS: [&str; 9] = [
    "product_id",
    "product_category_name",
    "product_name_length",
    "product_description_length",
    "product_photos_qty",
    "product_weight_g",
    "product_length_cm",
    "product_height_cm",
    "product_width_cm",
];

/// Category rows without a translation get this placeholder.
pub const UNKNOWN_CATEGORY: &str = "unknown";

/// Columns holding dates are recognized by name.
fn is_datetime_column(name: &str) -> bool {
    name.contains("timestamp") || name.contains("date") || name.ends_with("_at")
}

/// Normalize column names and keep the zip prefix textual so leading-zero
/// codes survive (01310 must not become 1310).
pub fn clean_customers(mut table: Table) -> Result<Table> {
    table.normalize_column_names();
    table.cast_to_text("customer_zip_code_prefix")?;
    println!("✓ Cleaned 'customers' table");
    Ok(table)
}

/// Normalize column names and parse every date-like column to timestamps.
/// Unparseable cells become null instead of failing the run.
pub fn clean_orders(mut table: Table) -> Result<Table> {
    table.normalize_column_names();

    let datetime_columns: Vec<String> = table
        .column_names()
        .iter()
        .filter(|name| is_datetime_column(name))
        .map(|name| name.to_string())
        .collect();

    for column in &datetime_columns {
        table.parse_timestamps(column)?;
    }

    println!("✓ Cleaned 'orders' table");
    Ok(table)
}

/// Normalize column names and parse the shipping deadline, with the same
/// null coercion for bad values.
pub fn clean_order_items(mut table: Table) -> Result<Table> {
    table.normalize_column_names();
    table.parse_timestamps("shipping_limit_date")?;
    println!("✓ Cleaned 'order_items' table");
    Ok(table)
}

/// Full products transform: merge in the English category names, fix the
/// misspelled length columns, fill untranslated categories with "unknown",
/// and settle on the fixed nine-column layout.
///
/// A missing merge key on either side is a hard failure; the caller sees it.
pub fn clean_products(mut products: Table, mut translations: Table) -> Result<Table> {
    products.normalize_column_names();
    translations.normalize_column_names();

    let mut merged = products.left_join(&translations, "product_category_name")?;
    merged.drop_column("product_category_name")?;
    merged.rename_columns(&[
        ("product_category_name_english", "product_category_name"),
        ("product_name_lenght", "product_name_length"),
        ("product_description_lenght", "product_description_length"),
    ]);
    merged.fill_null_text("product_category_name", UNKNOWN_CATEGORY);

    let cleaned = merged.select(&PRODUCT_COLUMNS)?;
    println!("✓ Cleaned 'products' table");
    Ok(cleaned)
}

/// Validation-path merge: substitute English category names into the
/// products table when both halves were loaded, otherwise warn and skip.
/// Unlike `clean_products`, this leaves the misspelled columns alone.
pub fn merge_category_translations(tables: &mut TableSet) -> Result<()> {
    if !tables.contains_key("products") || !tables.contains_key("product_category") {
        println!("⚠ 'products' or 'product_category' table not loaded, skipping merge");
        return Ok(());
    }

    let translations = tables.remove("product_category").unwrap();
    let products = tables.remove("products").unwrap();

    let mut merged = products.left_join(&translations, "product_category_name")?;
    merged.drop_column("product_category_name")?;
    merged.rename_columns(&[("product_category_name_english", "product_category_name")]);

    tables.insert("products".to_string(), merged);
    println!("✓ Merged category translations into 'products'");
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
