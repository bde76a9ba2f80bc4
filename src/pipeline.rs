// ⚙️ Pipeline Orchestration - Two fixed, non-branching sequences
// Transform-and-load is strict about inputs; validate-only is tolerant

use crate::cleaning::{
    clean_customers, clean_order_items, clean_orders, clean_products,
    merge_category_translations,
};
use crate::loader::{load_tables, read_table, TABLE_MAPPING};
use crate::schema::column_requirements;
use crate::sink::{self, SinkConfig};
use crate::validation::{
    check_data_sanity, check_data_types, check_duplicates, check_missing_values,
    render_duplicate_report, render_missing_report, render_sanity_report, render_type_report,
};
use anyhow::Result;
use std::path::Path;

/// Extract all five raw tables (any missing file aborts the run), apply the
/// four cleaning rules, and write each cleaned table to the sink.
pub fn run_etl(data_dir: &Path) -> Result<()> {
    println!(">>> Step 1. Extracting raw data from '{}'", data_dir.display());
    let customers_raw = read_table(&data_dir.join("customers.csv"), "customers")?;
    let orders_raw = read_table(&data_dir.join("orders.csv"), "orders")?;
    let order_items_raw = read_table(&data_dir.join("order_items.csv"), "order_items")?;
    let products_raw = read_table(&data_dir.join("products.csv"), "products")?;
    let translations_raw =
        read_table(&data_dir.join("product_category.csv"), "product_category")?;
    println!("✓ Raw data extracted");

    println!("\n>>> Step 2. Transforming");
    let customers = clean_customers(customers_raw)?;
    let orders = clean_orders(orders_raw)?;
    let order_items = clean_order_items(order_items_raw)?;
    let products = clean_products(products_raw, translations_raw)?;
    println!("✓ Transformation complete");

    println!("\n>>> Step 3. Loading into the sink database");
    let config = SinkConfig::from_env()?;
    let mut client = config.connect()?;
    for table in [&customers, &orders, &order_items, &products] {
        let written = sink::write_table(&mut client, table)?;
        println!("✓ Wrote {} rows to '{}'", written, table.name());
    }

    println!("\n🎉 ETL pipeline finished");
    Ok(())
}

/// Load whatever tables are present, merge translations if both halves
/// made it, and run the four checks in fixed order, printing each report.
/// Findings are informational; they never fail the run.
pub fn run_validation(data_dir: &Path) -> Result<()> {
    println!(">>> Step 1. Loading data from '{}'", data_dir.display());
    let mut tables = load_tables(&TABLE_MAPPING, data_dir);

    println!("\n>>> Step 2. Merging category translations");
    merge_category_translations(&mut tables)?;

    println!("\n>>> Step 3. Validating data types");
    let requirements = column_requirements();
    println!("{}", render_type_report(&check_data_types(&tables, &requirements)));

    println!("\n>>> Step 4. Checking for duplicate rows");
    println!("{}", render_duplicate_report(&check_duplicates(&tables)));

    println!("\n>>> Step 5. Checking for missing values");
    println!("{}", render_missing_report(&check_missing_values(&tables)));

    println!("\n>>> Step 6. Checking data sanity");
    println!("{}", render_sanity_report(&check_data_sanity(&tables)));

    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn temp_dir(tag: &str) -> PathBuf {
        let dir =
            std::env::temp_dir().join(format!("olist_etl_pipeline_{}_{}", tag, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write_fixture_csvs(dir: &Path) {
        fs::write(
            dir.join("customers.csv"),
            "customer_id,customer_unique_id,customer_zip_code_prefix,customer_city,customer_state\n\
             c1,u1,01310,sao paulo,SP\n\
             c1,u1,01310,sao paulo,SP\n",
        )
        .unwrap();
        fs::write(
            dir.join("orders.csv"),
            "order_id,customer_id,order_status,order_purchase_timestamp,\
             order_delivered_carrier_date,order_delivered_customer_date,\
             order_estimated_delivery_date\n\
             o1,c1,delivered,2017-10-02 10:56:33,2017-10-04 19:55:00,,2017-10-10\n",
        )
        .unwrap();
        fs::write(
            dir.join("order_items.csv"),
            "order_id,order_item_id,product_id,seller_id,shipping_limit_date,price,freight_value\n\
             o1,1,p1,s1,2017-10-06 11:05:13,-5.0,8.72\n",
        )
        .unwrap();
        fs::write(
            dir.join("products.csv"),
            "product_id,product_category_name,product_name_lenght,product_description_lenght,\
             product_photos_qty,product_weight_g,product_length_cm,product_height_cm,\
             product_width_cm\n\
             p1,beleza_saude,40.0,287.0,1.0,225.0,16.0,10.0,14.0\n",
        )
        .unwrap();
        fs::write(
            dir.join("product_category.csv"),
            "product_category_name,product_category_name_english\nbeleza_saude,health_beauty\n",
        )
        .unwrap();
    }

    #[test]
    fn test_run_validation_completes_despite_findings() {
        let dir = temp_dir("full");
        write_fixture_csvs(&dir);

        // Duplicate customers, a missing delivery date, and a negative
        // price are all present; the run still succeeds.
        run_validation(&dir).unwrap();

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_run_validation_tolerates_missing_files() {
        let dir = temp_dir("sparse");
        fs::write(
            dir.join("customers.csv"),
            "customer_id,customer_unique_id,customer_zip_code_prefix,customer_city,customer_state\n\
             c1,u1,01310,sao paulo,SP\n",
        )
        .unwrap();

        run_validation(&dir).unwrap();

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_run_etl_aborts_on_missing_raw_file() {
        let dir = temp_dir("strict");
        // No CSVs at all: extraction must fail before any sink access.
        assert!(run_etl(&dir).is_err());
        let _ = fs::remove_dir_all(&dir);
    }
}
