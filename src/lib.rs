// Olist ETL - Core Library
// Batch extract-transform-load for the Olist e-commerce CSV dataset

pub mod table;
pub mod schema;
pub mod cleaning;
pub mod loader;
pub mod validation;
pub mod report;
pub mod sink;
pub mod pipeline;

// Re-export commonly used types
pub use table::{Column, ColumnType, Table, TableSet, Value};
pub use cleaning::{
    clean_customers, clean_order_items, clean_orders, clean_products,
    merge_category_translations, PRODUCT_COLUMNS, UNKNOWN_CATEGORY,
};
pub use loader::{load_tables, read_table, TABLE_MAPPING};
pub use validation::{
    check_data_sanity, check_data_types, check_duplicates, check_missing_values,
    DuplicateFinding, MissingValueFinding, SanityFinding, TypeMismatch,
};
pub use sink::{write_table, SinkConfig};
pub use pipeline::{run_etl, run_validation};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
