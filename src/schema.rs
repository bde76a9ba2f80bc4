// 📐 Schema Registry - Expected column types per table
// Consulted only by the type-conformance check; never enforced on load

use crate::table::ColumnType;

/// Ordered (column name, expected type) pairs for one table.
pub type TableRequirement = Vec<(&'static str, ColumnType)>;

/// The schema every table is expected to match once loaded and merged.
/// The products entry describes the table as the validation path sees it,
/// misspelled length columns included (those are only fixed by the full
/// cleaning rule).
pub fn column_requirements() -> Vec<(&'static str, TableRequirement)> {
    vec![
        (
            "customers",
            vec![
                ("customer_id", ColumnType::Text),
                ("customer_unique_id", ColumnType::Text),
                ("customer_zip_code_prefix", ColumnType::Text),
                ("customer_city", ColumnType::Text),
                ("customer_state", ColumnType::Text),
            ],
        ),
        (
            "orders",
            vec![
                ("order_id", ColumnType::Text),
                ("customer_id", ColumnType::Text),
                ("order_status", ColumnType::Text),
                ("order_purchase_timestamp", ColumnType::Timestamp),
                ("order_delivered_carrier_date", ColumnType::Timestamp),
                ("order_delivered_customer_date", ColumnType::Timestamp),
                ("order_estimated_delivery_date", ColumnType::Timestamp),
            ],
        ),
        (
            "order_items",
            vec![
                ("order_id", ColumnType::Text),
                ("order_item_id", ColumnType::Integer),
                ("product_id", ColumnType::Text),
                ("seller_id", ColumnType::Text),
                ("shipping_limit_date", ColumnType::Timestamp),
                ("price", ColumnType::Float),
                ("freight_value", ColumnType::Float),
            ],
        ),
        (
            "products",
            vec![
                ("product_id", ColumnType::Text),
                ("product_category_name", ColumnType::Text),
                ("product_name_lenght", ColumnType::Float),
                ("product_description_lenght", ColumnType::Float),
                ("product_photos_qty", ColumnType::Float),
                ("product_weight_g", ColumnType::Float),
                ("product_length_cm", ColumnType::Float),
                ("product_height_cm", ColumnType::Float),
                ("product_width_cm", ColumnType::Float),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_covers_all_four_tables() {
        let requirements = column_requirements();
        let tables: Vec<&str> = requirements.iter().map(|(t, _)| *t).collect();
        assert_eq!(tables, vec!["customers", "orders", "order_items", "products"]);
    }

    #[test]
    fn test_zip_prefix_is_required_to_be_text() {
        let requirements = column_requirements();
        let customers = &requirements
            .iter()
            .find(|(t, _)| *t == "customers")
            .unwrap()
            .1;
        let (_, ty) = customers
            .iter()
            .find(|(c, _)| *c == "customer_zip_code_prefix")
            .unwrap();
        assert_eq!(*ty, ColumnType::Text);
    }

    #[test]
    fn test_orders_timestamp_columns() {
        let requirements = column_requirements();
        let orders = &requirements.iter().find(|(t, _)| *t == "orders").unwrap().1;
        let timestamp_count = orders
            .iter()
            .filter(|(_, ty)| *ty == ColumnType::Timestamp)
            .count();
        assert_eq!(timestamp_count, 4);
    }
}
