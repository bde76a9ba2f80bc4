// 📂 Loader - Named CSV files → named in-memory tables
// Tolerant by contract: a missing optional file is a warning, not a failure

use crate::table::{Column, ColumnType, Table, TableSet, Value};
use anyhow::{Context, Result};
use csv::StringRecord;
use std::path::Path;

/// Source file → destination table, in load order.
pub const TABLE_MAPPING: [(&str, &str); 5] = [
    ("customers.csv", "customers"),
    ("orders.csv", "orders"),
    ("order_items.csv", "order_items"),
    ("products.csv", "products"),
    ("product_category.csv", "product_category"),
];

/// Strict single-file reader used by the transform-and-load path.
pub fn read_table(path: &Path, name: &str) -> Result<Table> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open '{}'", path.display()))?;

    let headers: Vec<String> = reader
        .headers()
        .with_context(|| format!("failed to read headers from '{}'", path.display()))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut records: Vec<StringRecord> = Vec::new();
    for result in reader.records() {
        let record =
            result.with_context(|| format!("failed to read record from '{}'", path.display()))?;
        records.push(record);
    }

    // Header spelling is case- and separator-insensitive on read.
    let mut table = build_table(name, &headers, &records);
    table.normalize_column_names();
    Ok(table)
}

/// Tolerant mapping-driven loader used by the validation path. A missing
/// file is warned about and its table key omitted; any other read error is
/// reported and that table likewise skipped.
pub fn load_tables(mapping: &[(&str, &str)], data_dir: &Path) -> TableSet {
    let mut tables = TableSet::new();

    for (csv_file, table_name) in mapping {
        let path = data_dir.join(csv_file);
        if !path.exists() {
            println!("⚠ '{}' not found at '{}', skipping", csv_file, path.display());
            continue;
        }

        match read_table(&path, table_name) {
            Ok(table) => {
                println!(
                    "✓ Loaded '{}' into '{}' ({} rows)",
                    csv_file,
                    table_name,
                    table.n_rows()
                );
                tables.insert(table_name.to_string(), table);
            }
            Err(e) => println!("⚠ Error loading '{}': {:#}", csv_file, e),
        }
    }

    tables
}

// ============================================================================
// TYPE INFERENCE
// ============================================================================

fn build_table(name: &str, headers: &[String], records: &[StringRecord]) -> Table {
    let column_types: Vec<ColumnType> = (0..headers.len())
        .map(|i| infer_column_type(records.iter().map(|r| r.get(i).unwrap_or(""))))
        .collect();

    let columns = headers
        .iter()
        .zip(&column_types)
        .map(|(name, ty)| Column::new(name, *ty))
        .collect();

    let mut table = Table::new(name, columns);
    for record in records {
        let row: Vec<Value> = column_types
            .iter()
            .enumerate()
            .map(|(i, ty)| convert_cell(record.get(i).unwrap_or(""), *ty))
            .collect();
        // Arity always matches: the row is built from the header count.
        let _ = table.push_row(row);
    }
    table
}

/// Infer a column's type from its non-empty cells: all integers → Integer,
/// all numeric → Float, anything else → Text. A leading-zero numeral (zip
/// prefixes like 01310) forces Text so the zeros survive.
fn infer_column_type<'a>(cells: impl Iterator<Item = &'a str>) -> ColumnType {
    let mut saw_value = false;
    let mut all_int = true;

    for cell in cells {
        let cell = cell.trim();
        if cell.is_empty() {
            continue;
        }
        saw_value = true;

        if has_leading_zero(cell) {
            return ColumnType::Text;
        }
        if all_int && cell.parse::<i64>().is_err() {
            all_int = false;
        }
        if !all_int && cell.parse::<f64>().is_err() {
            return ColumnType::Text;
        }
    }

    if !saw_value {
        ColumnType::Text
    } else if all_int {
        ColumnType::Integer
    } else {
        ColumnType::Float
    }
}

fn has_leading_zero(cell: &str) -> bool {
    let digits = cell.strip_prefix('-').unwrap_or(cell);
    digits.len() > 1 && digits.starts_with('0') && !digits.starts_with("0.")
}

fn convert_cell(cell: &str, ty: ColumnType) -> Value {
    if cell.is_empty() {
        return Value::Null;
    }
    match ty {
        ColumnType::Integer => cell
            .trim()
            .parse::<i64>()
            .map(Value::Int)
            .unwrap_or(Value::Null),
        ColumnType::Float => cell
            .trim()
            .parse::<f64>()
            .map(Value::Float)
            .unwrap_or(Value::Null),
        _ => Value::Text(cell.to_string()),
    }
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
        let dir = std::env::temp_dir().join(format!("olist_etl_{}_{}", tag, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_read_table_infers_column_types() {
        let dir = temp_dir("infer");
        let path = dir.join("customers.csv");
        fs::write(
            &path,
            "customer_id,customer_zip_code_prefix,score,visits\n\
             c1,01310,4.5,3\n\
             c2,4101,3.0,7\n",
        )
        .unwrap();

        let table = read_table(&path, "customers").unwrap();

        assert_eq!(table.n_rows(), 2);
        assert_eq!(table.columns()[0].ty, ColumnType::Text);
        // Leading zero forces the zip column to stay textual.
        assert_eq!(table.columns()[1].ty, ColumnType::Text);
        assert_eq!(table.columns()[2].ty, ColumnType::Float);
        assert_eq!(table.columns()[3].ty, ColumnType::Integer);

        assert_eq!(table.rows()[0][1], Value::Text("01310".to_string()));
        assert_eq!(table.rows()[1][3], Value::Int(7));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_read_table_empty_cells_become_null() {
        let dir = temp_dir("nulls");
        let path = dir.join("products.csv");
        fs::write(&path, "product_id,product_weight_g\np1,225\np2,\n").unwrap();

        let table = read_table(&path, "products").unwrap();

        assert_eq!(table.columns()[1].ty, ColumnType::Integer);
        assert_eq!(table.rows()[0][1], Value::Int(225));
        assert_eq!(table.rows()[1][1], Value::Null);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_load_tables_omits_missing_files() {
        let dir = temp_dir("missing");
        fs::write(dir.join("customers.csv"), "customer_id\nc1\n").unwrap();

        let mapping = [
            ("customers.csv", "customers"),
            ("orders.csv", "orders"),
        ];
        let tables = load_tables(&mapping, &dir);

        assert!(tables.contains_key("customers"));
        assert!(!tables.contains_key("orders"));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_read_table_missing_file_errors() {
        let dir = temp_dir("strict");
        assert!(read_table(&dir.join("nope.csv"), "nope").is_err());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_read_table_normalizes_headers() {
        let dir = temp_dir("headers");
        let path = dir.join("customers.csv");
        fs::write(&path, "Customer ID,Customer City\nc1,sao paulo\n").unwrap();

        let table = read_table(&path, "customers").unwrap();
        assert_eq!(table.column_names(), vec!["customer_id", "customer_city"]);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_infer_rejects_mixed_columns() {
        let cells = ["12", "abc", "3"];
        assert_eq!(
            infer_column_type(cells.iter().copied()),
            ColumnType::Text
        );
    }

    #[test]
    fn test_infer_all_empty_defaults_to_text() {
        let cells = ["", ""];
        assert_eq!(infer_column_type(cells.iter().copied()), ColumnType::Text);
    }
}
