// 🔍 Validator - Four independent, side-effect-free data-quality checks
// Each check reads the full table set and returns finding records; none of
// them mutates data or halts the pipeline

use crate::report::render_grid;
use crate::schema::TableRequirement;
use crate::table::{ColumnType, Table, TableSet, Value};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::HashMap;

// ============================================================================
// FINDINGS
// ============================================================================

/// A column whose runtime type differs from the Schema Registry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeMismatch {
    pub table: String,
    pub column: String,
    pub actual: ColumnType,
    pub expected: ColumnType,
}

/// A table containing exact duplicate rows. `duplicate_rows` counts every
/// occurrence of a duplicated row, not just the extras.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DuplicateFinding {
    pub table: String,
    pub duplicate_rows: usize,
}

/// A column with one or more null cells.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingValueFinding {
    pub table: String,
    pub column: String,
    pub missing_count: usize,
}

/// A violated domain sanity rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SanityFinding {
    pub check: String,
    pub table: String,
    pub count: usize,
}

// ============================================================================
// CHECKS
// ============================================================================

/// Compare each registered (table, column) against its runtime type.
/// Absent tables and absent columns are skipped silently.
pub fn check_data_types(
    tables: &TableSet,
    requirements: &[(&'static str, TableRequirement)],
) -> Vec<TypeMismatch> {
    let mut mismatches = Vec::new();

    for (table_name, requirement) in requirements {
        let table = match tables.get(*table_name) {
            Some(table) => table,
            None => continue,
        };

        for (column_name, expected) in requirement {
            if let Some(idx) = table.column_index(column_name) {
                let actual = table.columns()[idx].ty;
                if actual != *expected {
                    mismatches.push(TypeMismatch {
                        table: table_name.to_string(),
                        column: column_name.to_string(),
                        actual,
                        expected: *expected,
                    });
                }
            }
        }
    }

    mismatches
}

/// Count rows that are exact duplicates of at least one other row in the
/// same table, all occurrences included.
pub fn check_duplicates(tables: &TableSet) -> Vec<DuplicateFinding> {
    let mut findings = Vec::new();

    for (name, table) in tables {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for row in table.rows() {
            *counts.entry(row_fingerprint(row)).or_insert(0) += 1;
        }

        let duplicate_rows: usize = counts.values().filter(|&&c| c > 1).sum();
        if duplicate_rows > 0 {
            findings.push(DuplicateFinding {
                table: name.clone(),
                duplicate_rows,
            });
        }
    }

    findings
}

/// Count null cells per (table, column); one finding per column with any.
pub fn check_missing_values(tables: &TableSet) -> Vec<MissingValueFinding> {
    let mut findings = Vec::new();

    for (name, table) in tables {
        for (idx, column) in table.columns().iter().enumerate() {
            let missing_count = table.null_count(idx);
            if missing_count > 0 {
                findings.push(MissingValueFinding {
                    table: name.clone(),
                    column: column.name.clone(),
                    missing_count,
                });
            }
        }
    }

    findings
}

/// Domain sanity rules: order items must not carry negative prices or
/// negative freight values. Absent table or columns are skipped.
pub fn check_data_sanity(tables: &TableSet) -> Vec<SanityFinding> {
    let mut findings = Vec::new();

    if let Some(order_items) = tables.get("order_items") {
        let rules = [("Negative Price", "price"), ("Negative Freight Value", "freight_value")];
        for (check, column) in rules {
            if let Some(count) = negative_count(order_items, column) {
                if count > 0 {
                    findings.push(SanityFinding {
                        check: check.to_string(),
                        table: "order_items".to_string(),
                        count,
                    });
                }
            }
        }
    }

    findings
}

/// SHA-256 over the type-tagged cell values, following the same hashing
/// scheme used for idempotent row identity elsewhere in the ecosystem.
fn row_fingerprint(row: &[Value]) -> String {
    let mut hasher = Sha256::new();
    for value in row {
        hasher.update(value.fingerprint());
        hasher.update([0x1f]);
    }
    format!("{:x}", hasher.finalize())
}

fn negative_count(table: &Table, column: &str) -> Option<usize> {
    let idx = table.column_index(column)?;
    Some(
        table
            .rows()
            .iter()
            .filter(|row| row[idx].as_f64().map_or(false, |v| v < 0.0))
            .count(),
    )
}

// ============================================================================
// REPORT RENDERING
// ============================================================================

pub fn render_type_report(findings: &[TypeMismatch]) -> String {
    if findings.is_empty() {
        return "✓ All columns matched the data type requirements".to_string();
    }
    let rows: Vec<Vec<String>> = findings
        .iter()
        .map(|f| {
            vec![
                f.table.clone(),
                f.column.clone(),
                f.actual.to_string(),
                f.expected.to_string(),
            ]
        })
        .collect();
    format!(
        "Found columns that don't match the data type requirement:\n{}",
        render_grid(&["table", "column", "actual_type", "expected_type"], &rows)
    )
}

pub fn render_duplicate_report(findings: &[DuplicateFinding]) -> String {
    if findings.is_empty() {
        return "✓ No duplicate rows found in any table".to_string();
    }
    let rows: Vec<Vec<String>> = findings
        .iter()
        .map(|f| vec![f.table.clone(), f.duplicate_rows.to_string()])
        .collect();
    format!(
        "Found duplicate rows in the following tables:\n{}",
        render_grid(&["table", "duplicate_rows"], &rows)
    )
}

pub fn render_missing_report(findings: &[MissingValueFinding]) -> String {
    if findings.is_empty() {
        return "✓ No missing values found in any table".to_string();
    }
    let rows: Vec<Vec<String>> = findings
        .iter()
        .map(|f| vec![f.table.clone(), f.column.clone(), f.missing_count.to_string()])
        .collect();
    format!(
        "Found missing values in the following columns:\n{}",
        render_grid(&["table", "column", "missing_count"], &rows)
    )
}

pub fn render_sanity_report(findings: &[SanityFinding]) -> String {
    if findings.is_empty() {
        return "✓ No data sanity issues found".to_string();
    }
    let rows: Vec<Vec<String>> = findings
        .iter()
        .map(|f| vec![f.check.clone(), f.table.clone(), f.count.to_string()])
        .collect();
    format!(
        "Found data sanity issues:\n{}",
        render_grid(&["check", "table", "count"], &rows)
    )
}

// ============================================================================
// TESTS
// ============================================================================
