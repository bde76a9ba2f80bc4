// 📊 Table Model - Named, schema-bearing, ordered collections of rows
// The in-memory unit every pipeline stage exchanges

use anyhow::{anyhow, Result};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// The explicit table-name → table mapping passed between pipeline stages.
/// Ordered so that loops over it (and the reports they print) are deterministic.
pub type TableSet = BTreeMap<String, Table>;

// ============================================================================
// VALUES
// ============================================================================

/// A single cell. `Null` marks both missing input cells and coerced
/// unparseable values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Value {
    Null,
    Int(i64),
    Float(f64),
    Text(String),
    Timestamp(NaiveDateTime),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Numeric view of the cell (integers widen to float).
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Lexical form used when casting a column to text. `Null` has none.
    pub fn to_text(&self) -> Option<String> {
        match self {
            Value::Null => None,
            Value::Int(i) => Some(i.to_string()),
            Value::Float(f) => Some(f.to_string()),
            Value::Text(s) => Some(s.clone()),
            Value::Timestamp(ts) => Some(ts.format("%Y-%m-%d %H:%M:%S").to_string()),
        }
    }

    /// Type-tagged canonical form for exact-duplicate detection.
    /// Floats are keyed by bit pattern so `1310` (int) and `1310.0` (float)
    /// never collide.
    pub fn fingerprint(&self) -> String {
        match self {
            Value::Null => "n".to_string(),
            Value::Int(i) => format!("i:{}", i),
            Value::Float(f) => format!("f:{:016x}", f.to_bits()),
            Value::Text(s) => format!("t:{}", s),
            Value::Timestamp(ts) => format!("ts:{}", ts.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

// ============================================================================
// COLUMN TYPES
// ============================================================================

/// Semantic column type. Compared by the type-conformance check and mapped
/// to SQL types by the sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ColumnType {
    Text,
    Integer,
    Float,
    Timestamp,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnType::Text => "text",
            ColumnType::Integer => "integer",
            ColumnType::Float => "float",
            ColumnType::Timestamp => "timestamp",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub name: String,
    pub ty: ColumnType,
}

impl Column {
    pub fn new(name: &str, ty: ColumnType) -> Self {
        Column {
            name: name.to_string(),
            ty,
        }
    }
}

// ============================================================================
// TABLE
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    name: String,
    columns: Vec<Column>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    pub fn new(name: &str, columns: Vec<Column>) -> Self {
        Table {
            name: name.to_string(),
            columns,
            rows: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn push_row(&mut self, row: Vec<Value>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(anyhow!(
                "row has {} values but table '{}' has {} columns",
                row.len(),
                self.name,
                self.columns.len()
            ));
        }
        self.rows.push(row);
        Ok(())
    }

    /// Number of null cells in the given column.
    pub fn null_count(&self, column_idx: usize) -> usize {
        self.rows.iter().filter(|r| r[column_idx].is_null()).count()
    }

    // ========================================================================
    // COLUMN OPERATIONS
    // ========================================================================

    /// Lower-case every column name and replace spaces with underscores.
    /// Idempotent.
    pub fn normalize_column_names(&mut self) {
        for column in &mut self.columns {
            column.name = normalize_name(&column.name);
        }
    }

    /// Rename columns from a (old, new) list. Absent old names are skipped,
    /// matching the loose rename semantics the cleaning rules rely on.
    pub fn rename_columns(&mut self, renames: &[(&str, &str)]) {
        for (old, new) in renames {
            if let Some(idx) = self.column_index(old) {
                self.columns[idx].name = (*new).to_string();
            }
        }
    }

    /// Cast a column to text, preserving each value's lexical form.
    /// Nulls stay null. The column must exist.
    pub fn cast_to_text(&mut self, column: &str) -> Result<()> {
        let idx = self
            .column_index(column)
            .ok_or_else(|| anyhow!("column '{}' not found in table '{}'", column, self.name))?;

        for row in &mut self.rows {
            row[idx] = match row[idx].to_text() {
                Some(text) => Value::Text(text),
                None => Value::Null,
            };
        }
        self.columns[idx].ty = ColumnType::Text;
        Ok(())
    }

    /// Parse a column to timestamps. Unparseable cells coerce to null and
    /// never error; a missing column does error.
    pub fn parse_timestamps(&mut self, column: &str) -> Result<()> {
        let idx = self
            .column_index(column)
            .ok_or_else(|| anyhow!("column '{}' not found in table '{}'", column, self.name))?;

        for row in &mut self.rows {
            row[idx] = match &row[idx] {
                Value::Timestamp(ts) => Value::Timestamp(*ts),
                Value::Text(s) => match parse_timestamp(s) {
                    Some(ts) => Value::Timestamp(ts),
                    None => Value::Null,
                },
                _ => Value::Null,
            };
        }
        self.columns[idx].ty = ColumnType::Timestamp;
        Ok(())
    }

    /// Remove a column. The column must exist.
    pub fn drop_column(&mut self, column: &str) -> Result<()> {
        let idx = self
            .column_index(column)
            .ok_or_else(|| anyhow!("column '{}' not found in table '{}'", column, self.name))?;

        self.columns.remove(idx);
        for row in &mut self.rows {
            row.remove(idx);
        }
        Ok(())
    }

    /// Project to the given columns, in the given order. Any missing column
    /// is a hard error.
    pub fn select(&self, columns: &[&str]) -> Result<Table> {
        let mut indices = Vec::with_capacity(columns.len());
        for name in columns {
            let idx = self
                .column_index(name)
                .ok_or_else(|| anyhow!("column '{}' not found in table '{}'", name, self.name))?;
            indices.push(idx);
        }

        let selected_columns = indices.iter().map(|&i| self.columns[i].clone()).collect();
        let mut out = Table::new(&self.name, selected_columns);
        for row in &self.rows {
            let selected: Vec<Value> = indices.iter().map(|&i| row[i].clone()).collect();
            out.rows.push(selected);
        }
        Ok(out)
    }

    /// Replace nulls in a text column with a literal. Skips silently if the
    /// column is absent (it only exists after a successful merge).
    pub fn fill_null_text(&mut self, column: &str, fill: &str) {
        if let Some(idx) = self.column_index(column) {
            for row in &mut self.rows {
                if row[idx].is_null() {
                    row[idx] = Value::Text(fill.to_string());
                }
            }
        }
    }

    // ========================================================================
    // JOIN
    // ========================================================================

    /// Left-outer join on a shared key column. Every left row is preserved;
    /// unmatched right-side columns come back null. The key must exist on
    /// both sides.
    pub fn left_join(&self, right: &Table, key: &str) -> Result<Table> {
        let left_key = self
            .column_index(key)
            .ok_or_else(|| anyhow!("merge key '{}' not found in table '{}'", key, self.name))?;
        let right_key = right
            .column_index(key)
            .ok_or_else(|| anyhow!("merge key '{}' not found in table '{}'", key, right.name))?;

        // Index the right side by key fingerprint. Null keys never match.
        let mut index: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        for (i, row) in right.rows.iter().enumerate() {
            if !row[right_key].is_null() {
                index.entry(row[right_key].fingerprint()).or_default().push(i);
            }
        }

        let appended: Vec<usize> = (0..right.n_columns()).filter(|&i| i != right_key).collect();

        let mut columns = self.columns.clone();
        for &i in &appended {
            columns.push(right.columns[i].clone());
        }

        let mut out = Table::new(&self.name, columns);
        for row in &self.rows {
            let matches = if row[left_key].is_null() {
                None
            } else {
                index.get(&row[left_key].fingerprint())
            };

            match matches {
                Some(right_rows) => {
                    for &r in right_rows {
                        let mut joined = row.clone();
                        for &i in &appended {
                            joined.push(right.rows[r][i].clone());
                        }
                        out.rows.push(joined);
                    }
                }
                None => {
                    let mut joined = row.clone();
                    joined.extend(appended.iter().map(|_| Value::Null));
                    out.rows.push(joined);
                }
            }
        }
        Ok(out)
    }
}

// ============================================================================
// HELPERS
// ============================================================================

/// snake_case normalization applied to every column name post-load.
pub fn normalize_name(name: &str) -> String {
    name.to_lowercase().replace(' ', "_")
}

/// Parse a timestamp from its common CSV spellings. Date-only forms are
/// promoted to midnight.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%m/%d/%Y %H:%M"];
    for format in DATETIME_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(ts);
        }
    }

    const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return date.and_hms_opt(0, 0, 0);
        }
    }

    None
}

// ============================================================================
// TESTS
// ============================================================================
