//! In-memory table shared by every pipeline stage.
//!
//! A [`Table`] owns an ordered header and an ordered list of [`Row`]s. Rows
//! store their cells positionally against the header, so a row is a mapping
//! from column name to [`CellValue`] resolved through [`Table::column_index`].

use std::fmt;

/// A single cell, typed by how far it has travelled through the pipeline
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Raw or trimmed text
    Text(String),
    /// Successfully coerced numeric value
    Number(f64),
    /// Numeric coercion failed; keeps the rejected text for reporting
    Invalid(String),
    /// Empty or null cell
    Absent,
}

impl CellValue {
    /// Build a cell from raw field text. Empty fields are absent.
    pub fn from_raw(raw: &str) -> Self {
        if raw.is_empty() {
            CellValue::Absent
        } else {
            CellValue::Text(raw.to_string())
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, CellValue::Absent)
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, CellValue::Invalid(_))
    }

    /// Text written to a delimited file for this cell
    pub fn to_field(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) | CellValue::Invalid(s) => f.write_str(s),
            // f64's Display is the shortest form that round-trips (3.0 -> "3")
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Absent => Ok(()),
        }
    }
}

/// One record of the table
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    cells: Vec<CellValue>,
}

impl Row {
    pub fn new(cells: Vec<CellValue>) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[CellValue] {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut [CellValue] {
        &mut self.cells
    }

    pub fn into_cells(self) -> Vec<CellValue> {
        self.cells
    }

    pub fn get(&self, index: usize) -> Option<&CellValue> {
        self.cells.get(index)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Ordered header plus ordered rows
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    /// Create an empty table with the given header
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Create a table from a header and rows.
    ///
    /// Rows are padded with [`CellValue::Absent`] or truncated so every row
    /// has exactly one cell per column.
    pub fn with_rows(columns: Vec<String>, rows: Vec<Row>) -> Self {
        let mut table = Self::new(columns);
        for row in rows {
            table.push_row(row);
        }
        table
    }

    /// Convenience constructor from raw text, mostly for callers that build
    /// tables in memory. Empty strings become absent cells.
    pub fn from_text_rows(columns: &[&str], rows: &[&[&str]]) -> Self {
        let columns = columns.iter().map(|c| c.to_string()).collect();
        let rows = rows
            .iter()
            .map(|r| Row::new(r.iter().map(|v| CellValue::from_raw(v)).collect()))
            .collect();
        Self::with_rows(columns, rows)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Look up a cell by row position and column name
    pub fn value(&self, row: usize, column: &str) -> Option<&CellValue> {
        let index = self.column_index(column)?;
        self.rows.get(row).and_then(|r| r.get(index))
    }

    pub fn push_row(&mut self, row: Row) {
        let mut cells = row.into_cells();
        cells.resize(self.columns.len(), CellValue::Absent);
        self.rows.push(Row::new(cells));
    }

    /// Take the table apart so a stage can rebuild it
    pub fn into_parts(self) -> (Vec<String>, Vec<Row>) {
        (self.columns, self.rows)
    }

    /// Keep only rows matching `keep`, preserving their relative order
    pub fn retain_rows<F>(self, mut keep: F) -> Table
    where
        F: FnMut(&Row) -> bool,
    {
        let (columns, rows) = self.into_parts();
        let rows = rows.into_iter().filter(|row| keep(row)).collect();
        Table { columns, rows }
    }

    /// Rebuild the table with every row passed through `f`
    pub fn map_rows<F>(self, f: F) -> Table
    where
        F: FnMut(Row) -> Row,
    {
        let (columns, rows) = self.into_parts();
        let rows = rows.into_iter().map(f).collect();
        Table { columns, rows }
    }

    /// Same rows under a new header of equal width
    pub fn with_columns(self, columns: Vec<String>) -> Table {
        debug_assert_eq!(columns.len(), self.columns.len());
        Table {
            columns,
            rows: self.rows,
        }
    }
}
