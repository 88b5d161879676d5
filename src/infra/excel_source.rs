use calamine::{open_workbook_auto, Data, DataType, Range, Reader};
use chrono::{NaiveDateTime, NaiveTime};
use std::path::PathBuf;
use tracing::info;

use crate::app::ports::TableSource;
use crate::error::{CleanerError, Result};
use crate::table::{CellValue, Row, Table};

/// Reads the first worksheet of an Excel or OpenDocument workbook
pub struct ExcelTableSource {
    path: PathBuf,
}

impl ExcelTableSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn first_sheet(&self) -> Result<Range<Data>> {
        let mut workbook = open_workbook_auto(&self.path).map_err(|e| {
            CleanerError::Excel(format!("Failed to open workbook '{}': {}", self.path.display(), e))
        })?;
        workbook
            .worksheet_range_at(0)
            .ok_or_else(|| {
                CleanerError::Excel(format!("No worksheet found in '{}'", self.path.display()))
            })?
            .map_err(|e| {
                CleanerError::Excel(format!("Failed to read worksheet in '{}': {}", self.path.display(), e))
            })
    }
}

impl TableSource for ExcelTableSource {
    fn load(&self) -> Result<Table> {
        let range = self.first_sheet()?;
        let table = table_from_range(&range)
            .ok_or_else(|| CleanerError::EmptyInput(self.path.display().to_string()))?;
        info!(
            "Loaded file: {} (rows: {}, cols: {})",
            self.path.display(),
            table.len(),
            table.columns().len()
        );
        Ok(table)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// First sheet row is the header; `None` for a sheet without rows
fn table_from_range(range: &Range<Data>) -> Option<Table> {
    let mut rows = range.rows();
    let columns: Vec<String> = rows.next()?.iter().map(cell_text).collect();
    let body = rows
        .map(|row| Row::new(row.iter().map(|cell| CellValue::from_raw(&cell_text(cell))).collect()))
        .collect();
    Some(Table::with_rows(columns, body))
}

/// Raw text for a worksheet cell, as it would appear in a CSV export
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::DateTime(_) => cell
            .as_datetime()
            .map(format_datetime)
            .unwrap_or_else(|| cell.to_string()),
        other => other.to_string(),
    }
}

fn format_datetime(value: NaiveDateTime) -> String {
    if value.time() == NaiveTime::MIN {
        value.format("%Y-%m-%d").to_string()
    } else {
        value.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}
