use std::path::Path;

use crate::app::ports::TableSource;
use crate::infra::{CsvTableSource, ExcelTableSource};

const EXCEL_EXTENSIONS: [&str; 5] = ["xls", "xlsx", "xlsm", "xlsb", "ods"];

pub fn is_workbook(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| EXCEL_EXTENSIONS.iter().any(|e| ext.eq_ignore_ascii_case(e)))
}

/// Picks the reader for `path` by extension. Workbooks go to calamine,
/// everything else (including `.csv.gz`) is read as delimited text.
pub fn table_source_for(path: &Path, delimiter: u8) -> Box<dyn TableSource> {
    if is_workbook(path) {
        Box::new(ExcelTableSource::new(path))
    } else {
        Box::new(CsvTableSource::new(path, delimiter))
    }
}
