use csv::ReaderBuilder;
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::app::ports::TableSource;
use crate::error::{CleanerError, Result};
use crate::table::{CellValue, Row, Table};

/// Reads a delimited text file whose first line is the header.
/// Paths ending in `.gz` are decompressed on the fly.
pub struct CsvTableSource {
    path: PathBuf,
    delimiter: u8,
}

impl CsvTableSource {
    pub fn new(path: impl Into<PathBuf>, delimiter: u8) -> Self {
        Self {
            path: path.into(),
            delimiter,
        }
    }

    fn open(&self) -> Result<Box<dyn Read>> {
        let file = File::open(&self.path).map_err(|e| {
            CleanerError::Io(io::Error::new(
                e.kind(),
                format!("Could not read raw data file '{}': {}", self.path.display(), e),
            ))
        })?;
        if is_gzip(&self.path) {
            Ok(Box::new(GzDecoder::new(file)))
        } else {
            Ok(Box::new(file))
        }
    }
}

fn is_gzip(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gz"))
}

impl TableSource for CsvTableSource {
    fn load(&self) -> Result<Table> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(self.open()?);

        let headers = reader.byte_headers()?.clone();
        if headers.is_empty() {
            return Err(CleanerError::EmptyInput(self.path.display().to_string()));
        }

        let mut lossy = 0;
        let mut decode = |bytes: &[u8]| match std::str::from_utf8(bytes) {
            Ok(text) => text.to_string(),
            Err(_) => {
                lossy += 1;
                String::from_utf8_lossy(bytes).into_owned()
            }
        };

        let columns: Vec<String> = headers.iter().map(&mut decode).collect();
        let mut table = Table::new(columns);

        for record in reader.byte_records() {
            let record = record?;
            let cells = record
                .iter()
                .map(|field| CellValue::from_raw(&decode(field)))
                .collect();
            table.push_row(Row::new(cells));
        }

        if lossy > 0 {
            warn!("Replaced invalid UTF-8 in {} fields of {}", lossy, self.path.display());
        }
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
