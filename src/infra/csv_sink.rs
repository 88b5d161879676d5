use csv::WriterBuilder;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::app::ports::TableSink;
use crate::error::Result;
use crate::table::Table;

/// Writes the cleaned table as a delimited file, replacing any existing one.
///
/// Rows go to a temporary file next to the destination which is renamed over
/// it only once everything has been flushed.
pub struct CsvTableSink {
    path: PathBuf,
    delimiter: u8,
}

impl CsvTableSink {
    pub fn new(path: impl Into<PathBuf>, delimiter: u8) -> Self {
        Self {
            path: path.into(),
            delimiter,
        }
    }

    fn target_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

impl TableSink for CsvTableSink {
    fn write(&self, table: &Table) -> Result<()> {
        let dir = self.target_dir();
        fs::create_dir_all(dir)?;

        let mut staged = NamedTempFile::new_in(dir)?;
        {
            let mut writer = WriterBuilder::new()
                .delimiter(self.delimiter)
                .from_writer(staged.as_file_mut());
            writer.write_record(table.columns())?;
            for row in table.rows() {
                writer.write_record(row.cells().iter().map(|cell| cell.to_field()))?;
            }
            writer.flush()?;
        }
        staged.as_file().sync_all()?;
        debug!("Staged {} rows at {}", table.len(), staged.path().display());

        staged.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
