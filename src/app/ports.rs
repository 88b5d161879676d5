use crate::error::Result;
use crate::pipeline::PipelineReport;
use crate::table::Table;

/// Supplies the raw table: header text as column names, raw text cells
pub trait TableSource {
    fn load(&self) -> Result<Table>;

    /// Human-readable location used in logs
    fn describe(&self) -> String;
}

/// Consumes the cleaned table
pub trait TableSink {
    /// Write the whole table; either all of it lands or nothing does
    fn write(&self, table: &Table) -> Result<()>;

    fn describe(&self) -> String;
}

/// Persists the run report
pub trait ReportSink {
    fn write_report(&self, report: &PipelineReport) -> Result<()>;
}
