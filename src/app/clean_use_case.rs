use tracing::{info, instrument, warn};

use crate::app::ports::{ReportSink, TableSink, TableSource};
use crate::config::Config;
use crate::error::Result;
use crate::infra::{table_source_for, CsvTableSink, JsonReportAdapter};
use crate::pipeline::{Pipeline, PipelineOutcome};

/// Use case for cleaning one sales export: load, run the pipeline, write
pub struct CleanUseCase {
    pipeline: Pipeline,
    source: Box<dyn TableSource>,
    sink: Box<dyn TableSink>,
    report_sink: Option<Box<dyn ReportSink>>,
}

impl CleanUseCase {
    pub fn new(pipeline: Pipeline, source: Box<dyn TableSource>, sink: Box<dyn TableSink>) -> Self {
        Self {
            pipeline,
            source,
            sink,
            report_sink: None,
        }
    }

    pub fn with_report_sink(mut self, report_sink: Box<dyn ReportSink>) -> Self {
        self.report_sink = Some(report_sink);
        self
    }

    /// Wire the CSV adapters and the pipeline from configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let delimiter = config.csv.delimiter_byte()?;
        let use_case = Self::new(
            Pipeline::from_config(config),
            table_source_for(&config.paths.input, delimiter),
            Box::new(CsvTableSink::new(&config.paths.output, delimiter)),
        );
        Ok(match &config.paths.report {
            Some(report) => use_case.with_report_sink(Box::new(JsonReportAdapter::new(report))),
            None => use_case,
        })
    }

    /// Run the whole cleaning job.
    ///
    /// The cleaned table is built in memory before the sink is touched, so a
    /// schema error or unreadable input never produces an output file. The
    /// report is written last and a failure there only warns, since the
    /// cleaned output is already in place.
    #[instrument(skip(self), fields(source = %self.source.describe()))]
    pub fn run(&self) -> Result<PipelineOutcome> {
        let raw = self.source.load()?;
        let outcome = self.pipeline.run(raw)?;
        outcome.report.log_summary();

        self.sink.write(&outcome.table)?;
        info!(
            "💾 Saved {} cleaned rows to {}",
            outcome.table.len(),
            self.sink.describe()
        );

        if let Some(report_sink) = &self.report_sink {
            if let Err(e) = report_sink.write_report(&outcome.report) {
                warn!("Failed to write cleaning report: {}", e);
            }
        }

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CleanerError;
    use crate::pipeline::PipelineReport;
    use crate::table::Table;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct MemorySource {
        table: Table,
    }

    impl TableSource for MemorySource {
        fn load(&self) -> Result<Table> {
            Ok(self.table.clone())
        }

        fn describe(&self) -> String {
            "memory".to_string()
        }
    }

    struct FailingSource;

    impl TableSource for FailingSource {
        fn load(&self) -> Result<Table> {
            Err(CleanerError::EmptyInput("memory".to_string()))
        }

        fn describe(&self) -> String {
            "failing".to_string()
        }
    }

    #[derive(Clone, Default)]
    struct MemorySink {
        written: Rc<RefCell<Vec<Table>>>,
    }

    impl TableSink for MemorySink {
        fn write(&self, table: &Table) -> Result<()> {
            self.written.borrow_mut().push(table.clone());
            Ok(())
        }

        fn describe(&self) -> String {
            "memory".to_string()
        }
    }

    #[derive(Clone, Default)]
    struct MemoryReports {
        reports: Rc<RefCell<Vec<PipelineReport>>>,
    }

    impl ReportSink for MemoryReports {
        fn write_report(&self, report: &PipelineReport) -> Result<()> {
            self.reports.borrow_mut().push(report.clone());
            Ok(())
        }
    }

    struct FailingReports;

    impl ReportSink for FailingReports {
        fn write_report(&self, _report: &PipelineReport) -> Result<()> {
            Err(CleanerError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only",
            )))
        }
    }

    fn source(columns: &[&str], rows: &[&[&str]]) -> Box<dyn TableSource> {
        Box::new(MemorySource {
            table: Table::from_text_rows(columns, rows),
        })
    }

    #[test]
    fn test_clean_use_case_writes_once() {
        let sink = MemorySink::default();
        let reports = MemoryReports::default();
        let use_case = CleanUseCase::new(
            Pipeline::default(),
            source(&["Price", "Qty"], &[&["1", "2"], &["-1", "2"]]),
            Box::new(sink.clone()),
        )
        .with_report_sink(Box::new(reports.clone()));

        let outcome = use_case.run().unwrap();
        assert_eq!(outcome.table.len(), 1);

        let written = sink.written.borrow();
        assert_eq!(written.len(), 1);
        assert_eq!(written[0], outcome.table);
        assert_eq!(reports.reports.borrow().len(), 1);
    }

    #[test]
    fn test_schema_error_writes_nothing() {
        let sink = MemorySink::default();
        let use_case = CleanUseCase::new(
            Pipeline::default(),
            source(&["Qty"], &[&["2"]]),
            Box::new(sink.clone()),
        );

        let err = use_case.run().unwrap_err();
        assert!(err.is_schema_error());
        assert!(sink.written.borrow().is_empty());
    }

    #[test]
    fn test_source_failure_is_surfaced() {
        let sink = MemorySink::default();
        let use_case = CleanUseCase::new(Pipeline::default(), Box::new(FailingSource), Box::new(sink.clone()));
        let err = use_case.run().unwrap_err();
        assert_eq!(err.exit_code(), 3);
        assert!(sink.written.borrow().is_empty());
    }

    #[test]
    fn test_report_failure_keeps_the_run_successful() {
        let sink = MemorySink::default();
        let use_case = CleanUseCase::new(
            Pipeline::default(),
            source(&["Price", "Qty"], &[&["1", "2"]]),
            Box::new(sink.clone()),
        )
        .with_report_sink(Box::new(FailingReports));

        let outcome = use_case.run().unwrap();
        assert_eq!(outcome.report.rows_out, 1);
        assert_eq!(sink.written.borrow().len(), 1);
    }
}
