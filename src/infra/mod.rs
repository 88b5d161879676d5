// Adapters for the app ports: CSV and workbook input, CSV output, JSON run reports

pub mod csv_sink;
pub mod csv_source;
pub mod excel_source;
pub mod report_output_adapter;
pub mod source_factory;

pub use csv_sink::CsvTableSink;
pub use csv_source::CsvTableSource;
pub use excel_source::ExcelTableSource;
pub use report_output_adapter::JsonReportAdapter;
pub use source_factory::table_source_for;
