pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod pipeline;
pub mod table;

// Application use cases and their ports
pub mod app;
// File-backed adapters for the ports
pub mod infra;

pub use error::{CleanerError, Result};
pub use pipeline::{Pipeline, PipelineOutcome, PipelineReport};
pub use table::{CellValue, Row, Table};
