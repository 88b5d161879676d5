use std::fs;
use std::path::PathBuf;
use tracing::info;

use crate::app::ports::ReportSink;
use crate::error::Result;
use crate::pipeline::PipelineReport;

/// Writes the run report as pretty-printed JSON
pub struct JsonReportAdapter {
    path: PathBuf,
}

impl JsonReportAdapter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ReportSink for JsonReportAdapter {
    fn write_report(&self, report: &PipelineReport) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json_content = serde_json::to_string_pretty(report)?;
        fs::write(&self.path, json_content)?;
        info!("📝 Wrote run report to {}", self.path.display());
        Ok(())
    }
}
