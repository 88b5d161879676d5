//! Cleaning Phase Metrics

use crate::metrics::phase_metric;
use crate::pipeline::{PipelineReport, StageReport};

/// Metrics collection for the cleaning pipeline
pub struct CleaningMetrics;

impl CleaningMetrics {
    /// Record the rows one stage consumed and dropped
    pub fn record_stage(report: &StageReport) {
        let stage = report.stage.name();
        ::metrics::counter!(phase_metric!(counter, "clean", "stage_rows_in"), "stage" => stage)
            .increment(report.rows_in as u64);
        ::metrics::counter!(phase_metric!(counter, "clean", "rows_dropped"), "stage" => stage)
            .increment(report.rows_dropped() as u64);
        ::metrics::histogram!(phase_metric!(histogram, "clean", "stage_duration_ms"), "stage" => stage)
            .record(report.duration_ms);

        if let Some(invalid) = report.counters.get("invalid") {
            ::metrics::counter!(phase_metric!(counter, "clean", "invalid_cells"))
                .increment(*invalid as u64);
        }
    }

    /// Record a completed run
    pub fn record_run(report: &PipelineReport) {
        ::metrics::counter!(phase_metric!(counter, "clean", "runs")).increment(1);
        ::metrics::counter!(phase_metric!(counter, "clean", "rows_in")).increment(report.rows_in as u64);
        ::metrics::counter!(phase_metric!(counter, "clean", "rows_out")).increment(report.rows_out as u64);
        ::metrics::gauge!(phase_metric!(gauge, "clean", "last_rows_out")).set(report.rows_out as f64);
        ::metrics::histogram!(phase_metric!(histogram, "clean", "run_duration_ms")).record(report.duration_ms);
    }

    /// Record a run aborted by a schema error
    pub fn record_schema_failure() {
        ::metrics::counter!(phase_metric!(counter, "clean", "schema_errors")).increment(1);
    }
}

/// Pre-register the run-level metrics so a snapshot is never empty
pub fn register_metrics() {
    let _ = ::metrics::counter!(phase_metric!(counter, "clean", "runs"));
    let _ = ::metrics::counter!(phase_metric!(counter, "clean", "rows_in"));
    let _ = ::metrics::counter!(phase_metric!(counter, "clean", "rows_out"));
    let _ = ::metrics::counter!(phase_metric!(counter, "clean", "schema_errors"));
    let _ = ::metrics::counter!(phase_metric!(counter, "clean", "invalid_cells"));
}
