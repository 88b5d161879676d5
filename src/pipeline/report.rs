use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;
use tracing::info;

use crate::pipeline::processing::StageOutcome;

/// The stages a cleaning run can execute, in pipeline order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    NormalizeColumns,
    TrimWhitespace,
    CoerceNumeric,
    DropIncomplete,
    SwapTransposed,
    FilterRange,
    DropDuplicates,
}

impl Stage {
    pub fn name(self) -> &'static str {
        match self {
            Stage::NormalizeColumns => "normalize_columns",
            Stage::TrimWhitespace => "trim_whitespace",
            Stage::CoerceNumeric => "coerce_numeric",
            Stage::DropIncomplete => "drop_incomplete",
            Stage::SwapTransposed => "swap_transposed",
            Stage::FilterRange => "filter_range",
            Stage::DropDuplicates => "drop_duplicates",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What one stage did to the table
#[derive(Debug, Clone, Serialize)]
pub struct StageReport {
    pub stage: Stage,
    pub rows_in: usize,
    pub rows_out: usize,
    /// Stage-specific counts (cells marked invalid, rows swapped, ...)
    pub counters: BTreeMap<&'static str, usize>,
    pub duration_ms: f64,
}

impl StageReport {
    pub fn new(stage: Stage, rows_in: usize, outcome: &StageOutcome, elapsed: Duration) -> Self {
        Self {
            stage,
            rows_in,
            rows_out: outcome.table.len(),
            counters: outcome.counters.iter().copied().collect(),
            duration_ms: elapsed.as_secs_f64() * 1000.0,
        }
    }

    pub fn rows_dropped(&self) -> usize {
        self.rows_in.saturating_sub(self.rows_out)
    }

    pub fn counter(&self, name: &str) -> usize {
        self.counters.get(name).copied().unwrap_or(0)
    }
}

/// Summary of a complete cleaning run
#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    pub run_at: DateTime<Utc>,
    pub rows_in: usize,
    pub rows_out: usize,
    /// Canonical header of the cleaned table
    pub columns: Vec<String>,
    pub stages: Vec<StageReport>,
    pub duration_ms: f64,
}

impl PipelineReport {
    pub fn rows_dropped(&self) -> usize {
        self.rows_in.saturating_sub(self.rows_out)
    }

    pub fn stage(&self, stage: Stage) -> Option<&StageReport> {
        self.stages.iter().find(|s| s.stage == stage)
    }

    pub fn log_summary(&self) {
        for stage in &self.stages {
            info!(
                stage = %stage.stage,
                rows_in = stage.rows_in,
                rows_out = stage.rows_out,
                "{}: {} -> {} rows {:?}",
                stage.stage,
                stage.rows_in,
                stage.rows_out,
                stage.counters
            );
        }
        info!(
            "Cleaning finished: start={}, dropped={}, final={} ({:.1} ms)",
            self.rows_in,
            self.rows_dropped(),
            self.rows_out,
            self.duration_ms
        );
    }
}
