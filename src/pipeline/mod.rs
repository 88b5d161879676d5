// Cleaning pipeline: column normalization, trimming, coercion and row filters

pub mod processing;
pub mod report;
pub mod rules;

use chrono::Utc;
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::Result;
use crate::metrics::CleaningMetrics;
use crate::table::Table;

use processing::columns::normalize_columns;
use processing::dedupe::drop_duplicate_rows;
use processing::missing::drop_incomplete_rows;
use processing::numeric::coerce_numeric;
use processing::range::filter_range;
use processing::swap::swap_transposed_values;
use processing::whitespace::trim_whitespace;
use processing::StageOutcome;

pub use report::{PipelineReport, Stage, StageReport};
pub use rules::CleaningRules;

/// A total stage over a normalized table
pub type StageFn = fn(&CleaningRules, Table) -> StageOutcome;

/// Cleaned table together with the report describing how it was produced
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub table: Table,
    pub report: PipelineReport,
}

/// Runs the cleaning stages in their fixed order over one table
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    rules: CleaningRules,
}

impl Pipeline {
    pub fn new(rules: CleaningRules) -> Self {
        Self { rules }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(CleaningRules::from_config(config))
    }

    /// Stages that run after column normalization, in execution order.
    /// Optional stages appear only when enabled.
    pub fn row_stages(&self) -> Vec<(Stage, StageFn)> {
        let mut stages: Vec<(Stage, StageFn)> = vec![
            (Stage::TrimWhitespace, trim_whitespace as StageFn),
            (Stage::CoerceNumeric, coerce_numeric as StageFn),
            (Stage::DropIncomplete, drop_incomplete_rows as StageFn),
        ];
        if self.rules.swap_price_qty {
            stages.push((Stage::SwapTransposed, swap_transposed_values as StageFn));
        }
        stages.push((Stage::FilterRange, filter_range as StageFn));
        if self.rules.drop_duplicates {
            stages.push((Stage::DropDuplicates, drop_duplicate_rows as StageFn));
        }
        stages
    }

    /// Clean `table`. Only column normalization can fail, and it fails before
    /// any row is touched.
    pub fn run(&self, table: Table) -> Result<PipelineOutcome> {
        let started = Instant::now();
        let run_at = Utc::now();
        let rows_in = table.len();
        info!("🧹 Cleaning {} rows x {} columns", rows_in, table.columns().len());

        let t_stage = Instant::now();
        let normalized = match normalize_columns(&self.rules, table) {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("Column normalization failed: {}", e);
                CleaningMetrics::record_schema_failure();
                return Err(e);
            }
        };
        let columns_report = StageReport::new(
            Stage::NormalizeColumns,
            rows_in,
            &normalized,
            t_stage.elapsed(),
        );
        CleaningMetrics::record_stage(&columns_report);
        let mut stages = vec![columns_report];
        let mut table = normalized.table;

        for (stage, apply) in self.row_stages() {
            let t_stage = Instant::now();
            let before = table.len();
            let outcome = apply(&self.rules, table);
            let report = StageReport::new(stage, before, &outcome, t_stage.elapsed());
            debug!(
                "{}: {} -> {} rows {:?}",
                stage, report.rows_in, report.rows_out, report.counters
            );
            CleaningMetrics::record_stage(&report);
            stages.push(report);
            table = outcome.table;
        }

        let report = PipelineReport {
            run_at,
            rows_in,
            rows_out: table.len(),
            columns: table.columns().to_vec(),
            stages,
            duration_ms: started.elapsed().as_secs_f64() * 1000.0,
        };
        CleaningMetrics::record_run(&report);

        Ok(PipelineOutcome { table, report })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CleanerError;
    use crate::table::CellValue;

    fn sample() -> Table {
        Table::from_text_rows(
            &[" Price ", "Qty", "Item"],
            &[
                &["$12.50", "3", " Widget "],
                &["abc", "5", "X"],
                &["-5", "2", "Y"],
                &["0", "0", "Freebie"],
            ],
        )
    }

    #[test]
    fn test_default_stage_order() {
        let stages: Vec<Stage> = Pipeline::default().row_stages().into_iter().map(|(s, _)| s).collect();
        assert_eq!(
            stages,
            vec![
                Stage::TrimWhitespace,
                Stage::CoerceNumeric,
                Stage::DropIncomplete,
                Stage::FilterRange
            ]
        );
    }

    #[test]
    fn test_optional_stages_slot_in_order() {
        let rules = CleaningRules {
            swap_price_qty: true,
            drop_duplicates: true,
            ..CleaningRules::default()
        };
        let stages: Vec<Stage> = Pipeline::new(rules).row_stages().into_iter().map(|(s, _)| s).collect();
        assert_eq!(
            stages,
            vec![
                Stage::TrimWhitespace,
                Stage::CoerceNumeric,
                Stage::DropIncomplete,
                Stage::SwapTransposed,
                Stage::FilterRange,
                Stage::DropDuplicates
            ]
        );
    }

    #[test]
    fn test_run_cleans_sample() {
        let outcome = Pipeline::default().run(sample()).unwrap();
        let table = &outcome.table;
        assert_eq!(table.columns(), &["price", "qty", "item"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.value(0, "price"), Some(&CellValue::Number(12.5)));
        assert_eq!(table.value(0, "qty"), Some(&CellValue::Number(3.0)));
        assert_eq!(table.value(0, "item"), Some(&CellValue::Text("Widget".into())));
        assert_eq!(table.value(1, "item"), Some(&CellValue::Text("Freebie".into())));

        let report = &outcome.report;
        assert_eq!(report.rows_in, 4);
        assert_eq!(report.rows_out, 2);
        assert_eq!(report.stages.len(), 5);
        assert_eq!(report.stage(Stage::CoerceNumeric).unwrap().counter("invalid"), 1);
        assert_eq!(report.stage(Stage::DropIncomplete).unwrap().rows_dropped(), 1);
        assert_eq!(report.stage(Stage::FilterRange).unwrap().counter("negative"), 1);
    }

    #[test]
    fn test_row_count_never_grows() {
        let outcome = Pipeline::default().run(sample()).unwrap();
        for stage in &outcome.report.stages {
            assert!(stage.rows_out <= stage.rows_in, "{} grew the table", stage.stage);
        }
        for pair in outcome.report.stages.windows(2) {
            assert_eq!(pair[0].rows_out, pair[1].rows_in);
        }
    }

    #[test]
    fn test_schema_error_aborts_run() {
        let table = Table::from_text_rows(&["Qty", "Item"], &[&["3", "Widget"]]);
        let err = Pipeline::default().run(table).unwrap_err();
        assert!(matches!(err, CleanerError::Schema { .. }));
    }
}
