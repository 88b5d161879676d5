use tracing::debug;

use crate::pipeline::processing::StageOutcome;
use crate::pipeline::rules::CleaningRules;
use crate::table::{CellValue, Table};

/// Drop rows with an absent required cell or a numeric cell that is not a
/// number. A required column the header lacks counts as absent on every row.
pub fn drop_incomplete_rows(rules: &CleaningRules, table: Table) -> StageOutcome {
    let required: Vec<Option<usize>> = rules
        .required_for(table.columns())
        .iter()
        .map(|name| table.column_index(name))
        .collect();
    let numeric: Vec<Option<usize>> = rules
        .numeric_columns()
        .iter()
        .map(|name| table.column_index(name))
        .collect();

    let mut missing_required = 0;
    let mut invalid_numeric = 0;

    let table = table.retain_rows(|row| {
        let is_number = |index: &Option<usize>| {
            matches!(index.and_then(|i| row.get(i)), Some(CellValue::Number(_)))
        };
        let is_present = |index: &Option<usize>| {
            index
                .and_then(|i| row.get(i))
                .is_some_and(|cell| !cell.is_absent())
        };

        if !required.iter().all(is_present) {
            missing_required += 1;
            return false;
        }
        if !numeric.iter().all(is_number) || row.cells().iter().any(CellValue::is_invalid) {
            invalid_numeric += 1;
            return false;
        }
        true
    });

    debug!(
        "Dropped {} rows with missing required fields and {} with invalid numbers",
        missing_required, invalid_numeric
    );

    StageOutcome::new(table)
        .with_counter("missing_required", missing_required)
        .with_counter("invalid_numeric", invalid_numeric)
}
