use crate::pipeline::processing::StageOutcome;
use crate::pipeline::rules::CleaningRules;
use crate::table::{CellValue, Table};

/// Strip and collapse whitespace inside a text value
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Trim every text cell; numeric, invalid and absent cells pass through.
///
/// Text that is empty once trimmed becomes absent.
pub fn trim_whitespace(rules: &CleaningRules, table: Table) -> StageOutcome {
    let mut trimmed = 0;
    let mut emptied = 0;

    let table = table.map_rows(|mut row| {
        for cell in row.cells_mut() {
            let CellValue::Text(text) = cell else {
                continue;
            };
            let cleaned = if rules.strip_quotes {
                collapse_whitespace(&text.replace('"', ""))
            } else {
                collapse_whitespace(text)
            };
            if cleaned.is_empty() {
                *cell = CellValue::Absent;
                emptied += 1;
            } else if cleaned != *text {
                *text = cleaned;
                trimmed += 1;
            }
        }
        row
    });

    StageOutcome::new(table)
        .with_counter("trimmed", trimmed)
        .with_counter("emptied", emptied)
}
