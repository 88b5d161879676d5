use std::collections::HashSet;

use crate::pipeline::processing::StageOutcome;
use crate::pipeline::rules::CleaningRules;
use crate::table::{CellValue, Row, Table};

/// Hashable view of a cell; numbers compare by bit pattern
#[derive(Hash, PartialEq, Eq)]
enum CellKey {
    Text(String),
    Number(u64),
    Invalid(String),
    Absent,
}

fn row_key(row: &Row) -> Vec<CellKey> {
    row.cells()
        .iter()
        .map(|cell| match cell {
            CellValue::Text(s) => CellKey::Text(s.clone()),
            CellValue::Number(n) => CellKey::Number(n.to_bits()),
            CellValue::Invalid(s) => CellKey::Invalid(s.clone()),
            CellValue::Absent => CellKey::Absent,
        })
        .collect()
}

/// Drop rows identical to an earlier row, keeping the first occurrence
pub fn drop_duplicate_rows(_rules: &CleaningRules, table: Table) -> StageOutcome {
    let mut seen = HashSet::new();
    let mut duplicates = 0;
    let table = table.retain_rows(|row| {
        let fresh = seen.insert(row_key(row));
        if !fresh {
            duplicates += 1;
        }
        fresh
    });
    StageOutcome::new(table).with_counter("duplicates", duplicates)
}
