use crate::pipeline::processing::StageOutcome;
use crate::pipeline::rules::CleaningRules;
use crate::table::Table;

/// Keep rows whose price and quantity are both >= 0 (zero is valid) and, when
/// a ceiling is configured, no larger than it. Rows without numeric price or
/// quantity are dropped as well.
pub fn filter_range(rules: &CleaningRules, table: Table) -> StageOutcome {
    let price_idx = table.column_index(&rules.price_column);
    let qty_idx = table.column_index(&rules.quantity_column);

    let mut negative = 0;
    let mut above_max = 0;
    let mut not_numeric = 0;

    let table = table.retain_rows(|row| {
        let number = |index: Option<usize>| index.and_then(|i| row.get(i)).and_then(|c| c.as_number());
        let (Some(price), Some(qty)) = (number(price_idx), number(qty_idx)) else {
            not_numeric += 1;
            return false;
        };
        if price < 0.0 || qty < 0.0 {
            negative += 1;
            return false;
        }
        if let Some(max) = rules.max_value {
            if price > max || qty > max {
                above_max += 1;
                return false;
            }
        }
        true
    });

    StageOutcome::new(table)
        .with_counter("negative", negative)
        .with_counter("above_max", above_max)
        .with_counter("not_numeric", not_numeric)
}
