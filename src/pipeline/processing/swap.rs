use tracing::info;

use crate::constants::{SWAP_MAX_PRICE, SWAP_MIN_QUANTITY, SWAP_RATIO};
use crate::pipeline::processing::StageOutcome;
use crate::pipeline::rules::CleaningRules;
use crate::table::Table;

/// Whether a price/quantity pair looks like the two columns were swapped
pub fn looks_swapped(price: f64, quantity: f64) -> bool {
    price < SWAP_MAX_PRICE && quantity >= SWAP_MIN_QUANTITY && quantity > price * SWAP_RATIO
}

/// Swap price and quantity on rows that look transposed. Rows whose cells
/// are not both numbers are left alone.
pub fn swap_transposed_values(rules: &CleaningRules, table: Table) -> StageOutcome {
    let (Some(price_idx), Some(qty_idx)) = (
        table.column_index(&rules.price_column),
        table.column_index(&rules.quantity_column),
    ) else {
        return StageOutcome::new(table).with_counter("swapped", 0);
    };

    let mut swapped = 0;
    let table = table.map_rows(|mut row| {
        let cells = row.cells_mut();
        let pair = (cells[price_idx].as_number(), cells[qty_idx].as_number());
        if let (Some(price), Some(qty)) = pair {
            if looks_swapped(price, qty) {
                cells.swap(price_idx, qty_idx);
                swapped += 1;
            }
        }
        row
    });

    if swapped > 0 {
        info!("Swapped price/qty in {} rows based on heuristic", swapped);
    }
    StageOutcome::new(table).with_counter("swapped", swapped)
}
