// Cleaning stages: each takes the previous table by value and returns a new one

pub mod columns;
pub mod dedupe;
pub mod missing;
pub mod numeric;
pub mod range;
pub mod swap;
pub mod whitespace;

use crate::table::Table;

/// Output of a single stage: the new table plus named counters for the report
#[derive(Debug, Clone, PartialEq)]
pub struct StageOutcome {
    pub table: Table,
    pub counters: Vec<(&'static str, usize)>,
}

impl StageOutcome {
    pub fn new(table: Table) -> Self {
        Self {
            table,
            counters: Vec::new(),
        }
    }

    pub fn with_counter(mut self, name: &'static str, value: usize) -> Self {
        self.counters.push((name, value));
        self
    }

    pub fn counter(&self, name: &str) -> Option<usize> {
        self.counters
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| *v)
    }
}
