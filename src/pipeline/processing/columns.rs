use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use tracing::debug;

use crate::error::{CleanerError, Result};
use crate::pipeline::rules::CleaningRules;
use crate::pipeline::processing::StageOutcome;
use crate::table::Table;

/// Any run of characters that is not a letter or digit (underscores included)
static SEPARATOR_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\p{Alphabetic}\p{Nd}]+").unwrap());

/// Canonical form of a header label: trimmed, lowercase, separators collapsed
/// to single underscores, no leading or trailing underscore.
///
/// `" Unit  Price ($) "` becomes `"unit_price"`.
pub fn canonical_column_name(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();
    SEPARATOR_RUN
        .replace_all(&lowered, "_")
        .trim_matches('_')
        .to_string()
}

/// Rename every column to its canonical form and check the required set.
///
/// Headers that normalize to nothing are named `column_<n>` after their
/// 1-based position. Fails when two headers collapse to the same name or a
/// required column is missing; rows are never looked at.
pub fn normalize_columns(rules: &CleaningRules, table: Table) -> Result<StageOutcome> {
    let mut seen = HashSet::new();
    let mut canonical = Vec::with_capacity(table.columns().len());
    let mut renamed = 0;

    for (index, raw) in table.columns().iter().enumerate() {
        let mut name = canonical_column_name(raw);
        if name.is_empty() {
            name = format!("column_{}", index + 1);
        }
        if name != *raw {
            debug!("Renamed column '{}' -> '{}'", raw, name);
            renamed += 1;
        }
        if !seen.insert(name.clone()) {
            return Err(CleanerError::DuplicateColumn(name));
        }
        canonical.push(name);
    }

    let missing: Vec<String> = rules
        .schema_columns()
        .into_iter()
        .filter(|required| !canonical.iter().any(|c| c == required))
        .map(str::to_string)
        .collect();
    if !missing.is_empty() {
        return Err(CleanerError::Schema {
            missing,
            found: canonical,
        });
    }

    Ok(StageOutcome::new(table.with_columns(canonical)).with_counter("renamed", renamed))
}
