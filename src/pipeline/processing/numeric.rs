use once_cell::sync::Lazy;
use regex::Regex;

use crate::pipeline::processing::StageOutcome;
use crate::pipeline::rules::CleaningRules;
use crate::table::{CellValue, Table};

/// Unsigned digits with at most one decimal point: `12`, `12.5`, `12.`, `.5`
static NUMBER_BODY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:\d+(?:\.\d*)?|\.\d+)$").unwrap());

/// Result of coercing one cell's text
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Coerced {
    Number(f64),
    /// A configured null token such as `-`
    Null,
    Invalid,
}

fn split_sign(text: &str) -> (Option<char>, &str) {
    match text.chars().next() {
        Some(c @ ('+' | '-')) => (Some(c), text[1..].trim_start()),
        _ => (None, text),
    }
}

fn strip_unit_suffix<'a>(text: &'a str, suffixes: &[String]) -> &'a str {
    for suffix in suffixes {
        if text.len() <= suffix.len() {
            continue;
        }
        let cut = text.len() - suffix.len();
        if text.is_char_boundary(cut) && text[cut..].eq_ignore_ascii_case(suffix) {
            return text[..cut].trim_end();
        }
    }
    text
}

/// Parse the text of a numeric cell.
///
/// Accepts one optional sign (before or after a leading currency marker),
/// surrounding currency symbols and a trailing unit word, around digits with
/// at most one decimal point. Anything else is invalid.
pub fn parse_number(text: &str, rules: &CleaningRules) -> Coerced {
    let text = text.trim();
    if text.is_empty() {
        return Coerced::Invalid;
    }
    if rules.is_null_token(text) {
        return Coerced::Null;
    }

    let (mut sign, rest) = split_sign(text);
    let mut rest = rest.trim_start_matches(|c: char| rules.is_currency_symbol(c) || c.is_whitespace());
    if sign.is_none() {
        let (inner_sign, inner_rest) = split_sign(rest);
        sign = inner_sign;
        rest = inner_rest;
    }
    let rest = strip_unit_suffix(rest, &rules.unit_suffixes);
    let body = rest.trim_end_matches(|c: char| rules.is_currency_symbol(c) || c.is_whitespace());

    if !NUMBER_BODY.is_match(body) {
        return Coerced::Invalid;
    }
    let value = match body.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => return Coerced::Invalid,
    };

    match sign {
        // -0 is written back as 0
        Some('-') if value != 0.0 => Coerced::Number(-value),
        _ => Coerced::Number(value),
    }
}

/// Coerce the price and quantity columns.
///
/// Text becomes a number, an invalid marker, or absent for null tokens. Rows
/// are never dropped here.
pub fn coerce_numeric(rules: &CleaningRules, table: Table) -> StageOutcome {
    let indices: Vec<usize> = rules
        .numeric_columns()
        .iter()
        .filter_map(|name| table.column_index(name))
        .collect();

    let mut numbers = 0;
    let mut invalid = 0;
    let mut nulled = 0;

    let table = table.map_rows(|mut row| {
        let cells = row.cells_mut();
        for &index in &indices {
            let CellValue::Text(text) = &cells[index] else {
                continue;
            };
            let coerced = match parse_number(text, rules) {
                Coerced::Number(n) => {
                    numbers += 1;
                    CellValue::Number(n)
                }
                Coerced::Null => {
                    nulled += 1;
                    CellValue::Absent
                }
                Coerced::Invalid => {
                    invalid += 1;
                    CellValue::Invalid(text.clone())
                }
            };
            cells[index] = coerced;
        }
        row
    });

    StageOutcome::new(table)
        .with_counter("numbers", numbers)
        .with_counter("invalid", invalid)
        .with_counter("nulled", nulled)
}
