use crate::config::{CleaningConfig, Config, SchemaConfig};
use crate::pipeline::processing::columns::canonical_column_name;

/// Resolved cleaning rules shared by every stage.
///
/// Column names are stored in canonical form and match tokens lowercased, so
/// stages can compare directly against a normalized table.
#[derive(Debug, Clone, PartialEq)]
pub struct CleaningRules {
    pub price_column: String,
    pub quantity_column: String,
    pub required_columns: Vec<String>,
    pub required_if_present: Vec<String>,
    pub strip_quotes: bool,
    pub currency_symbols: Vec<char>,
    pub unit_suffixes: Vec<String>,
    pub null_tokens: Vec<String>,
    pub swap_price_qty: bool,
    pub max_value: Option<f64>,
    pub drop_duplicates: bool,
}

impl CleaningRules {
    pub fn new(schema: &SchemaConfig, cleaning: &CleaningConfig) -> Self {
        let canonical = |names: &[String]| -> Vec<String> {
            names
                .iter()
                .map(|n| canonical_column_name(n))
                .filter(|n| !n.is_empty())
                .collect()
        };

        // Longest suffix first so "units" is tried before "unit"
        let mut unit_suffixes: Vec<String> = cleaning
            .unit_suffixes
            .iter()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();
        unit_suffixes.sort_by_key(|s| std::cmp::Reverse(s.len()));

        Self {
            price_column: canonical_column_name(&schema.price_column),
            quantity_column: canonical_column_name(&schema.quantity_column),
            required_columns: canonical(&schema.required_columns),
            required_if_present: canonical(&schema.required_if_present),
            strip_quotes: cleaning.strip_quotes,
            currency_symbols: cleaning.currency_symbols.chars().collect(),
            unit_suffixes,
            null_tokens: cleaning
                .null_tokens
                .iter()
                .map(|t| t.trim().to_lowercase())
                .collect(),
            swap_price_qty: cleaning.swap_price_qty,
            max_value: cleaning.max_value,
            drop_duplicates: cleaning.drop_duplicates,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.schema, &config.cleaning)
    }

    /// Columns coerced to numbers
    pub fn numeric_columns(&self) -> [&str; 2] {
        [self.price_column.as_str(), self.quantity_column.as_str()]
    }

    /// Columns that must exist after normalization, in report order
    pub fn schema_columns(&self) -> Vec<&str> {
        let mut columns: Vec<&str> = vec![self.price_column.as_str(), self.quantity_column.as_str()];
        for extra in &self.required_columns {
            if !columns.contains(&extra.as_str()) {
                columns.push(extra.as_str());
            }
        }
        columns
    }

    /// Columns that must be filled in on every retained row of a table with
    /// this header
    pub fn required_for(&self, header: &[String]) -> Vec<String> {
        let mut required: Vec<String> = self
            .schema_columns()
            .into_iter()
            .map(str::to_string)
            .collect();
        for name in &self.required_if_present {
            if header.contains(name) && !required.contains(name) {
                required.push(name.clone());
            }
        }
        required
    }

    pub fn is_null_token(&self, text: &str) -> bool {
        let lowered = text.to_lowercase();
        self.null_tokens.iter().any(|t| *t == lowered)
    }

    pub fn is_currency_symbol(&self, c: char) -> bool {
        self.currency_symbols.contains(&c)
    }
}

impl Default for CleaningRules {
    fn default() -> Self {
        Self::new(&SchemaConfig::default(), &CleaningConfig::default())
    }
}
