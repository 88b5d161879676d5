use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::constants;
use crate::error::{CleanerError, Result};

/// Top-level configuration, read from `sales_cleaner.toml`.
///
/// Every section is optional; missing keys fall back to defaults. Precedence
/// is defaults < file < environment < command line.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub paths: PathsConfig,
    pub csv: CsvConfig,
    pub schema: SchemaConfig,
    pub cleaning: CleaningConfig,
    pub logging: LoggingConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Optional JSON run report
    pub report: Option<PathBuf>,
    /// Optional Prometheus text snapshot written at the end of a run
    pub metrics: Option<PathBuf>,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(constants::DEFAULT_INPUT_PATH),
            output: PathBuf::from(constants::DEFAULT_OUTPUT_PATH),
            report: None,
            metrics: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CsvConfig {
    pub delimiter: char,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self { delimiter: ',' }
    }
}

impl CsvConfig {
    /// The delimiter as the single byte the csv reader/writer expects
    pub fn delimiter_byte(&self) -> Result<u8> {
        if self.delimiter.is_ascii() {
            Ok(self.delimiter as u8)
        } else {
            Err(CleanerError::Config(format!(
                "delimiter must be a single ASCII character, got '{}'",
                self.delimiter
            )))
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SchemaConfig {
    pub price_column: String,
    pub quantity_column: String,
    /// Extra columns that must exist and be filled in on every row
    pub required_columns: Vec<String>,
    /// Columns that must be filled in, but only when the file has them
    pub required_if_present: Vec<String>,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            price_column: constants::PRICE_COLUMN.to_string(),
            quantity_column: constants::QUANTITY_COLUMN.to_string(),
            required_columns: Vec::new(),
            required_if_present: vec![constants::DATE_SOLD_COLUMN.to_string()],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CleaningConfig {
    /// Remove stray double quotes from text cells
    pub strip_quotes: bool,
    /// Characters discarded around numeric values
    pub currency_symbols: String,
    /// Trailing unit words discarded from numeric values (case-insensitive)
    pub unit_suffixes: Vec<String>,
    /// Numeric cell contents treated as missing rather than invalid
    pub null_tokens: Vec<String>,
    /// Swap price and quantity on rows that look transposed
    pub swap_price_qty: bool,
    /// Drop rows whose price or quantity exceeds this ceiling
    pub max_value: Option<f64>,
    /// Drop rows identical to an earlier row
    pub drop_duplicates: bool,
}

impl Default for CleaningConfig {
    fn default() -> Self {
        Self {
            strip_quotes: true,
            currency_symbols: constants::DEFAULT_CURRENCY_SYMBOLS.to_string(),
            unit_suffixes: constants::DEFAULT_UNIT_SUFFIXES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            null_tokens: constants::DEFAULT_NULL_TOKENS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            swap_price_qty: false,
            max_value: None,
            drop_duplicates: false,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Directory for JSON log files; console only when unset
    pub directory: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Rows of the cleaned table echoed to stdout after a run
    pub preview_rows: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            preview_rows: constants::DEFAULT_PREVIEW_ROWS,
        }
    }
}

impl Config {
    /// Load configuration from `path`, or from `sales_cleaner.toml` in the
    /// working directory when it exists, or fall back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Path::new(constants::DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)?
                } else {
                    debug!("No config file found, using defaults");
                    Self::default()
                }
            }
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let config_content = fs::read_to_string(path).map_err(|e| {
            CleanerError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&config_content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// Apply `SALES_CLEANER_INPUT` / `SALES_CLEANER_OUTPUT` from the process environment
    pub fn apply_env(&mut self) {
        self.apply_env_with(|key| std::env::var(key).ok());
    }

    /// Apply path overrides from an arbitrary variable lookup
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(input) = non_empty(constants::ENV_INPUT_PATH) {
            self.paths.input = PathBuf::from(input);
        }
        if let Some(output) = non_empty(constants::ENV_OUTPUT_PATH) {
            self.paths.output = PathBuf::from(output);
        }
    }

    /// Apply command-line path overrides
    pub fn apply_overrides(&mut self, input: Option<PathBuf>, output: Option<PathBuf>) {
        if let Some(input) = input {
            self.paths.input = input;
        }
        if let Some(output) = output {
            self.paths.output = output;
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.csv.delimiter_byte()?;

        let price = crate::pipeline::processing::columns::canonical_column_name(
            &self.schema.price_column,
        );
        let quantity = crate::pipeline::processing::columns::canonical_column_name(
            &self.schema.quantity_column,
        );
        if price.is_empty() || quantity.is_empty() {
            return Err(CleanerError::Config(
                "price_column and quantity_column must not be empty".to_string(),
            ));
        }
        if price == quantity {
            return Err(CleanerError::Config(format!(
                "price_column and quantity_column both resolve to '{}'",
                price
            )));
        }

        if let Some(max) = self.cleaning.max_value {
            if !max.is_finite() || max < 0.0 {
                return Err(CleanerError::Config(format!(
                    "max_value must be a non-negative number, got {}",
                    max
                )));
            }
        }

        Ok(())
    }
}
