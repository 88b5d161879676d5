/// Default locations and canonical names shared across the codebase

// Default file locations (relative to the working directory)
pub const DEFAULT_INPUT_PATH: &str = "data/raw/sales_data_raw.csv";
pub const DEFAULT_OUTPUT_PATH: &str = "data/processed/sales_data_clean.csv";
pub const DEFAULT_CONFIG_FILE: &str = "sales_cleaner.toml";

// Environment variables for path configuration
pub const ENV_INPUT_PATH: &str = "SALES_CLEANER_INPUT";
pub const ENV_OUTPUT_PATH: &str = "SALES_CLEANER_OUTPUT";
pub const ENV_CONFIG_PATH: &str = "SALES_CLEANER_CONFIG";

// Canonical column names of the sales export
pub const PRICE_COLUMN: &str = "price";
pub const QUANTITY_COLUMN: &str = "qty";
pub const DATE_SOLD_COLUMN: &str = "date_sold";

// Numeric coercion defaults
pub const DEFAULT_CURRENCY_SYMBOLS: &str = "$€£¥₹";
pub const DEFAULT_UNIT_SUFFIXES: &[&str] = &["pcs", "pc", "units", "unit"];
pub const DEFAULT_NULL_TOKENS: &[&str] = &["-", "n/a", "na", "nan", "null"];

// Swap heuristic thresholds: a price below 1 next to a quantity of at least
// 100 that is more than ten times the price looks like swapped columns
pub const SWAP_MAX_PRICE: f64 = 1.0;
pub const SWAP_MIN_QUANTITY: f64 = 100.0;
pub const SWAP_RATIO: f64 = 10.0;

pub const DEFAULT_PREVIEW_ROWS: usize = 5;

/// Default log filter directive when RUST_LOG is unset
pub const DEFAULT_LOG_DIRECTIVE: &str = "sales_cleaner=info";
pub const LOG_FILE_PREFIX: &str = "sales_cleaner.log";
