use thiserror::Error;

#[derive(Error, Debug)]
pub enum CleanerError {
    #[error("Schema error: missing required column(s) [{}] (found: [{}])", .missing.join(", "), .found.join(", "))]
    Schema {
        missing: Vec<String>,
        found: Vec<String>,
    },

    #[error("Schema error: more than one header normalizes to '{0}'")]
    DuplicateColumn(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Excel error: {0}")]
    Excel(String),

    #[error("No data: the file '{0}' appears to be empty")]
    EmptyInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl CleanerError {
    /// Process exit status for this error
    pub fn exit_code(&self) -> u8 {
        match self {
            CleanerError::Schema { .. } | CleanerError::DuplicateColumn(_) => 2,
            CleanerError::Io(_)
            | CleanerError::Csv(_)
            | CleanerError::Excel(_)
            | CleanerError::EmptyInput(_)
            | CleanerError::Json(_) => 3,
            CleanerError::Config(_) | CleanerError::Toml(_) => 4,
        }
    }

    pub fn is_schema_error(&self) -> bool {
        matches!(self, CleanerError::Schema { .. } | CleanerError::DuplicateColumn(_))
    }
}

pub type Result<T> = std::result::Result<T, CleanerError>;
