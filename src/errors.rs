use thiserror::Error;

/// Error type that captures reconstruction, merge, and storage failures.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Cannot merge account `{other}` into account `{target}`")]
    IdentityMismatch { target: String, other: String },
    #[error("Accounts do not share one currency: found {expected} and {found}")]
    CurrencyMismatch { expected: String, found: String },
    #[error("Invalid record: {0}")]
    InvalidRecord(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, AnalyzerError>;
