use thiserror::Error;

/// Load-time failures. Any of these is fatal to startup; no partial
/// catalog is ever served.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog is missing required column: {0}")]
    MissingColumn(&'static str),
    #[error("invalid record at row {row}: {reason}")]
    InvalidRecord { row: usize, reason: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
}
