//! Error types shared by every statement adapter.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ParseError>;

/// Why a statement could not be normalized.
///
/// An empty filtered set is not an error: it yields zero totals.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// A column the distributor profile relies on is absent from the header row.
    #[error("missing required column {column:?}")]
    SchemaMismatch { column: String },

    /// The file could not be read as the expected format.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error("tax rate must be between 0 and 100 percent, got {0}")]
    InvalidTaxRate(f64),
}

impl ParseError {
    pub fn missing_column(column: impl Into<String>) -> Self {
        ParseError::SchemaMismatch {
            column: column.into(),
        }
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        ParseError::MalformedInput(msg.into())
    }
}

/// Returned when a distributor identifier does not name a known distributor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown distributor {0:?} (expected one of: fuga, altafonte, onerpm, onerpm-share-in)")]
pub struct UnknownDistributor(pub String);
