use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Load-time errors (fatal at startup)
// ---------------------------------------------------------------------------

/// Failure to turn a file into a [`Table`](crate::data::model::Table).
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("cannot open {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV is not readable: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("CSV line {line}: {reason}")]
    Malformed { line: u64, reason: String },
}

// ---------------------------------------------------------------------------
// Recoverable errors raised while charting
// ---------------------------------------------------------------------------

/// An aggregation that needs at least one row received none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no records match the current filters")]
pub struct EmptyResultError;

/// A smoker value outside the two-valued domain reached the colour step.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("smoker value '{0}' has no colour mapping")]
pub struct UnmappedCategoryError(pub String);
