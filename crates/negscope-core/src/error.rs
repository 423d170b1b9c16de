use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading, featurizing, or writing corpus data.
#[derive(Debug, Error)]
pub enum NegscopeError {
    /// A file could not be opened, read, or written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A row did not have the expected number of tab-separated columns.
    #[error("line {line}: expected {expected} columns, found {found}")]
    MalformedRow {
        /// 1-based line number in the input file.
        line: usize,
        /// Expected column count.
        expected: usize,
        /// Actual column count.
        found: usize,
    },

    /// A numeric or boolean cell could not be parsed.
    #[error("line {line}: cannot parse {column} value {value:?}")]
    FieldParse {
        /// 1-based line number in the input file.
        line: usize,
        /// Column name as defined by the corpus schema.
        column: &'static str,
        /// The offending cell contents.
        value: String,
    },

    /// The flattened prediction count does not match the row count of the
    /// table the predictions are being written into.
    #[error("prediction count mismatch for {path:?}: {expected} rows, {found} predictions")]
    PredictionCountMismatch {
        /// The original table being rewritten.
        path: PathBuf,
        /// Number of rows in the original table.
        expected: usize,
        /// Number of flattened predicted labels.
        found: usize,
    },
}

/// Result type alias for negscope-core operations.
pub type Result<T> = std::result::Result<T, NegscopeError>;
