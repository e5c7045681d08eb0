//! Error types for table normalization.

use ica_model::SpecError;
use thiserror::Error;

/// Errors raised by the normalizer. Every variant is fatal for the call.
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// The spec itself is inconsistent.
    #[error("invalid normalization spec: {0}")]
    InvalidSpec(#[from] SpecError),

    /// Columns required by the spec are absent from the input table.
    #[error("missing required column(s): {}", .columns.join(", "))]
    MissingColumn { columns: Vec<String> },

    /// A numeric cell does not parse after locale normalization.
    #[error("column '{column}' row {row}: cannot parse '{value}' as a number")]
    NumericParse {
        column: String,
        row: usize,
        value: String,
    },

    /// A cell cannot be cast to the required type.
    #[error("column '{column}' row {row}: cannot convert '{value}' to {expected}")]
    TypeCoercion {
        column: String,
        row: usize,
        value: String,
        expected: &'static str,
    },

    /// Two output columns share a name after renaming.
    #[error("output column '{column}' is produced more than once")]
    DuplicateColumn { column: String },

    /// Suffix stripping left nothing of a column name.
    #[error("column '{column}' has an empty name after suffix stripping")]
    EmptyColumnName { column: String },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for NormalizeError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for normalization.
pub type Result<T> = std::result::Result<T, NormalizeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_column_lists_every_name() {
        let err = NormalizeError::MissingColumn {
            columns: vec!["Município".to_string(), "IN022".to_string()],
        };
        assert_eq!(err.to_string(), "missing required column(s): Município, IN022");
    }

    #[test]
    fn numeric_parse_names_column_and_row() {
        let err = NormalizeError::NumericParse {
            column: "IN009".to_string(),
            row: 41,
            value: "n/d".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "column 'IN009' row 41: cannot parse 'n/d' as a number"
        );
    }
}
