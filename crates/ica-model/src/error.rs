//! Error types for normalization spec loading and validation.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or validating a [`NormalizationSpec`](crate::NormalizationSpec).
#[derive(Debug, Error)]
pub enum SpecError {
    // === Loading Errors ===
    /// Spec file could not be read.
    #[error("failed to read spec file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Spec content is not valid JSON for the spec schema.
    #[error("invalid spec JSON: {0}")]
    Json(#[from] serde_json::Error),

    // === Validation Errors ===
    /// Target field name is empty.
    #[error("target field must not be empty")]
    EmptyTarget,

    /// A rename entry has an empty source or target name.
    #[error("rename entry {index} has an empty column name")]
    EmptyColumnName { index: usize },

    /// The same source column appears twice in the rename map.
    #[error("source column '{column}' is listed more than once")]
    DuplicateSource { column: String },

    /// Two rename entries produce the same output column.
    #[error("output column '{column}' is produced more than once")]
    DuplicateTarget { column: String },

    /// A field references a column that is not among the output columns.
    #[error("{role} field '{field}' is not an output column")]
    UnknownField { field: String, role: FieldRole },

    /// A field is assigned two incompatible roles.
    #[error("field '{field}' cannot be both {first} and {second}")]
    ConflictingRoles {
        field: String,
        first: FieldRole,
        second: FieldRole,
    },

    /// Suffix rule delimiter is empty.
    #[error("suffix delimiter must not be empty")]
    EmptySuffixDelimiter,

    /// Sentinel filter column is empty.
    #[error("sentinel filter column must not be empty")]
    EmptySentinelColumn,

    /// Decimal and thousands separators are the same character.
    #[error("decimal and thousands separators must differ (both '{separator}')")]
    AmbiguousSeparators { separator: char },

    /// Separator would collide with digits or letters.
    #[error("invalid numeric separator '{separator}'")]
    InvalidSeparator { separator: char },
}

/// Role of a named field inside a spec, used in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRole {
    Integer,
    Numeric,
    Categorical,
    Target,
}

impl std::fmt::Display for FieldRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Integer => "integer",
            Self::Numeric => "numeric",
            Self::Categorical => "categorical",
            Self::Target => "target",
        };
        f.write_str(label)
    }
}

/// Result type for spec operations.
pub type Result<T> = std::result::Result<T, SpecError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SpecError::UnknownField {
            field: "IN099".to_string(),
            role: FieldRole::Numeric,
        };
        assert_eq!(err.to_string(), "numeric field 'IN099' is not an output column");
    }

    #[test]
    fn test_conflicting_roles_display() {
        let err = SpecError::ConflictingRoles {
            field: "ano".to_string(),
            first: FieldRole::Integer,
            second: FieldRole::Target,
        };
        assert_eq!(
            err.to_string(),
            "field 'ano' cannot be both integer and target"
        );
    }
}
