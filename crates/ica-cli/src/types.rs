use std::path::PathBuf;
use std::time::Duration;

use ica_model::FieldRole;
use ica_transform::NormalizeReport;

#[derive(Debug)]
pub struct ProcessResult {
    pub input: PathBuf,
    /// `None` for a dry run.
    pub output: Option<PathBuf>,
    pub report_file: Option<PathBuf>,
    /// Preset name or config path.
    pub spec_source: String,
    pub report: NormalizeReport,
    pub column_types: Vec<ColumnType>,
    pub duration: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnType {
    pub name: String,
    pub dtype: String,
    pub role: Option<FieldRole>,
}

/// One line of `ica columns`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRow {
    /// `None` when every input column is kept as is.
    pub source: Option<String>,
    pub target: String,
    pub role: Option<FieldRole>,
}
