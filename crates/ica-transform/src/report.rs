//! Row accounting returned alongside a normalized table.

use serde::Serialize;

/// Row and column accounting for one normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NormalizeReport {
    /// Rows in the input table, sentinel rows included.
    pub input_rows: usize,
    /// Rows dropped by the reference-year sentinel filter.
    pub sentinel_rows_dropped: usize,
    /// Rows dropped because the target was null after coercion.
    pub missing_target_rows_dropped: usize,
    /// Numeric cells replaced with null in lenient mode.
    pub lenient_nulls: usize,
    /// Rows in the normalized table.
    pub output_rows: usize,
    /// Output column names in order.
    pub columns: Vec<String>,
}

impl NormalizeReport {
    pub fn dropped_rows(&self) -> usize {
        self.sentinel_rows_dropped + self.missing_target_rows_dropped
    }
}
