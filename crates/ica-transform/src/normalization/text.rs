//! Categorical text cleanup.

use polars::prelude::{Column, DataType, IntoSeries, StringChunked};

use crate::error::Result;

/// Strips trailing whitespace from every value of a String column.
///
/// Returns `None` for non-string columns, which are left untouched.
pub fn trim_trailing_whitespace(column: &Column) -> Result<Option<Column>> {
    if column.dtype() != &DataType::String {
        return Ok(None);
    }
    let trimmed: StringChunked = column
        .str()?
        .iter()
        .map(|value| value.map(str::trim_end))
        .collect();
    Ok(Some(Column::from(
        trimmed.with_name(column.name().clone()).into_series(),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{IntoColumn, NamedFrom, Series};

    #[test]
    fn trims_only_trailing_whitespace() {
        let column = Series::new(
            "tipo_servico".into(),
            vec![Some("Água  "), Some("  Esgoto\t"), None],
        )
        .into_column();
        let trimmed = trim_trailing_whitespace(&column).unwrap().unwrap();
        let values: Vec<Option<&str>> = trimmed.str().unwrap().iter().collect();
        assert_eq!(values, vec![Some("Água"), Some("  Esgoto"), None]);
        assert_eq!(trimmed.name().as_str(), "tipo_servico");
    }

    #[test]
    fn skips_non_string_columns() {
        let column = Series::new("ano".into(), vec![2020i64]).into_column();
        assert!(trim_trailing_whitespace(&column).unwrap().is_none());
    }
}
