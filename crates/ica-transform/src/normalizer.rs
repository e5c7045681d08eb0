//! Dataset normalization: sentinel filter, projection, cleanup, coercion and
//! target filter, applied in that order.

use ica_model::{NormalizationSpec, NumericColumns};
use polars::prelude::{BooleanChunked, DataFrame, DataType, NewChunkedArray, PlSmallStr};
use tracing::{debug, info};

use crate::error::Result;
use crate::normalization::{coerce_integer, coerce_numeric, trim_trailing_whitespace};
use crate::projection::{ColumnPlan, SentinelCheck};
use crate::report::NormalizeReport;

/// Normalizer bound to a validated spec.
///
/// The spec is checked once on construction; each call then checks the
/// input schema before touching any row.
#[derive(Debug, Clone, Copy)]
pub struct DatasetNormalizer<'a> {
    spec: &'a NormalizationSpec,
}

impl<'a> DatasetNormalizer<'a> {
    pub fn new(spec: &'a NormalizationSpec) -> Result<Self> {
        spec.validate()?;
        Ok(Self { spec })
    }

    pub fn spec(&self) -> &'a NormalizationSpec {
        self.spec
    }

    /// Normalize a copy of `table`. The input is never modified.
    pub fn normalize(&self, table: &DataFrame) -> Result<DataFrame> {
        self.normalize_with_report(table).map(|(df, _)| df)
    }

    /// Replace `table` with its normalized form.
    ///
    /// On error the table is left exactly as it was.
    pub fn normalize_in_place(&self, table: &mut DataFrame) -> Result<NormalizeReport> {
        let (normalized, report) = self.normalize_with_report(table)?;
        *table = normalized;
        Ok(report)
    }

    /// Normalize a copy of `table` and account for dropped rows.
    pub fn normalize_with_report(&self, table: &DataFrame) -> Result<(DataFrame, NormalizeReport)> {
        let spec = self.spec;
        let plan = ColumnPlan::resolve(table, spec)?;
        let input_rows = table.height();

        let (filtered, origin) = match &plan.sentinel {
            Some(check) => filter_sentinel(table, check)?,
            None => (table.clone(), (0..input_rows).collect()),
        };
        let sentinel_rows_dropped = input_rows - filtered.height();
        debug!(dropped = sentinel_rows_dropped, "sentinel filter applied");

        let mut df = plan.project(&filtered)?;
        debug!(columns = df.width(), "columns projected and renamed");

        for field in &spec.categorical_fields {
            if let Some(trimmed) = trim_trailing_whitespace(df.column(field)?)? {
                df.with_column(trimmed)?;
            }
        }

        for field in &spec.integer_fields {
            let coerced = coerce_integer(df.column(field)?, &origin)?;
            df.with_column(coerced)?;
        }

        let mut lenient_nulls = 0usize;
        let numeric_fields = self.numeric_fields(&df);
        for field in &numeric_fields {
            let coerced = coerce_numeric(
                df.column(field)?,
                &spec.numeric_format,
                spec.parse_mode,
                &origin,
            )?;
            lenient_nulls += coerced.nulled;
            df.with_column(coerced.column)?;
        }
        debug!(
            integer = spec.integer_fields.len(),
            numeric = numeric_fields.len(),
            "columns coerced"
        );

        let before_target = df.height();
        let mask = df
            .column(&spec.target)?
            .as_materialized_series()
            .is_not_null();
        let df = df.filter(&mask)?;

        let report = NormalizeReport {
            input_rows,
            sentinel_rows_dropped,
            missing_target_rows_dropped: before_target - df.height(),
            lenient_nulls,
            output_rows: df.height(),
            columns: plan.output_names(),
        };
        info!(
            input_rows = report.input_rows,
            output_rows = report.output_rows,
            sentinel_dropped = report.sentinel_rows_dropped,
            missing_target_dropped = report.missing_target_rows_dropped,
            lenient_nulls = report.lenient_nulls,
            "normalization complete"
        );
        Ok((df, report))
    }

    /// Output columns coerced as numeric, the target always included.
    fn numeric_fields(&self, df: &DataFrame) -> Vec<String> {
        let spec = self.spec;
        let NumericColumns::Positional { offset } = &spec.numeric else {
            return spec.named_numeric_fields();
        };
        let mut fields: Vec<String> = df
            .get_columns()
            .iter()
            .skip(*offset)
            .filter(|column| column.dtype() == &DataType::String)
            .map(|column| column.name().to_string())
            .filter(|name| {
                !spec.integer_fields.contains(name) && !spec.categorical_fields.contains(name)
            })
            .collect();
        if !fields.contains(&spec.target) {
            fields.push(spec.target.clone());
        }
        fields
    }
}

/// Drop rows whose sentinel column equals the sentinel string exactly.
///
/// Returns the filtered table and, for each kept row, its input row index.
fn filter_sentinel(table: &DataFrame, check: &SentinelCheck) -> Result<(DataFrame, Vec<usize>)> {
    let column = table.column(&check.column)?;
    if column.dtype() != &DataType::String {
        return Ok((table.clone(), (0..table.height()).collect()));
    }
    let keep: Vec<bool> = column
        .str()?
        .iter()
        .map(|value| value != Some(check.sentinel.as_str()))
        .collect();
    let origin = keep
        .iter()
        .enumerate()
        .filter_map(|(idx, kept)| kept.then_some(idx))
        .collect();
    let mask = BooleanChunked::from_slice(PlSmallStr::from_static("keep"), &keep);
    Ok((table.filter(&mask)?, origin))
}

/// Normalize a copy of `table` with `spec`.
pub fn normalize(table: &DataFrame, spec: &NormalizationSpec) -> Result<DataFrame> {
    DatasetNormalizer::new(spec)?.normalize(table)
}

/// Normalize `table` in place; untouched on error.
pub fn normalize_in_place(table: &mut DataFrame, spec: &NormalizationSpec) -> Result<NormalizeReport> {
    DatasetNormalizer::new(spec)?.normalize_in_place(table)
}

/// Normalize a copy of `table` and report dropped rows.
pub fn normalize_with_report(
    table: &DataFrame,
    spec: &NormalizationSpec,
) -> Result<(DataFrame, NormalizeReport)> {
    DatasetNormalizer::new(spec)?.normalize_with_report(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ica_model::SentinelFilter;
    use polars::prelude::{Column, IntoColumn, NamedFrom, Series};

    fn strings(columns: Vec<(&str, Vec<Option<&str>>)>) -> DataFrame {
        let cols: Vec<Column> = columns
            .into_iter()
            .map(|(name, values)| Series::new(name.into(), values).into_column())
            .collect();
        DataFrame::new(cols).unwrap()
    }

    #[test]
    fn sentinel_filter_keeps_origin_rows() {
        let df = strings(vec![("ano", vec![Some("---"), Some("2020"), None, Some("---")])]);
        let check = SentinelCheck {
            column: "ano".to_string(),
            sentinel: "---".to_string(),
        };
        let (filtered, origin) = filter_sentinel(&df, &check).unwrap();
        assert_eq!(filtered.height(), 2);
        assert_eq!(origin, vec![1, 2]);
    }

    #[test]
    fn sentinel_match_is_exact() {
        let df = strings(vec![("ano", vec![Some(" ---"), Some("----"), Some("---")])]);
        let check = SentinelCheck {
            column: "ano".to_string(),
            sentinel: "---".to_string(),
        };
        let (filtered, _) = filter_sentinel(&df, &check).unwrap();
        assert_eq!(filtered.height(), 2);
    }

    #[test]
    fn positional_fields_skip_leading_and_typed_columns() {
        let spec = NormalizationSpec::new("IN022")
            .with_integer_field("ano")
            .with_positional_numeric(1);
        let df = strings(vec![
            ("nm", vec![Some("a")]),
            ("ano", vec![Some("2020")]),
            ("IN001", vec![Some("1,5")]),
            ("IN022", vec![Some("2,5")]),
        ]);
        let normalizer = DatasetNormalizer::new(&spec).unwrap();
        assert_eq!(normalizer.numeric_fields(&df), vec!["IN001", "IN022"]);
    }

    #[test]
    fn in_place_is_untouched_on_error() {
        let spec = NormalizationSpec::new("IN022")
            .with_column("IN022", "IN022")
            .with_sentinel_filter(SentinelFilter::new("IN022"));
        let mut df = strings(vec![("IN022", vec![Some("1,0"), Some("oops")])]);
        let original = df.clone();
        assert!(normalize_in_place(&mut df, &spec).is_err());
        assert!(df.equals_missing(&original));
    }
}
