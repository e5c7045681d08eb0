//! Column type coercion with row-level error reporting.
//!
//! `origin` maps each position of the column back to its row in the input
//! table, so errors name the row the user sees in the source file.

use ica_model::{NumericFormat, ParseMode};
use polars::prelude::{Column, DataType, IntoColumn, NamedFrom, PlSmallStr, Series};
use tracing::warn;

use crate::error::{NormalizeError, Result};

use super::numeric::{LocaleNumber, parse_i64, parse_locale_f64, whole_f64_to_i64};

const NULL_DISPLAY: &str = "<null>";

/// A coerced numeric column and the number of cells nulled in lenient mode.
#[derive(Debug, Clone)]
pub struct NumericCoercion {
    pub column: Column,
    pub nulled: usize,
}

/// Casts a column to Int64. Nulls, fractions and unparseable strings fail.
pub fn coerce_integer(column: &Column, origin: &[usize]) -> Result<Column> {
    let name = column.name().clone();
    let values: Vec<i64> = match column.dtype() {
        DataType::String => column
            .str()?
            .iter()
            .enumerate()
            .map(|(idx, value)| {
                value.and_then(parse_i64).ok_or_else(|| {
                    type_error(&name, source_row(origin, idx), value.unwrap_or(NULL_DISPLAY), "integer")
                })
            })
            .collect::<Result<_>>()?,
        DataType::Float32 | DataType::Float64 => {
            let cast = column.cast(&DataType::Float64)?;
            cast.f64()?
                .iter()
                .enumerate()
                .map(|(idx, value)| {
                    value.and_then(whole_f64_to_i64).ok_or_else(|| {
                        let shown = value.map_or_else(|| NULL_DISPLAY.to_string(), |v| v.to_string());
                        type_error(&name, source_row(origin, idx), shown, "integer")
                    })
                })
                .collect::<Result<_>>()?
        }
        dtype if dtype.is_integer() => {
            let cast = column.strict_cast(&DataType::Int64)?;
            cast.i64()?
                .iter()
                .enumerate()
                .map(|(idx, value)| {
                    value.ok_or_else(|| {
                        type_error(&name, source_row(origin, idx), NULL_DISPLAY, "integer")
                    })
                })
                .collect::<Result<_>>()?
        }
        other => {
            return Err(type_error(
                &name,
                source_row(origin, 0),
                other.to_string(),
                "integer",
            ));
        }
    };
    Ok(Series::new(name, values).into_column())
}

/// Casts a column to Float64, parsing strings with the locale `format`.
///
/// Nulls and NaN stay null. Unparseable strings, blank ones included, fail
/// in strict mode and become null in lenient mode.
pub fn coerce_numeric(
    column: &Column,
    format: &NumericFormat,
    mode: ParseMode,
    origin: &[usize],
) -> Result<NumericCoercion> {
    let name = column.name().clone();
    let mut nulled = 0usize;
    let values: Vec<Option<f64>> = match column.dtype() {
        DataType::String => {
            let ca = column.str()?;
            let mut values = Vec::with_capacity(ca.len());
            for (idx, value) in ca.iter().enumerate() {
                let Some(raw) = value else {
                    values.push(None);
                    continue;
                };
                let parsed = match parse_locale_f64(raw, format) {
                    LocaleNumber::Value(v) => Some(v),
                    LocaleNumber::Missing => None,
                    LocaleNumber::Invalid => {
                        let row = source_row(origin, idx);
                        if mode == ParseMode::Strict {
                            return Err(NormalizeError::NumericParse {
                                column: name.to_string(),
                                row,
                                value: raw.to_string(),
                            });
                        }
                        warn!(column = %name, row, value = raw, "unparseable number replaced with null");
                        nulled += 1;
                        None
                    }
                };
                values.push(parsed);
            }
            values
        }
        DataType::Null => vec![None; column.len()],
        dtype if dtype.is_float() || dtype.is_integer() => {
            let cast = column.cast(&DataType::Float64)?;
            cast.f64()?
                .iter()
                .map(|value| value.filter(|v| !v.is_nan()))
                .collect()
        }
        other => {
            return Err(type_error(
                &name,
                source_row(origin, 0),
                other.to_string(),
                "float",
            ));
        }
    };
    Ok(NumericCoercion {
        column: Series::new(name, values).into_column(),
        nulled,
    })
}

fn source_row(origin: &[usize], idx: usize) -> usize {
    origin.get(idx).copied().unwrap_or(idx)
}

fn type_error(
    column: &PlSmallStr,
    row: usize,
    value: impl Into<String>,
    expected: &'static str,
) -> NormalizeError {
    NormalizeError::TypeCoercion {
        column: column.to_string(),
        row,
        value: value.into(),
        expected,
    }
}
