//! Resolution of spec columns against an input table.
//!
//! Everything that can be checked from the schema alone is checked here,
//! before any row is touched.

use std::collections::HashSet;

use ica_model::NormalizationSpec;
use polars::prelude::{Column, DataFrame};

use crate::error::{NormalizeError, Result};

/// One surviving column: its name in the input table and its output name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Selection {
    pub input: String,
    pub output: String,
}

/// Sentinel filter resolved to an input column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SentinelCheck {
    pub column: String,
    pub sentinel: String,
}

#[derive(Debug, Clone)]
pub(crate) struct ColumnPlan {
    pub selections: Vec<Selection>,
    pub sentinel: Option<SentinelCheck>,
}

impl ColumnPlan {
    /// Match the spec against the table schema.
    ///
    /// Every rename entry and the sentinel filter must name an input column.
    /// All missing names are reported at once.
    pub fn resolve(table: &DataFrame, spec: &NormalizationSpec) -> Result<Self> {
        let names: Vec<String> = table
            .get_column_names()
            .into_iter()
            .map(|name| name.to_string())
            .collect();
        let present: HashSet<&str> = names.iter().map(String::as_str).collect();
        let mut missing: Vec<String> = Vec::new();

        let mut selections = Vec::with_capacity(spec.columns.len().max(names.len()));
        if spec.columns.is_empty() {
            for name in &names {
                selections.push(Selection {
                    input: name.clone(),
                    output: spec.output_name(name),
                });
            }
        } else {
            for entry in &spec.columns {
                let output = spec.output_name(&entry.target);
                if present.contains(entry.source.as_str()) {
                    selections.push(Selection {
                        input: entry.source.clone(),
                        output,
                    });
                } else {
                    missing.push(entry.source.clone());
                }
            }
        }

        let sentinel = match &spec.sentinel_filter {
            None => None,
            Some(filter) if present.contains(filter.column.as_str()) => Some(SentinelCheck {
                column: filter.column.clone(),
                sentinel: filter.sentinel.clone(),
            }),
            Some(filter) => {
                if !missing.contains(&filter.column) {
                    missing.push(filter.column.clone());
                }
                None
            }
        };

        if spec.columns.is_empty() {
            let outputs: HashSet<&str> = selections.iter().map(|s| s.output.as_str()).collect();
            let fields = spec
                .integer_fields
                .iter()
                .chain(spec.categorical_fields.iter())
                .cloned()
                .chain(spec.named_numeric_fields());
            for field in fields {
                if !outputs.contains(field.as_str()) && !missing.contains(&field) {
                    missing.push(field);
                }
            }
        }

        if !missing.is_empty() {
            return Err(NormalizeError::MissingColumn { columns: missing });
        }

        let mut seen = HashSet::new();
        for selection in &selections {
            if selection.output.is_empty() {
                return Err(NormalizeError::EmptyColumnName {
                    column: selection.input.clone(),
                });
            }
            if !seen.insert(selection.output.as_str()) {
                return Err(NormalizeError::DuplicateColumn {
                    column: selection.output.clone(),
                });
            }
        }

        Ok(Self {
            selections,
            sentinel,
        })
    }

    /// Keep the selected columns in plan order under their output names.
    pub fn project(&self, df: &DataFrame) -> Result<DataFrame> {
        let columns = self
            .selections
            .iter()
            .map(|selection| -> Result<Column> {
                let mut column = df.column(&selection.input)?.clone();
                column.rename(selection.output.as_str().into());
                Ok(column)
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(DataFrame::new(columns)?)
    }

    pub fn output_names(&self) -> Vec<String> {
        self.selections
            .iter()
            .map(|selection| selection.output.clone())
            .collect()
    }
}
