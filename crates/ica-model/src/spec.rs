//! Normalization spec: which columns survive, how they are renamed and typed.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{FieldRole, Result, SpecError};
use crate::format::NumericFormat;

/// Sentinel marking a record without a valid reference year.
pub const DEFAULT_YEAR_SENTINEL: &str = "---";

/// One entry of the ordered rename map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRename {
    pub source: String,
    pub target: String,
}

impl ColumnRename {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// Truncates column names at the first occurrence of a delimiter.
///
/// Source headers such as `IN022 - Consumo médio percapita de água` embed a
/// description after the delimiter; with `" - "` the name becomes `IN022`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuffixRule {
    pub delimiter: String,
}

impl SuffixRule {
    pub fn new(delimiter: impl Into<String>) -> Self {
        Self {
            delimiter: delimiter.into(),
        }
    }

    /// Apply the rule to one column name. Trailing whitespace is always trimmed.
    pub fn apply(&self, name: &str) -> String {
        let head = match name.find(self.delimiter.as_str()) {
            Some(idx) if !self.delimiter.is_empty() => &name[..idx],
            _ => name,
        };
        head.trim_end().to_string()
    }
}

/// Drops rows whose source column holds the sentinel, compared before coercion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentinelFilter {
    /// Source column name (before rename).
    pub column: String,
    #[serde(default = "default_sentinel")]
    pub sentinel: String,
}

fn default_sentinel() -> String {
    DEFAULT_YEAR_SENTINEL.to_string()
}

impl SentinelFilter {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            sentinel: default_sentinel(),
        }
    }

    #[must_use]
    pub fn with_sentinel(mut self, sentinel: impl Into<String>) -> Self {
        self.sentinel = sentinel.into();
        self
    }
}

/// How numeric columns are selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericColumns {
    /// Explicit output column names.
    Named(Vec<String>),
    /// Every still-string column at index `>= offset` of the projected table.
    ///
    /// Deprecated: kept for exports processed with the older positional
    /// rule. Names play no part in the selection.
    Positional { offset: usize },
}

impl Default for NumericColumns {
    fn default() -> Self {
        Self::Named(Vec::new())
    }
}

/// Behavior when a numeric cell does not parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseMode {
    /// Fail the whole call.
    #[default]
    Strict,
    /// Replace the cell with null and continue.
    Lenient,
}

/// Full description of one normalization.
///
/// Field names (`integer_fields`, `numeric`, `categorical_fields`, `target`)
/// refer to output names, i.e. after the rename map and the suffix rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizationSpec {
    /// Ordered rename map. Empty keeps every input column in input order.
    #[serde(default)]
    pub columns: Vec<ColumnRename>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentinel_filter: Option<SentinelFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix_rule: Option<SuffixRule>,
    #[serde(default)]
    pub integer_fields: Vec<String>,
    #[serde(default)]
    pub numeric: NumericColumns,
    #[serde(default)]
    pub categorical_fields: Vec<String>,
    pub target: String,
    #[serde(default)]
    pub numeric_format: NumericFormat,
    #[serde(default)]
    pub parse_mode: ParseMode,
}

impl NormalizationSpec {
    /// Empty spec predicting `target`.
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            columns: Vec::new(),
            sentinel_filter: None,
            suffix_rule: None,
            integer_fields: Vec::new(),
            numeric: NumericColumns::default(),
            categorical_fields: Vec::new(),
            target: target.into(),
            numeric_format: NumericFormat::default(),
            parse_mode: ParseMode::default(),
        }
    }

    #[must_use]
    pub fn with_column(mut self, source: impl Into<String>, target: impl Into<String>) -> Self {
        self.columns.push(ColumnRename::new(source, target));
        self
    }

    #[must_use]
    pub fn with_sentinel_filter(mut self, filter: SentinelFilter) -> Self {
        self.sentinel_filter = Some(filter);
        self
    }

    #[must_use]
    pub fn with_suffix_rule(mut self, delimiter: impl Into<String>) -> Self {
        self.suffix_rule = Some(SuffixRule::new(delimiter));
        self
    }

    #[must_use]
    pub fn with_integer_field(mut self, field: impl Into<String>) -> Self {
        self.integer_fields.push(field.into());
        self
    }

    #[must_use]
    pub fn with_numeric_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.numeric = NumericColumns::Named(fields.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn with_positional_numeric(mut self, offset: usize) -> Self {
        self.numeric = NumericColumns::Positional { offset };
        self
    }

    #[must_use]
    pub fn with_categorical_field(mut self, field: impl Into<String>) -> Self {
        self.categorical_fields.push(field.into());
        self
    }

    #[must_use]
    pub fn with_numeric_format(mut self, format: NumericFormat) -> Self {
        self.numeric_format = format;
        self
    }

    #[must_use]
    pub fn with_parse_mode(mut self, mode: ParseMode) -> Self {
        self.parse_mode = mode;
        self
    }

    /// Output name of a column after the rename map entry and the suffix rule.
    pub fn output_name(&self, name: &str) -> String {
        match &self.suffix_rule {
            Some(rule) => rule.apply(name),
            None => name.to_string(),
        }
    }

    /// Output column names in order, or `None` when the rename map is empty
    /// and the output depends on the input table.
    pub fn output_names(&self) -> Option<Vec<String>> {
        if self.columns.is_empty() {
            return None;
        }
        Some(
            self.columns
                .iter()
                .map(|entry| self.output_name(&entry.target))
                .collect(),
        )
    }

    /// Named numeric fields followed by the target, without duplicates.
    ///
    /// For the positional strategy only the target is returned; the rest is
    /// resolved against the table.
    pub fn named_numeric_fields(&self) -> Vec<String> {
        let mut fields: Vec<String> = match &self.numeric {
            NumericColumns::Named(names) => names.clone(),
            NumericColumns::Positional { .. } => Vec::new(),
        };
        if !fields.contains(&self.target) {
            fields.push(self.target.clone());
        }
        let mut seen = BTreeSet::new();
        fields.retain(|field| seen.insert(field.clone()));
        fields
    }

    /// Role of an output column, `None` for pass-through text columns.
    pub fn role_of(&self, name: &str) -> Option<FieldRole> {
        if self.target == name {
            return Some(FieldRole::Target);
        }
        if self.integer_fields.iter().any(|field| field == name) {
            return Some(FieldRole::Integer);
        }
        if self.categorical_fields.iter().any(|field| field == name) {
            return Some(FieldRole::Categorical);
        }
        match &self.numeric {
            NumericColumns::Named(names) if names.iter().any(|field| field == name) => {
                Some(FieldRole::Numeric)
            }
            _ => None,
        }
    }

    /// Check the spec for internal consistency.
    pub fn validate(&self) -> Result<()> {
        if self.target.trim().is_empty() {
            return Err(SpecError::EmptyTarget);
        }
        if let Some(rule) = &self.suffix_rule
            && rule.delimiter.is_empty()
        {
            return Err(SpecError::EmptySuffixDelimiter);
        }
        if let Some(filter) = &self.sentinel_filter
            && filter.column.is_empty()
        {
            return Err(SpecError::EmptySentinelColumn);
        }
        self.numeric_format.validate()?;

        let mut sources = BTreeSet::new();
        let mut outputs = BTreeSet::new();
        for (index, entry) in self.columns.iter().enumerate() {
            if entry.source.is_empty() || entry.target.trim().is_empty() {
                return Err(SpecError::EmptyColumnName { index });
            }
            if !sources.insert(entry.source.as_str()) {
                return Err(SpecError::DuplicateSource {
                    column: entry.source.clone(),
                });
            }
            let output = self.output_name(&entry.target);
            if output.is_empty() {
                return Err(SpecError::EmptyColumnName { index });
            }
            if !outputs.insert(output.clone()) {
                return Err(SpecError::DuplicateTarget { column: output });
            }
        }

        let roles = self.field_roles();
        let mut assigned: Vec<(&str, FieldRole)> = Vec::new();
        for (field, role) in &roles {
            if let Some((_, first)) = assigned
                .iter()
                .find(|(name, existing)| name == field && existing != role)
            {
                // The target doubles as a numeric field.
                let numeric_target = matches!(
                    (first, role),
                    (FieldRole::Numeric, FieldRole::Target) | (FieldRole::Target, FieldRole::Numeric)
                );
                if !numeric_target {
                    return Err(SpecError::ConflictingRoles {
                        field: (*field).to_string(),
                        first: *first,
                        second: *role,
                    });
                }
            }
            assigned.push((*field, *role));
        }

        if !outputs.is_empty() {
            for (field, role) in roles {
                if !outputs.contains(field) {
                    return Err(SpecError::UnknownField {
                        field: field.to_string(),
                        role,
                    });
                }
            }
        }
        Ok(())
    }

    fn field_roles(&self) -> Vec<(&str, FieldRole)> {
        let mut roles: Vec<(&str, FieldRole)> = Vec::new();
        roles.extend(
            self.integer_fields
                .iter()
                .map(|field| (field.as_str(), FieldRole::Integer)),
        );
        if let NumericColumns::Named(names) = &self.numeric {
            roles.extend(names.iter().map(|field| (field.as_str(), FieldRole::Numeric)));
        }
        roles.extend(
            self.categorical_fields
                .iter()
                .map(|field| (field.as_str(), FieldRole::Categorical)),
        );
        roles.push((self.target.as_str(), FieldRole::Target));
        roles
    }

    /// Parse and validate a spec from JSON text.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let spec: Self = serde_json::from_str(content)?;
        spec.validate()?;
        Ok(spec)
    }

    /// Read, parse and validate a spec file.
    pub fn from_json_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| SpecError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
