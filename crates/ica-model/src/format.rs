//! Locale numeric formats.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SpecError};

/// Separator characters used by locale-formatted numeric strings.
///
/// Raw values are rewritten into the canonical form (`.` decimal point, no
/// grouping) before parsing: the thousands separator is removed first, then
/// the decimal separator is replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumericFormat {
    pub decimal_separator: char,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thousands_separator: Option<char>,
}

impl Default for NumericFormat {
    fn default() -> Self {
        Self::decimal_comma()
    }
}

impl NumericFormat {
    /// `,` decimal separator without grouping (`1234,56`).
    pub const fn decimal_comma() -> Self {
        Self {
            decimal_separator: ',',
            thousands_separator: None,
        }
    }

    /// `.` grouping with `,` decimal separator (`1.234,56`).
    pub const fn grouped() -> Self {
        Self {
            decimal_separator: ',',
            thousands_separator: Some('.'),
        }
    }

    /// Plain `.` decimal point (`1234.56`).
    pub const fn canonical() -> Self {
        Self {
            decimal_separator: '.',
            thousands_separator: None,
        }
    }

    /// Rewrite `raw` into canonical float syntax. Borrows when nothing changes.
    pub fn normalize<'a>(&self, raw: &'a str) -> Cow<'a, str> {
        let needs_grouping = self
            .thousands_separator
            .is_some_and(|sep| raw.contains(sep));
        let needs_decimal = self.decimal_separator != '.' && raw.contains(self.decimal_separator);
        if !needs_grouping && !needs_decimal {
            return Cow::Borrowed(raw);
        }
        let mut out = String::with_capacity(raw.len());
        for ch in raw.chars() {
            if Some(ch) == self.thousands_separator {
                continue;
            }
            if ch == self.decimal_separator {
                out.push('.');
            } else {
                out.push(ch);
            }
        }
        Cow::Owned(out)
    }

    pub fn validate(&self) -> Result<()> {
        for separator in std::iter::once(self.decimal_separator).chain(self.thousands_separator) {
            if separator.is_alphanumeric() || separator == '-' || separator == '+' {
                return Err(SpecError::InvalidSeparator { separator });
            }
        }
        if self.thousands_separator == Some(self.decimal_separator) {
            return Err(SpecError::AmbiguousSeparators {
                separator: self.decimal_separator,
            });
        }
        Ok(())
    }
}
