//! Cell-level normalization: locale numbers, integer casts, text cleanup.

pub mod coerce;
pub mod numeric;
pub mod text;

pub use coerce::{NumericCoercion, coerce_integer, coerce_numeric};
pub use numeric::{LocaleNumber, parse_i64, parse_locale_f64};
pub use text::trim_trailing_whitespace;
