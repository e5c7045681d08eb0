//! Normalization spec model for water-utility indicator datasets.
//!
//! A [`NormalizationSpec`] describes which source columns survive, what they
//! are renamed to, how each output column is typed and which column is the
//! regression target. Specs are plain data: build them in code, load them
//! from JSON, or start from a [`Preset`].

pub mod error;
pub mod format;
pub mod presets;
pub mod spec;

pub use error::{FieldRole, Result, SpecError};
pub use format::NumericFormat;
pub use presets::{
    POSITIONAL_NUMERIC_OFFSET, Preset, REFERENCE_YEAR_COLUMN, TARGET_INDICATOR,
    WATER_CONSUMPTION_COLUMNS, WATER_CONSUMPTION_NUMERIC,
};
pub use spec::{
    ColumnRename, DEFAULT_YEAR_SENTINEL, NormalizationSpec, NumericColumns, ParseMode,
    SentinelFilter, SuffixRule,
};
