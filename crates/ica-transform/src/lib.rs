//! Normalization of raw water-utility indicator tables.
//!
//! Turns a string-typed extract into a typed dataset ready for regression
//! modeling. The steps always run in this order:
//!
//! 1. drop rows whose reference year is the `---` sentinel
//! 2. keep and rename the mapped columns (optionally stripping ` - ...` suffixes)
//! 3. strip trailing whitespace from categorical columns
//! 4. cast integer fields and parse locale-formatted numeric fields
//! 5. drop rows with a null target
//!
//! # Example
//!
//! ```ignore
//! use ica_model::Preset;
//! use ica_transform::normalize;
//!
//! let spec = Preset::WaterConsumption.spec();
//! let clean = normalize(&raw, &spec)?;
//! ```

pub mod error;
pub mod normalization;
pub mod normalizer;
mod projection;
pub mod report;

pub use error::{NormalizeError, Result};
pub use normalizer::{DatasetNormalizer, normalize, normalize_in_place, normalize_with_report};
pub use report::NormalizeReport;
