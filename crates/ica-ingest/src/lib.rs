//! Table input/output for indicator extracts.
//!
//! This crate is the boundary between delimited text files and the
//! in-memory table (a Polars [`DataFrame`](polars::prelude::DataFrame)) the
//! normalizer works on.
//!
//! # Features
//!
//! - **CSV Loading**: every column read as String, empty cells as null,
//!   configurable delimiter, UTF-8 or Latin-1 input
//! - **CSV Writing**: nulls as empty cells, compact float formatting
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use ica_ingest::{ReadOptions, WriteOptions, read_csv_table, write_csv_table};
//!
//! let df = read_csv_table(Path::new("data/raw/dataset.csv"), &ReadOptions::default())?;
//! write_csv_table(&df, Path::new("data/processed/dataset.csv"), &WriteOptions::default())?;
//! ```

mod csv;
mod error;
mod polars_utils;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading / Writing ===
pub use csv::{
    ReadOptions, TextEncoding, WriteOptions, read_csv_str, read_csv_table, write_csv_string,
    write_csv_table,
};

// === Value Formatting ===
pub use polars_utils::{any_to_string, format_numeric};
