//! Delimited text reading and writing.

mod options;
mod reader;
mod writer;

pub use options::{ReadOptions, TextEncoding, WriteOptions};
pub use reader::{read_csv_str, read_csv_table};
pub use writer::{write_csv_string, write_csv_table};
