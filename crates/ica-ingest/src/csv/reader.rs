//! CSV reading into string-typed DataFrames.
//!
//! Every column is loaded as String; typing is the normalizer's job. Empty
//! cells become null.

use std::collections::BTreeSet;
use std::io::Read;
use std::path::{Path, PathBuf};

use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};
use tracing::debug;

use crate::error::{IngestError, Result};

use super::options::ReadOptions;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Reads a CSV file into a DataFrame of String columns.
///
/// The first record is the header. Header names are trimmed and a leading
/// UTF-8 BOM is dropped. Records shorter than the header are padded with
/// nulls; longer records are an error.
pub fn read_csv_table(path: &Path, options: &ReadOptions) -> Result<DataFrame> {
    let file = std::fs::File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;
    let df = read_from(file, options, path)?;
    debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "loaded CSV table"
    );
    Ok(df)
}

/// Reads CSV text held in memory.
pub fn read_csv_str(content: &str, options: &ReadOptions) -> Result<DataFrame> {
    read_from(content.as_bytes(), options, Path::new("<memory>"))
}

fn read_from<R: Read>(input: R, options: &ReadOptions, origin: &Path) -> Result<DataFrame> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(input);
    let mut records = reader.byte_records();

    let header = match records.next() {
        Some(record) => record.map_err(|e| csv_parse(origin, &e))?,
        None => {
            return Err(IngestError::EmptyCsv {
                path: origin.to_path_buf(),
            });
        }
    };
    let headers = decode_headers(&header, options, origin)?;

    let mut columns: Vec<Vec<Option<String>>> = vec![Vec::new(); headers.len()];
    for record in records {
        let record = record.map_err(|e| csv_parse(origin, &e))?;
        let line = record.position().map_or(0, csv::Position::line);
        if record.len() > headers.len() {
            return Err(IngestError::CsvParse {
                path: origin.to_path_buf(),
                message: format!(
                    "line {line} has {} fields, expected {}",
                    record.len(),
                    headers.len()
                ),
            });
        }
        for (idx, values) in columns.iter_mut().enumerate() {
            let cell = match record.get(idx) {
                Some(bytes) if !bytes.is_empty() => Some(
                    options
                        .encoding
                        .decode(bytes)
                        .ok_or_else(|| encoding_error(origin, line, options))?
                        .into_owned(),
                ),
                _ => None,
            };
            values.push(cell);
        }
    }

    let columns: Vec<Column> = headers
        .into_iter()
        .zip(columns)
        .map(|(name, values)| Series::new(name.into(), values).into_column())
        .collect();
    Ok(DataFrame::new(columns)?)
}

fn decode_headers(header: &csv::ByteRecord, options: &ReadOptions, origin: &Path) -> Result<Vec<String>> {
    let mut seen = BTreeSet::new();
    let mut headers = Vec::with_capacity(header.len());
    for (index, raw) in header.iter().enumerate() {
        let raw = if index == 0 {
            raw.strip_prefix(UTF8_BOM).unwrap_or(raw)
        } else {
            raw
        };
        let name = options
            .encoding
            .decode(raw)
            .ok_or_else(|| encoding_error(origin, 1, options))?
            .trim()
            .to_string();
        if name.is_empty() {
            return Err(IngestError::EmptyColumnName {
                path: origin.to_path_buf(),
                index,
            });
        }
        if !seen.insert(name.clone()) {
            return Err(IngestError::DuplicateHeader {
                path: origin.to_path_buf(),
                column: name,
            });
        }
        headers.push(name);
    }
    Ok(headers)
}

fn csv_parse(origin: &Path, err: &csv::Error) -> IngestError {
    IngestError::CsvParse {
        path: origin.to_path_buf(),
        message: err.to_string(),
    }
}

fn encoding_error(origin: &Path, line: u64, options: &ReadOptions) -> IngestError {
    IngestError::Encoding {
        path: PathBuf::from(origin),
        line,
        encoding: options.encoding.label(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csv::options::TextEncoding;
    use polars::prelude::DataType;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file
    }

    fn cell(df: &DataFrame, column: &str, row: usize) -> Option<String> {
        df.column(column)
            .unwrap()
            .str()
            .unwrap()
            .get(row)
            .map(str::to_string)
    }

    #[test]
    fn test_reads_every_column_as_string() {
        let file = create_temp_csv(b"ano,IN022\n2020,\"5,0\"\n2021,120\n");
        let df = read_csv_table(file.path(), &ReadOptions::default()).unwrap();

        assert_eq!(df.shape(), (2, 2));
        assert_eq!(df.column("ano").unwrap().dtype(), &DataType::String);
        assert_eq!(df.column("IN022").unwrap().dtype(), &DataType::String);
        assert_eq!(cell(&df, "IN022", 0).as_deref(), Some("5,0"));
        assert_eq!(cell(&df, "ano", 1).as_deref(), Some("2021"));
    }

    #[test]
    fn test_empty_cells_are_null_and_short_rows_padded() {
        let df = read_csv_str("a,b,c\n1,,x\n2\n", &ReadOptions::default()).unwrap();

        assert_eq!(cell(&df, "b", 0), None);
        assert_eq!(cell(&df, "c", 0).as_deref(), Some("x"));
        assert_eq!(cell(&df, "b", 1), None);
        assert_eq!(cell(&df, "c", 1), None);
    }

    #[test]
    fn test_whitespace_is_preserved_in_cells() {
        let df = read_csv_str("tipo\nÁgua   \n", &ReadOptions::default()).unwrap();
        assert_eq!(cell(&df, "tipo", 0).as_deref(), Some("Água   "));
    }

    #[test]
    fn test_strips_bom_and_trims_headers() {
        let file = create_temp_csv(b"\xEF\xBB\xBFMunic\xC3\xADpio , ano\nBelo Horizonte,2020\n");
        let df = read_csv_table(file.path(), &ReadOptions::default()).unwrap();
        let names: Vec<String> = df
            .get_column_names()
            .into_iter()
            .map(|name| name.to_string())
            .collect();
        assert_eq!(names, vec!["Município", "ano"]);
    }

    #[test]
    fn test_semicolon_delimiter() {
        let options = ReadOptions::default().with_delimiter(b';');
        let df = read_csv_str("ano;IN022\n2020;5,0\n", &options).unwrap();
        assert_eq!(cell(&df, "IN022", 0).as_deref(), Some("5,0"));
    }

    #[test]
    fn test_latin1_input() {
        let file = create_temp_csv(b"Munic\xedpio\nS\xe3o Paulo\n");
        let utf8 = read_csv_table(file.path(), &ReadOptions::default());
        assert!(matches!(utf8, Err(IngestError::Encoding { line: 1, .. })));

        let options = ReadOptions::default().with_encoding(TextEncoding::Latin1);
        let df = read_csv_table(file.path(), &options).unwrap();
        assert_eq!(cell(&df, "Município", 0).as_deref(), Some("São Paulo"));
    }

    #[test]
    fn test_header_only_file_gives_empty_table() {
        let df = read_csv_str("ano,IN022\n", &ReadOptions::default()).unwrap();
        assert_eq!(df.shape(), (0, 2));
    }

    #[test]
    fn test_rejects_empty_and_malformed_files() {
        assert!(matches!(
            read_csv_str("", &ReadOptions::default()),
            Err(IngestError::EmptyCsv { .. })
        ));
        assert!(matches!(
            read_csv_str("a,a\n1,2\n", &ReadOptions::default()),
            Err(IngestError::DuplicateHeader { column, .. }) if column == "a"
        ));
        assert!(matches!(
            read_csv_str("a,,c\n", &ReadOptions::default()),
            Err(IngestError::EmptyColumnName { index: 1, .. })
        ));
        assert!(matches!(
            read_csv_str("a,b\n1,2,3\n", &ReadOptions::default()),
            Err(IngestError::CsvParse { .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_csv_table(&dir.path().join("dataset.csv"), &ReadOptions::default());
        assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
    }
}
