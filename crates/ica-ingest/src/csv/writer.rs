//! CSV output for normalized tables.

use std::io::Write;
use std::path::Path;

use polars::prelude::DataFrame;
use tracing::debug;

use crate::error::{IngestError, Result};
use crate::polars_utils::any_to_string;

use super::options::WriteOptions;

/// Writes `df` as CSV, creating parent directories as needed.
///
/// Nulls are written as empty cells and floats without trailing zeros.
pub fn write_csv_table(df: &DataFrame, path: &Path, options: &WriteOptions) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|source| IngestError::FileWrite {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let file = std::fs::File::create(path).map_err(|source| IngestError::FileWrite {
        path: path.to_path_buf(),
        source,
    })?;
    write_to(df, std::io::BufWriter::new(file), options, path)?;
    debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "wrote CSV table"
    );
    Ok(())
}

/// Renders `df` as CSV text.
pub fn write_csv_string(df: &DataFrame, options: &WriteOptions) -> Result<String> {
    let mut buffer = Vec::new();
    write_to(df, &mut buffer, options, Path::new("<memory>"))?;
    String::from_utf8(buffer).map_err(|e| IngestError::CsvWrite {
        path: Path::new("<memory>").to_path_buf(),
        message: e.to_string(),
    })
}

fn write_to<W: Write>(df: &DataFrame, out: W, options: &WriteOptions, origin: &Path) -> Result<()> {
    let csv_error = |err: csv::Error| IngestError::CsvWrite {
        path: origin.to_path_buf(),
        message: err.to_string(),
    };
    let mut writer = csv::WriterBuilder::new()
        .delimiter(options.delimiter)
        .from_writer(out);

    writer
        .write_record(df.get_column_names().iter().map(|name| name.as_str()))
        .map_err(csv_error)?;

    let columns = df.get_columns();
    let mut record = Vec::with_capacity(columns.len());
    for row in 0..df.height() {
        record.clear();
        for column in columns {
            record.push(any_to_string(column.get(row)?));
        }
        writer.write_record(&record).map_err(csv_error)?;
    }
    writer.flush().map_err(|source| IngestError::FileWrite {
        path: origin.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{Column, IntoColumn, NamedFrom, Series};

    fn sample() -> DataFrame {
        let columns: Vec<Column> = vec![
            Series::new("nm_municipio".into(), vec![Some("Belo Horizonte"), Some("Contagem")])
                .into_column(),
            Series::new("ano".into(), vec![2020i64, 2021]).into_column(),
            Series::new("IN022".into(), vec![Some(1234.56f64), None]).into_column(),
        ];
        DataFrame::new(columns).unwrap()
    }

    #[test]
    fn test_writes_header_and_rows() {
        let text = write_csv_string(&sample(), &WriteOptions::default()).unwrap();
        assert_eq!(
            text,
            "nm_municipio,ano,IN022\nBelo Horizonte,2020,1234.56\nContagem,2021,\n"
        );
    }

    #[test]
    fn test_custom_delimiter() {
        let options = WriteOptions::default().with_delimiter(b';');
        let text = write_csv_string(&sample(), &options).unwrap();
        assert!(text.starts_with("nm_municipio;ano;IN022\n"));
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("processed").join("dataset.csv");
        write_csv_table(&sample(), &path, &WriteOptions::default()).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("nm_municipio,ano,IN022\n"));
    }
}
