use std::fs;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use comfy_table::{Cell, Table};
use polars::prelude::DataFrame;
use tracing::{info, info_span};

use ica_ingest::{ReadOptions, TextEncoding, WriteOptions, read_csv_table, write_csv_table};
use ica_model::{NormalizationSpec, ParseMode, Preset};
use ica_transform::{NormalizeReport, normalize_with_report};

use crate::cli::{ProcessArgs, SpecArgs};
use crate::progress::StageSpinner;
use crate::summary::{apply_table_style, dim_cell, header_cell, role_cell};
use crate::types::{ColumnRow, ColumnType, ProcessResult};

/// Load the spec from `--config` or the selected preset and validate it.
pub fn load_spec(args: &SpecArgs) -> Result<NormalizationSpec> {
    let spec = match &args.config {
        Some(path) => NormalizationSpec::from_json_path(path)
            .with_context(|| format!("load spec {}", path.display()))?,
        None => Preset::from(args.preset).spec(),
    };
    spec.validate().context("validate spec")?;
    Ok(spec)
}

pub fn spec_source(args: &SpecArgs) -> String {
    match &args.config {
        Some(path) => path.display().to_string(),
        None => format!("preset {}", Preset::from(args.preset).name()),
    }
}

pub fn run_process(args: &ProcessArgs) -> Result<ProcessResult> {
    let start = Instant::now();
    let mut spec = load_spec(&args.spec)?;
    if args.lenient {
        spec = spec.with_parse_mode(ParseMode::Lenient);
    }
    let encoding = if args.latin1 {
        TextEncoding::Latin1
    } else {
        TextEncoding::Utf8
    };
    let read_options = ReadOptions::default()
        .with_delimiter(delimiter_byte(args.delimiter, "--delimiter")?)
        .with_encoding(encoding);
    let write_options = WriteOptions::default()
        .with_delimiter(delimiter_byte(args.output_delimiter, "--output-delimiter")?);
    let spinner = StageSpinner::new();

    // =========================================================================
    // Stage 1: Read the raw extract
    // =========================================================================
    spinner.stage("reading");
    let read_span = info_span!("read", path = %args.input.display(), encoding = encoding.label());
    let raw = read_span
        .in_scope(|| read_csv_table(&args.input, &read_options))
        .with_context(|| format!("read {}", args.input.display()))?;
    info!(rows = raw.height(), columns = raw.width(), "input loaded");

    // =========================================================================
    // Stage 2: Normalize
    // =========================================================================
    spinner.stage("normalizing");
    let (table, report) = info_span!("normalize")
        .in_scope(|| normalize_with_report(&raw, &spec))
        .context("normalize dataset")?;

    // =========================================================================
    // Stage 3: Write outputs
    // =========================================================================
    let output = if args.dry_run {
        info!("dry run, output not written");
        None
    } else {
        spinner.stage("writing");
        info_span!("write", path = %args.output.display())
            .in_scope(|| write_csv_table(&table, &args.output, &write_options))
            .with_context(|| format!("write {}", args.output.display()))?;
        Some(args.output.clone())
    };
    if let Some(path) = &args.report {
        write_report(path, &report)?;
    }

    info!(duration_ms = start.elapsed().as_millis(), "process complete");
    Ok(ProcessResult {
        input: args.input.clone(),
        output,
        report_file: args.report.clone(),
        spec_source: spec_source(&args.spec),
        column_types: column_types(&table, &spec),
        report,
        duration: start.elapsed(),
    })
}

pub fn run_columns(args: &SpecArgs) -> Result<()> {
    let spec = load_spec(args)?;
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Source"),
        header_cell("Target"),
        header_cell("Role"),
    ]);
    apply_table_style(&mut table);
    for row in column_rows(&spec) {
        let source = match row.source {
            Some(source) => Cell::new(source),
            None => dim_cell("*"),
        };
        table.add_row(vec![source, Cell::new(row.target), role_cell(row.role)]);
    }
    println!("Spec: {}", spec_source(args));
    if spec.columns.is_empty() {
        println!("All input columns are kept; only typed fields are listed.");
    }
    println!("{table}");
    Ok(())
}

pub fn run_spec(args: &SpecArgs) -> Result<()> {
    let spec = load_spec(args)?;
    println!("{}", spec.to_json_pretty().context("serialize spec")?);
    Ok(())
}

/// Rename map with roles, or the typed fields when every column is kept.
pub fn column_rows(spec: &NormalizationSpec) -> Vec<ColumnRow> {
    if !spec.columns.is_empty() {
        return spec
            .columns
            .iter()
            .map(|entry| {
                let target = spec.output_name(&entry.target);
                ColumnRow {
                    source: Some(entry.source.clone()),
                    role: spec.role_of(&target),
                    target,
                }
            })
            .collect();
    }
    let mut rows: Vec<ColumnRow> = Vec::new();
    let fields = spec
        .integer_fields
        .iter()
        .chain(spec.categorical_fields.iter())
        .cloned()
        .chain(spec.named_numeric_fields());
    for field in fields {
        if rows.iter().any(|row| row.target == field) {
            continue;
        }
        rows.push(ColumnRow {
            source: None,
            role: spec.role_of(&field),
            target: field,
        });
    }
    rows
}

fn column_types(table: &DataFrame, spec: &NormalizationSpec) -> Vec<ColumnType> {
    table
        .get_columns()
        .iter()
        .map(|column| {
            let name = column.name().to_string();
            ColumnType {
                dtype: column.dtype().to_string(),
                role: spec.role_of(&name),
                name,
            }
        })
        .collect()
}

fn write_report(path: &Path, report: &NormalizeReport) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(report).context("serialize report")?;
    fs::write(path, json).with_context(|| format!("write report {}", path.display()))?;
    Ok(())
}

/// Delimiters must be single ASCII bytes that cannot be confused with quoting.
pub fn delimiter_byte(delimiter: char, flag: &str) -> Result<u8> {
    if !delimiter.is_ascii() || matches!(delimiter, '"' | '\n' | '\r') {
        bail!("{flag} must be a single ASCII character other than a quote or newline");
    }
    Ok(delimiter as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ica_model::FieldRole;

    #[test]
    fn delimiter_must_be_ascii() {
        assert_eq!(delimiter_byte(';', "--delimiter").unwrap(), b';');
        assert_eq!(delimiter_byte('\t', "--delimiter").unwrap(), b'\t');
        assert!(delimiter_byte('§', "--delimiter").is_err());
        assert!(delimiter_byte('"', "--delimiter").is_err());
    }

    #[test]
    fn column_rows_follow_map_order() {
        let rows = column_rows(&Preset::WaterConsumption.spec());
        assert_eq!(rows.len(), 14);
        assert_eq!(rows[0].source.as_deref(), Some("Município"));
        assert_eq!(rows[0].role, None);
        assert_eq!(rows[1].target, "ano");
        assert_eq!(rows[1].role, Some(FieldRole::Integer));
        assert_eq!(rows[8].target, "IN022");
        assert_eq!(rows[8].role, Some(FieldRole::Target));
    }

    #[test]
    fn positional_lists_typed_fields_only() {
        let rows = column_rows(&Preset::Positional.spec());
        let targets: Vec<&str> = rows.iter().map(|row| row.target.as_str()).collect();
        assert_eq!(targets, vec!["Ano de Referência", "Tipo de Serviço", "IN022"]);
        assert!(rows.iter().all(|row| row.source.is_none()));
    }
}
