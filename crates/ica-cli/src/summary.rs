use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use ica_model::FieldRole;

use crate::types::ProcessResult;

pub fn print_summary(result: &ProcessResult) {
    println!("Input: {}", result.input.display());
    match &result.output {
        Some(path) => println!("Output: {}", path.display()),
        None => println!("Output: (dry run, nothing written)"),
    }
    if let Some(path) = &result.report_file {
        println!("Report: {}", path.display());
    }
    println!("Spec: {}", result.spec_source);
    println!("{}", row_table(result));
    println!("{}", column_table(result));
    println!("Finished in {:.2?}", result.duration);
}

pub fn row_table(result: &ProcessResult) -> Table {
    let report = &result.report;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Stage"), header_cell("Rows")]);
    apply_summary_table_style(&mut table);
    table.add_row(vec![Cell::new("Input rows"), Cell::new(report.input_rows)]);
    table.add_row(vec![
        Cell::new("Dropped: no reference year"),
        count_cell(report.sentinel_rows_dropped, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Dropped: missing target"),
        count_cell(report.missing_target_rows_dropped, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Cells nulled (lenient)"),
        count_cell(report.lenient_nulls, Color::Red),
    ]);
    table.add_row(vec![
        Cell::new("Output rows")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(report.output_rows).add_attribute(Attribute::Bold),
    ]);
    align_column(&mut table, 1, CellAlignment::Right);
    table
}

pub fn column_table(result: &ProcessResult) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Type"),
        header_cell("Role"),
    ]);
    apply_summary_table_style(&mut table);
    for column in &result.column_types {
        table.add_row(vec![
            Cell::new(&column.name).fg(Color::Blue),
            Cell::new(&column.dtype),
            role_cell(column.role),
        ]);
    }
    table
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

pub fn role_cell(role: Option<FieldRole>) -> Cell {
    match role {
        Some(FieldRole::Target) => Cell::new("target")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
        Some(role) => Cell::new(role),
        None => dim_cell("-"),
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

pub fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
