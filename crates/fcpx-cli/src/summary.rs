//! Human-readable and JSON rendering of command results.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use serde_json::json;

use fcpx_model::{DocumentValidationReport, ValidationError};

use crate::cli::OutputFormatArg;
use crate::commands::{ConvertOutcome, VersionRow};

pub fn print_report(report: &DocumentValidationReport, format: OutputFormatArg) {
    if format == OutputFormatArg::Json {
        match serde_json::to_string_pretty(report) {
            Ok(body) => println!("{body}"),
            Err(error) => eprintln!("error: render report: {error}"),
        }
        return;
    }
    println!("{}", report.summary());
    if report.is_valid() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Pass"),
        header_cell("Kind"),
        header_cell("Path"),
        header_cell("Message"),
    ]);
    apply_table_style(&mut table);
    for error in report.structure.iter() {
        table.add_row(finding_row("structure", error));
    }
    for error in report.semantics.iter() {
        table.add_row(finding_row("semantics", error));
    }
    println!("{table}");
}

fn finding_row(pass: &str, error: &ValidationError) -> Vec<Cell> {
    vec![
        Cell::new(pass).fg(Color::Cyan),
        Cell::new(error.kind.as_str()).fg(Color::Red),
        Cell::new(error.path().unwrap_or("-")),
        Cell::new(&error.message),
    ]
}

pub fn print_conversion(outcome: &ConvertOutcome, show_changes: bool, format: OutputFormatArg) {
    let conversion = &outcome.conversion;
    if format == OutputFormatArg::Json {
        let body = json!({
            "source": conversion.source,
            "target": conversion.target,
            "output": outcome.output.display().to_string(),
            "lossless": conversion.is_lossless(),
            "changes": conversion.changes,
        });
        match serde_json::to_string_pretty(&body) {
            Ok(body) => println!("{body}"),
            Err(error) => eprintln!("error: render change log: {error}"),
        }
        return;
    }
    println!(
        "converted {} -> {} ({} change(s)), wrote {}",
        conversion.source,
        conversion.target,
        conversion.changes.len(),
        outcome.output.display()
    );
    if !show_changes || conversion.changes.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Change"),
        header_cell("Version"),
        header_cell("Path"),
        header_cell("Detail"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    for change in &conversion.changes {
        table.add_row(vec![
            Cell::new(change.kind_name()).fg(Color::Yellow),
            Cell::new(change.version()),
            Cell::new(change.path()),
            Cell::new(change),
        ]);
    }
    println!("{table}");
}

pub fn print_versions(rows: &[VersionRow]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Version"),
        header_cell("New features"),
        header_cell("Retired features"),
        header_cell(""),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for row in rows {
        table.add_row(vec![
            Cell::new(row.version).add_attribute(Attribute::Bold),
            Cell::new(row.introduced),
            Cell::new(row.retired),
            if row.is_latest {
                Cell::new("latest").fg(Color::Green)
            } else {
                Cell::new("")
            },
        ]);
    }
    println!("{table}");
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
