use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use ekokom_core::{OriginTotals, RunDiagnostics};
use ekokom_report::{format_number, view_name};

use crate::types::RunResult;

pub fn print_summary(result: &RunResult) {
    println!("Ledger: {}", result.ledger.display());
    println!("Registry: {}", result.registry.display());
    for path in &result.outputs {
        println!("Output: {}", path.display());
    }
    if let Some(path) = &result.snapshot {
        println!("Snapshot: {}", path.display());
    }
    for view in result.aggregation.views() {
        println!();
        println!("{}:", view_name(view.origin));
        println!("{}", view_table(view));
    }
    print_diagnostics(&result.diagnostics);
}

/// Groups, then per-category totals, then the TOTAL row.
pub fn view_table(view: &OriginTotals) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Supplier"),
        header_cell("Category"),
        header_cell("Quantity"),
        header_cell("Origin flag"),
        header_cell("Plastic [g]"),
        header_cell("Paper [g]"),
        header_cell("Cardboard [g]"),
    ]);
    apply_summary_table_style(&mut table);
    for index in [2, 4, 5, 6] {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for group in &view.groups {
        table.add_row(vec![
            Cell::new(&group.supplier),
            Cell::new(&group.category_name),
            Cell::new(format_number(group.total_quantity)),
            Cell::new(&group.origin_flag),
            mass_cell(group.mass.plastic),
            mass_cell(group.mass.paper),
            mass_cell(group.mass.cardboard),
        ]);
    }
    for total in &view.category_totals {
        table.add_row(vec![
            dim_cell("all"),
            Cell::new(&total.name).add_attribute(Attribute::Bold),
            Cell::new(format_number(total.total_quantity)),
            dim_cell("-"),
            mass_cell(total.mass.plastic),
            mass_cell(total.mass.paper),
            mass_cell(total.mass.cardboard),
        ]);
    }
    let grand = view.grand_total;
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new("All categories")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(format_number(grand.total_quantity)).add_attribute(Attribute::Bold),
        dim_cell("-"),
        mass_cell(grand.mass.plastic).add_attribute(Attribute::Bold),
        mass_cell(grand.mass.paper).add_attribute(Attribute::Bold),
        mass_cell(grand.mass.cardboard).add_attribute(Attribute::Bold),
    ]);
    table
}

fn print_diagnostics(diagnostics: &RunDiagnostics) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Check"), header_cell("Count")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    let rows = [
        ("Ledger rows", diagnostics.ledger_rows, None),
        ("Registry rows", diagnostics.registry_rows, None),
        ("Joined rows", diagnostics.joined_rows, None),
        ("Unmatched shipments", diagnostics.unmatched_shipments, Some(Color::Yellow)),
        ("Multi-match shipments", diagnostics.ambiguous_shipments, Some(Color::Yellow)),
        ("Blank registry suppliers", diagnostics.blank_registry_entries, Some(Color::Yellow)),
        ("Unclassified rows", diagnostics.unclassified_rows, Some(Color::Yellow)),
        ("Non-numeric quantities", diagnostics.invalid_quantities, Some(Color::Yellow)),
    ];
    for (label, count, warn_color) in rows {
        table.add_row(vec![Cell::new(label), count_cell(count, warn_color)]);
    }
    println!();
    println!("{table}");
    let notes = diagnostics.notes();
    if !notes.is_empty() {
        eprintln!("Warnings:");
        for note in notes {
            eprintln!("- {note}");
        }
    }
}

/// Coefficients are small kilogram values; keep their significant digits.
pub fn format_coefficient(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else if value.abs() < 0.01 {
        format!("{value:e}")
    } else {
        format_number(value)
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
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn mass_cell(value: f64) -> Cell {
    if value == 0.0 {
        dim_cell("0")
    } else {
        Cell::new(format_number(value))
    }
}

fn count_cell(count: usize, warn_color: Option<Color>) -> Cell {
    match warn_color {
        Some(color) if count > 0 => Cell::new(count).fg(color).add_attribute(Attribute::Bold),
        _ if count == 0 => dim_cell(count),
        _ => Cell::new(count),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coefficients_keep_precision() {
        assert_eq!(format_coefficient(0.0), "0");
        assert_eq!(format_coefficient(13e-6), "1.3e-5");
        assert_eq!(format_coefficient(40.0), "40");
    }
}
