//! Report assembly: turns aggregated totals into per-origin view grids.
//!
//! Every view is a rectangular grid [`VIEW_WIDTH`] cells wide:
//!
//! 1. header row
//! 2. one row per aggregated group (supplier, category, quantity, origin
//!    flag, plastic, paper, cardboard)
//! 3. blank separator row
//! 4. subtotal header row
//! 5. one subtotal row per category in category table order
//! 6. grand-total row
//!
//! Renderers only decide how a [`RowStyle`] looks; ordering and content are
//! fixed here.

use serde::Serialize;

use ekokom_core::{Aggregation, GrandTotal, MaterialMass, OriginTotals};
use ekokom_model::OriginClass;

/// View name of the domestic-origin sheet.
pub const DOMESTIC_VIEW: &str = "ekokom_CZ";
/// View name of the foreign-origin sheet.
pub const FOREIGN_VIEW: &str = "ekokom_import";

/// Column headers of the group rows.
pub const GROUP_HEADER: [&str; VIEW_WIDTH] = [
    "Dodavatel",
    "Kategorie",
    "Množství",
    "PůvodCZ",
    "Plast [g]",
    "Papir [g]",
    "Lepenka [g]",
];
pub const SUBTOTAL_LABEL: &str = "Kategorie celkem";
pub const GRAND_TOTAL_LABEL: &str = "CELKEM";

pub const VIEW_WIDTH: usize = 7;

const LABEL_COLUMN: usize = 1;
const QUANTITY_COLUMN: usize = 2;
const FIRST_MASS_COLUMN: usize = 4;

pub fn view_name(origin: OriginClass) -> &'static str {
    match origin {
        OriginClass::Domestic => DOMESTIC_VIEW,
        OriginClass::Foreign => FOREIGN_VIEW,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ReportCell {
    Text(String),
    Number(f64),
    Empty,
}

impl ReportCell {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// Presentation role of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RowStyle {
    /// Emphasized column headers.
    Header,
    Body,
    /// Subtotal and grand-total rows.
    Total,
    /// Spacer between the group rows and the subtotal block.
    Separator,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub style: RowStyle,
    pub cells: Vec<ReportCell>,
}

impl ReportRow {
    fn separator() -> Self {
        Self {
            style: RowStyle::Separator,
            cells: vec![ReportCell::Empty; VIEW_WIDTH],
        }
    }

    fn totals(label: &str, quantity: f64, mass: MaterialMass) -> Self {
        let mut cells = vec![ReportCell::Empty; VIEW_WIDTH];
        cells[LABEL_COLUMN] = ReportCell::text(label);
        cells[QUANTITY_COLUMN] = ReportCell::Number(quantity);
        write_mass(&mut cells, mass);
        Self {
            style: RowStyle::Total,
            cells,
        }
    }
}

fn write_mass(cells: &mut [ReportCell], mass: MaterialMass) {
    cells[FIRST_MASS_COLUMN] = ReportCell::Number(mass.plastic);
    cells[FIRST_MASS_COLUMN + 1] = ReportCell::Number(mass.paper);
    cells[FIRST_MASS_COLUMN + 2] = ReportCell::Number(mass.cardboard);
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportView {
    pub name: String,
    pub origin: OriginClass,
    pub rows: Vec<ReportRow>,
    /// Number of aggregated group rows.
    pub group_rows: usize,
}

impl ReportView {
    pub fn from_totals(totals: &OriginTotals) -> Self {
        let mut rows = Vec::with_capacity(totals.groups.len() + totals.category_totals.len() + 4);
        rows.push(ReportRow {
            style: RowStyle::Header,
            cells: GROUP_HEADER.iter().map(|label| ReportCell::text(*label)).collect(),
        });
        for group in &totals.groups {
            let mut cells = vec![
                ReportCell::text(group.supplier.as_str()),
                ReportCell::text(group.category_name.as_str()),
                ReportCell::Number(group.total_quantity),
                ReportCell::text(group.origin_flag.as_str()),
                ReportCell::Empty,
                ReportCell::Empty,
                ReportCell::Empty,
            ];
            write_mass(&mut cells, group.mass);
            rows.push(ReportRow {
                style: RowStyle::Body,
                cells,
            });
        }
        rows.push(ReportRow::separator());

        let mut subtotal_header = vec![ReportCell::Empty; VIEW_WIDTH];
        subtotal_header[LABEL_COLUMN] = ReportCell::text(SUBTOTAL_LABEL);
        subtotal_header[QUANTITY_COLUMN] = ReportCell::text(GROUP_HEADER[QUANTITY_COLUMN]);
        for offset in 0..3 {
            subtotal_header[FIRST_MASS_COLUMN + offset] =
                ReportCell::text(GROUP_HEADER[FIRST_MASS_COLUMN + offset]);
        }
        rows.push(ReportRow {
            style: RowStyle::Header,
            cells: subtotal_header,
        });
        for total in &totals.category_totals {
            rows.push(ReportRow::totals(&total.name, total.total_quantity, total.mass));
        }
        let GrandTotal {
            total_quantity,
            mass,
        } = totals.grand_total;
        rows.push(ReportRow::totals(GRAND_TOTAL_LABEL, total_quantity, mass));

        Self {
            name: view_name(totals.origin).to_string(),
            origin: totals.origin,
            rows,
            group_rows: totals.groups.len(),
        }
    }

    pub fn grand_total_row(&self) -> Option<&ReportRow> {
        self.rows.last()
    }
}

/// The finished report: domestic view first, then foreign.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub views: Vec<ReportView>,
}

impl Report {
    pub fn view(&self, name: &str) -> Option<&ReportView> {
        self.views.iter().find(|view| view.name == name)
    }
}

pub fn assemble_report(aggregation: &Aggregation) -> Report {
    Report {
        views: aggregation
            .views()
            .into_iter()
            .map(ReportView::from_totals)
            .collect(),
    }
}

/// Text used when a number is rendered as text: at most three decimals,
/// trailing zeros dropped.
pub fn format_number(value: f64) -> String {
    let rendered = format!("{value:.3}");
    let trimmed = rendered.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}
