//! Packaging-waste report rendering.
//!
//! [`assemble_report`] lays the aggregated totals out as two view grids
//! (`ekokom_CZ` and `ekokom_import`). The grids are then written as:
//!
//! - **XLSX**: one worksheet per view, bold headers, framed cells
//! - **CSV**: one file per view
//! - **JSON**: the relational snapshot, for inspection
//!
//! All writers go through a temporary file and an atomic rename.

mod delimited;
mod error;
mod report;
mod snapshot;
mod write;
mod xlsx;

pub use delimited::{csv_view_path, render_csv, write_csv};
pub use error::{ReportError, Result};
pub use report::{
    DOMESTIC_VIEW, FOREIGN_VIEW, GRAND_TOTAL_LABEL, GROUP_HEADER, Report, ReportCell, ReportRow,
    ReportView, RowStyle, SUBTOTAL_LABEL, VIEW_WIDTH, assemble_report, format_number, view_name,
};
pub use snapshot::write_snapshot;
pub use write::{WriteMode, ensure_distinct, ensure_writable, write_atomic};
pub use xlsx::{render_xlsx, write_xlsx};
