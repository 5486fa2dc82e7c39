//! XLSX rendering: one worksheet per view.
//!
//! Header rows are bold; every populated cell gets a thin border.

use std::path::Path;

use rust_xlsxwriter::{Format, FormatBorder, Workbook, Worksheet, XlsxError};
use tracing::info;

use crate::error::Result;
use crate::report::{Report, ReportCell, ReportView, RowStyle};
use crate::write::{WriteMode, ensure_writable, write_atomic};

const COLUMN_WIDTH: f64 = 16.0;

struct Formats {
    header: Format,
    body: Format,
    total: Format,
}

impl Formats {
    fn new() -> Self {
        let framed = Format::new().set_border(FormatBorder::Thin);
        Self {
            header: framed.clone().set_bold(),
            total: framed.clone().set_bold(),
            body: framed,
        }
    }

    fn for_style(&self, style: RowStyle) -> &Format {
        match style {
            RowStyle::Header => &self.header,
            RowStyle::Total => &self.total,
            RowStyle::Body | RowStyle::Separator => &self.body,
        }
    }
}

/// Renders the report to XLSX bytes.
pub fn render_xlsx(report: &Report) -> Result<Vec<u8>> {
    let formats = Formats::new();
    let mut workbook = Workbook::new();
    for view in &report.views {
        let worksheet = workbook.add_worksheet().set_name(&view.name)?;
        write_view(worksheet, view, &formats)?;
    }
    Ok(workbook.save_to_buffer()?)
}

fn write_view(
    worksheet: &mut Worksheet,
    view: &ReportView,
    formats: &Formats,
) -> std::result::Result<(), XlsxError> {
    for (row_idx, row) in view.rows.iter().enumerate() {
        let row_num = row_idx as u32;
        let format = formats.for_style(row.style);
        for (col_idx, cell) in row.cells.iter().enumerate() {
            let col_num = col_idx as u16;
            match cell {
                ReportCell::Text(text) => {
                    worksheet.write_string_with_format(row_num, col_num, text, format)?;
                }
                ReportCell::Number(value) => {
                    worksheet.write_number_with_format(row_num, col_num, *value, format)?;
                }
                ReportCell::Empty => {}
            }
        }
    }
    if let Some(width) = view.rows.first().map(|row| row.cells.len()) {
        for col_idx in 0..width {
            worksheet.set_column_width(col_idx as u16, COLUMN_WIDTH)?;
        }
    }
    Ok(())
}

/// Writes the workbook to `path`.
pub fn write_xlsx(report: &Report, path: &Path, mode: WriteMode) -> Result<()> {
    ensure_writable(&[path.to_path_buf()], mode)?;
    let bytes = render_xlsx(report)?;
    write_atomic(path, &bytes, mode)?;
    info!(path = %path.display(), sheets = report.views.len(), "wrote XLSX report");
    Ok(())
}
