//! CSV rendering: one file per view, named `<stem>_<view>.csv`.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{ReportError, Result};
use crate::report::{Report, ReportCell, ReportView, format_number};
use crate::write::{WriteMode, ensure_writable, write_atomic};

/// Renders one view as CSV text.
///
/// Separator rows become empty lines of empty fields; numbers use at most
/// three decimals.
pub fn render_csv(view: &ReportView, delimiter: u8) -> Result<String> {
    let csv_error = |message: String| ReportError::Csv {
        view: view.name.clone(),
        message,
    };
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .flexible(false)
        .from_writer(Vec::new());
    for row in &view.rows {
        let record: Vec<String> = row
            .cells
            .iter()
            .map(|cell| match cell {
                ReportCell::Text(text) => text.clone(),
                ReportCell::Number(value) => format_number(*value),
                ReportCell::Empty => String::new(),
            })
            .collect();
        writer
            .write_record(&record)
            .map_err(|err| csv_error(err.to_string()))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|err| csv_error(err.to_string()))?;
    String::from_utf8(bytes).map_err(|err| csv_error(err.to_string()))
}

/// Output path of one view: `<dir>/<stem>_<view>.csv`.
pub fn csv_view_path(base: &Path, view: &str) -> PathBuf {
    let stem = base
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "ekokom".to_string());
    base.with_file_name(format!("{stem}_{view}.csv"))
}

/// Writes every view next to `base`. Nothing is written if any target is
/// refused.
pub fn write_csv(report: &Report, base: &Path, delimiter: u8, mode: WriteMode) -> Result<Vec<PathBuf>> {
    let targets: Vec<PathBuf> = report
        .views
        .iter()
        .map(|view| csv_view_path(base, &view.name))
        .collect();
    ensure_writable(&targets, mode)?;
    let rendered = report
        .views
        .iter()
        .map(|view| render_csv(view, delimiter))
        .collect::<Result<Vec<String>>>()?;
    for (path, text) in targets.iter().zip(&rendered) {
        write_atomic(path, text.as_bytes(), mode)?;
    }
    info!(files = targets.len(), "wrote CSV report");
    Ok(targets)
}
