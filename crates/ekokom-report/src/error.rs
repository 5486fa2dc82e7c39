use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("output already exists: {path} (use --force to replace it)")]
    OutputExists { path: PathBuf },
    #[error("output path {path} is used for more than one artifact")]
    PathConflict { path: PathBuf },
    #[error("failed to {operation} {path}: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to move finished output into place at {path}: {source}")]
    AtomicWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to build workbook: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
    #[error("failed to encode CSV view {view}: {message}")]
    Csv { view: String, message: String },
    #[error("failed to serialize snapshot: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ReportError>;
