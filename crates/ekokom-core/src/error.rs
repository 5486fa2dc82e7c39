use std::path::PathBuf;

use thiserror::Error;

use ekokom_ingest::{ErrorKind, IngestError};
use ekokom_model::ModelError;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("{relation}: no column for {role} (looked for {patterns})")]
    MissingColumn {
        relation: String,
        role: &'static str,
        patterns: String,
    },
    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },
    #[error(transparent)]
    Ingest(#[from] IngestError),
    #[error(transparent)]
    Model(#[from] ModelError),
}

pub type Result<T> = std::result::Result<T, CoreError>;

impl CoreError {
    /// Input error class, or None for configuration problems.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Ingest(error) => Some(error.kind()),
            Self::MissingColumn { .. } => Some(ErrorKind::Format),
            Self::ConfigRead { .. } | Self::ConfigParse { .. } | Self::Model(_) => None,
        }
    }
}
