//! Error types for dataset loading.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading a delimited dataset.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Input file not found.
    #[error("input file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Path exists but is not a regular file.
    #[error("input path is not a file: {path}")]
    NotAFile { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Format Errors ===
    /// File contains no header row.
    #[error("input file is empty: {path}")]
    EmptyCsv { path: PathBuf },

    /// Header row has no usable column names.
    #[error("no header row detected in {path}")]
    NoHeaderDetected { path: PathBuf },

    /// A data row does not have as many fields as the header.
    #[error("line {line} of {path} has {found} fields, expected {expected}")]
    FieldCount {
        path: PathBuf,
        line: u64,
        expected: usize,
        found: usize,
    },

    /// The delimited text could not be parsed.
    #[error("failed to parse {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// Unsupported delimiter specification.
    #[error("invalid delimiter '{0}': expected auto, tab, or a single ASCII character")]
    InvalidDelimiter(String),
}

/// Error class reported to the caller's status channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InputNotFound,
    Format,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InputNotFound => "InputNotFoundError",
            Self::Format => "FormatError",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl IngestError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::FileNotFound { .. } | Self::NotAFile { .. } | Self::FileRead { .. } => {
                ErrorKind::InputNotFound
            }
            Self::EmptyCsv { .. }
            | Self::NoHeaderDetected { .. }
            | Self::FieldCount { .. }
            | Self::CsvParse { .. }
            | Self::InvalidDelimiter(_) => ErrorKind::Format,
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::FileNotFound {
            path: PathBuf::from("/data/ledger.csv"),
        };
        assert_eq!(err.to_string(), "input file not found: /data/ledger.csv");
    }

    #[test]
    fn test_error_kinds() {
        let missing = IngestError::NotAFile {
            path: PathBuf::from("/data"),
        };
        assert_eq!(missing.kind(), ErrorKind::InputNotFound);

        let format = IngestError::FieldCount {
            path: PathBuf::from("ledger.csv"),
            line: 3,
            expected: 4,
            found: 2,
        };
        assert_eq!(format.kind(), ErrorKind::Format);
        assert_eq!(format.kind().to_string(), "FormatError");
    }
}
