//! Loads a delimited text file into a [`Relation`].

use std::path::Path;

use csv::ReaderBuilder;
use tracing::{debug, info};

use ekokom_model::{Column, Relation};

use crate::error::{IngestError, Result};
use crate::schema::InferenceRules;

use super::header::{clean_header, column_identifiers};
use super::delimiter::Delimiter;

/// Loads `path` with the default inference rules.
pub fn load_relation(path: &Path, name: &str, delimiter: Delimiter) -> Result<Relation> {
    load_relation_with_rules(path, name, delimiter, &InferenceRules::default())
}

/// Loads `path` as a relation named `name`.
///
/// The first record is the header row; each header is typed by `rules` and
/// normalized into an identifier. Data values are kept verbatim and in file
/// order. Every data record must have exactly as many fields as the header.
pub fn load_relation_with_rules(
    path: &Path,
    name: &str,
    delimiter: Delimiter,
    rules: &InferenceRules,
) -> Result<Relation> {
    let content = read_text(path)?;
    let content = content.strip_prefix('\u{feff}').unwrap_or(&content);
    if content.trim().is_empty() {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }

    // The csv reader skips blank lines, so sniff the first line it will parse.
    let header_line = content
        .lines()
        .find(|line| !line.trim().is_empty())
        .unwrap_or("");
    let separator = delimiter.resolve(header_line);
    debug!(
        path = %path.display(),
        delimiter = %Delimiter::Byte(separator),
        "reading delimited file"
    );

    let mut reader = ReaderBuilder::new()
        .delimiter(separator)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());
    let mut records = reader.records();

    let header = match records.next() {
        Some(record) => record.map_err(|e| parse_error(path, &e))?,
        None => {
            return Err(IngestError::EmptyCsv {
                path: path.to_path_buf(),
            });
        }
    };
    let labels: Vec<String> = header.iter().map(clean_header).collect();
    if labels.iter().all(String::is_empty) {
        return Err(IngestError::NoHeaderDetected {
            path: path.to_path_buf(),
        });
    }

    let identifiers = column_identifiers(&labels);
    let columns: Vec<Column> = labels
        .iter()
        .zip(identifiers)
        .map(|(label, identifier)| Column::new(identifier, label.clone(), rules.infer(label)))
        .collect();
    for column in &columns {
        debug!(
            column = %column.name,
            label = %column.label,
            column_type = column.column_type.as_str(),
            "inferred column"
        );
    }

    let mut relation = Relation::new(name, columns);
    for record in records {
        let record = record.map_err(|e| parse_error(path, &e))?;
        let line = record.position().map(csv::Position::line).unwrap_or(0);
        if record.len() != relation.width() {
            return Err(IngestError::FieldCount {
                path: path.to_path_buf(),
                line,
                expected: relation.width(),
                found: record.len(),
            });
        }
        let row: Vec<String> = record.iter().map(str::to_string).collect();
        relation
            .push_row(row)
            .map_err(|e| IngestError::CsvParse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
    }

    info!(
        relation = name,
        path = %path.display(),
        columns = relation.width(),
        rows = relation.len(),
        "loaded dataset"
    );
    Ok(relation)
}

fn read_text(path: &Path) -> Result<String> {
    let metadata = std::fs::metadata(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;
    if !metadata.is_file() {
        return Err(IngestError::NotAFile {
            path: path.to_path_buf(),
        });
    }
    let bytes = std::fs::read(path).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    String::from_utf8(bytes).map_err(|e| IngestError::CsvParse {
        path: path.to_path_buf(),
        message: format!("input is not valid UTF-8: {e}"),
    })
}

fn parse_error(path: &Path, error: &csv::Error) -> IngestError {
    IngestError::CsvParse {
        path: path.to_path_buf(),
        message: error.to_string(),
    }
}
