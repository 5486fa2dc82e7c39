//! In-memory relational model shared by every pipeline stage.
//!
//! A [`Relation`] keeps column order and row order exactly as loaded. Values
//! stay textual; the [`ColumnType`] of a column only annotates how later
//! stages are meant to interpret it.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Semantic type inferred from a header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ColumnType {
    #[default]
    Text,
    Integer,
    Real,
}

impl ColumnType {
    /// True for Integer and Real columns.
    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Integer | Self::Real)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "TEXT",
            Self::Integer => "INTEGER",
            Self::Real => "REAL",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Normalized, storage-safe identifier.
    pub name: String,
    /// Header text as it appeared in the source file.
    pub label: String,
    pub column_type: ColumnType,
}

impl Column {
    pub fn new(name: impl Into<String>, label: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            column_type,
        }
    }

    /// Column whose label equals its name.
    pub fn text(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            label: name.clone(),
            name,
            column_type: ColumnType::Text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relation {
    pub name: String,
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
}

impl Relation {
    pub fn new(name: impl Into<String>, columns: Vec<Column>) -> Self {
        Self {
            name: name.into(),
            columns,
            rows: Vec::new(),
        }
    }

    /// Appends a row, rejecting it when its arity differs from the column count.
    pub fn push_row(&mut self, row: Vec<String>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(ModelError::RowArity {
                relation: self.name.clone(),
                row: self.rows.len(),
                expected: self.columns.len(),
                found: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|column| column.name.as_str())
    }

    /// Index of the column with exactly this identifier.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column.name == name)
    }

    /// Value at (`row`, `column`), empty when either index is out of range.
    pub fn value(&self, row: usize, column: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|values| values.get(column))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Keeps the rows accepted by `predicate`, preserving order.
    pub fn select<F>(&self, name: impl Into<String>, mut predicate: F) -> Relation
    where
        F: FnMut(&[String]) -> bool,
    {
        Relation {
            name: name.into(),
            columns: self.columns.clone(),
            rows: self
                .rows
                .iter()
                .filter(|row| predicate(row))
                .cloned()
                .collect(),
        }
    }
}
