use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("row {row} of {relation} has {found} fields, expected {expected}")]
    RowArity {
        relation: String,
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("category table is empty")]
    EmptyCategoryTable,
    #[error("duplicate category name: {0}")]
    DuplicateCategory(String),
    #[error("category {0} has an empty match pattern")]
    EmptyPattern(String),
    #[error("category {category} has invalid {field} coefficient {value}")]
    InvalidCoefficient {
        category: String,
        field: &'static str,
        value: f64,
    },
}

pub type Result<T> = std::result::Result<T, ModelError>;
