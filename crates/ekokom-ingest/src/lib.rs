//! Dataset ingestion for the packaging-waste report engine.
//!
//! This crate turns delimited text extracts (the shipment ledger and the
//! supplier-origin registry) into typed, identifier-normalized
//! [`Relation`](ekokom_model::Relation)s.
//!
//! # Features
//!
//! - **Schema inference**: header text is typed by an ordered substring rule list
//! - **Identifier normalization**: diacritics stripped, whitespace joined with `_`
//! - **Delimiters**: fixed per file or sniffed from the header line
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use ekokom_ingest::{Delimiter, load_relation};
//!
//! let ledger = load_relation(Path::new("Q1_25.csv"), "ledger", Delimiter::COMMA)?;
//! let registry = load_relation(Path::new("dodavatele.csv"), "registry", Delimiter::SEMICOLON)?;
//! ```

mod csv;
mod error;
mod schema;

// === Error Types ===
pub use error::{ErrorKind, IngestError, Result};

// === Loading ===
pub use csv::{
    Delimiter, clean_header, column_identifiers, load_relation, load_relation_with_rules,
    sniff_delimiter,
};

// === Schema Inference ===
pub use schema::{
    IDENTIFIER_JOIN, InferenceRule, InferenceRules, infer_column_type, normalize_identifier,
    strip_diacritics,
};
