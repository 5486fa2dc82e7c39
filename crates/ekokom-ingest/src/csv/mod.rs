//! Delimited text reading.

mod delimiter;
mod header;
mod reader;

pub use delimiter::{Delimiter, sniff_delimiter};
pub use header::{clean_header, column_identifiers};
pub use reader::{load_relation, load_relation_with_rules};
