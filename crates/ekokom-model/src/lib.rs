//! Data model for the packaging-waste report engine.
//!
//! Every stage of the pipeline exchanges the types defined here: loaded
//! [`Relation`]s, the immutable [`CategoryTable`], and the
//! [`OriginPolicy`] that splits suppliers into domestic and foreign.

pub mod category;
pub mod error;
pub mod origin;
pub mod relation;
pub mod text;

pub use category::{Category, CategoryId, CategoryTable};
pub use error::{ModelError, Result};
pub use origin::{OriginClass, OriginPolicy};
pub use relation::{Column, ColumnType, Relation};
pub use text::fold_case;
