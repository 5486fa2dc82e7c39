//! JSON dump of the intermediate relations.

use std::path::Path;

use tracing::info;

use ekokom_core::RelationalSnapshot;

use crate::error::Result;
use crate::write::{WriteMode, ensure_writable, write_atomic};

pub fn write_snapshot(snapshot: &RelationalSnapshot, path: &Path, mode: WriteMode) -> Result<()> {
    ensure_writable(&[path.to_path_buf()], mode)?;
    let mut bytes = serde_json::to_vec_pretty(snapshot)?;
    bytes.push(b'\n');
    write_atomic(path, &bytes, mode)?;
    info!(
        path = %path.display(),
        joined_rows = snapshot.joined.len(),
        "wrote relational snapshot"
    );
    Ok(())
}
