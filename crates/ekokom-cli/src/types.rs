use std::path::PathBuf;

use ekokom_core::{Aggregation, RunDiagnostics};

#[derive(Debug)]
pub struct RunResult {
    pub ledger: PathBuf,
    pub registry: PathBuf,
    pub aggregation: Aggregation,
    pub diagnostics: RunDiagnostics,
    /// Report files written (empty on a dry run).
    pub outputs: Vec<PathBuf>,
    pub snapshot: Option<PathBuf>,
    pub dry_run: bool,
}
