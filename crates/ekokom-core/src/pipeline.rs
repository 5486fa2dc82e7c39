//! Pipeline orchestration: load → join → classify → aggregate.
//!
//! Stages run strictly in sequence and each consumes the full output of the
//! previous one. Any failure aborts the run before later stages start.

use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{info, info_span};

use ekokom_ingest::{Delimiter, load_relation_with_rules};
use ekokom_model::Relation;

use crate::aggregate::{Aggregation, aggregate};
use crate::classify::{classified_relation, classify_rows};
use crate::config::EngineConfig;
use crate::diagnostics::RunDiagnostics;
use crate::error::Result;
use crate::join::{joined_relation, origin_join};
use crate::roles::{LedgerColumns, RegistryColumns};
use crate::snapshot::RelationalSnapshot;

/// Relation name of the shipment ledger.
pub const LEDGER_RELATION: &str = "ledger";
/// Relation name of the origin registry.
pub const REGISTRY_RELATION: &str = "registry";

/// One delimited input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFile {
    pub path: PathBuf,
    pub delimiter: Delimiter,
}

impl InputFile {
    pub fn new(path: impl Into<PathBuf>, delimiter: Delimiter) -> Self {
        Self {
            path: path.into(),
            delimiter,
        }
    }
}

/// Both loaded inputs.
#[derive(Debug, Clone)]
pub struct Inputs {
    pub ledger: Relation,
    pub registry: Relation,
}

#[derive(Debug, Clone)]
pub struct EngineOutput {
    pub aggregation: Aggregation,
    pub diagnostics: RunDiagnostics,
    pub ledger_columns: LedgerColumns,
    pub registry_columns: RegistryColumns,
    pub snapshot: RelationalSnapshot,
}

/// Loads the ledger and the registry. Both must load before anything else runs.
pub fn load_inputs(ledger: &InputFile, registry: &InputFile, config: &EngineConfig) -> Result<Inputs> {
    let span = info_span!("load");
    let _guard = span.enter();
    let start = Instant::now();
    let ledger = load_one(&ledger.path, LEDGER_RELATION, ledger.delimiter, config)?;
    let registry = load_one(&registry.path, REGISTRY_RELATION, registry.delimiter, config)?;
    info!(
        ledger_rows = ledger.len(),
        registry_rows = registry.len(),
        duration_ms = start.elapsed().as_millis(),
        "inputs loaded"
    );
    Ok(Inputs { ledger, registry })
}

fn load_one(path: &Path, name: &str, delimiter: Delimiter, config: &EngineConfig) -> Result<Relation> {
    Ok(load_relation_with_rules(path, name, delimiter, &config.schema)?)
}

/// Runs join, classification and aggregation over loaded inputs.
pub fn run_engine(inputs: Inputs, config: &EngineConfig) -> Result<EngineOutput> {
    let Inputs { ledger, registry } = inputs;
    let ledger_columns = LedgerColumns::resolve(&ledger, &config.columns)?;
    let registry_columns = RegistryColumns::resolve(&registry, &config.columns)?;

    let join_span = info_span!("join");
    let join = join_span.in_scope(|| {
        let start = Instant::now();
        let output = origin_join(&ledger, ledger_columns, &registry, registry_columns);
        info!(
            joined_rows = output.stats.joined_rows,
            unmatched = output.stats.unmatched_shipments,
            ambiguous = output.stats.ambiguous_shipments,
            duration_ms = start.elapsed().as_millis(),
            "join complete"
        );
        output
    });
    let joined = joined_relation(&ledger, &registry, registry_columns, &join.rows);

    let classify_span = info_span!("classify");
    let classified_rows = classify_span.in_scope(|| {
        let rows = classify_rows(join.rows, &config.categories);
        info!(rows = rows.len(), "classification complete");
        rows
    });
    let classified = classified_relation(&joined, &classified_rows, &config.categories);

    let aggregate_span = info_span!("aggregate");
    let aggregation = aggregate_span.in_scope(|| {
        aggregate(
            &classified_rows,
            &config.categories,
            &config.origin,
            config.unclassified,
        )
    });

    let diagnostics = RunDiagnostics::new(&join.stats, &aggregation);
    Ok(EngineOutput {
        aggregation,
        diagnostics,
        ledger_columns,
        registry_columns,
        snapshot: RelationalSnapshot {
            ledger,
            registry,
            joined,
            classified,
        },
    })
}

/// Loads both inputs and runs the engine.
pub fn run_pipeline(
    ledger: &InputFile,
    registry: &InputFile,
    config: &EngineConfig,
) -> Result<EngineOutput> {
    let inputs = load_inputs(ledger, registry, config)?;
    run_engine(inputs, config)
}
