pub mod aggregate;
pub mod classify;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod join;
pub mod ops;
pub mod pipeline;
pub mod roles;
pub mod snapshot;

pub use aggregate::{
    AggregatedGroup, Aggregation, AggregationStats, CARDBOARD_BOX_WEIGHT_KG, CategoryTotal,
    GrandTotal, MASS_SCALE, MaterialMass, OriginTotals, UNCLASSIFIED_LABEL, UnclassifiedPolicy,
    aggregate, compute_mass, parse_quantity,
};
pub use classify::{CATEGORY_COLUMN, ClassifiedRow, classified_relation, classify_rows};
pub use config::EngineConfig;
pub use diagnostics::RunDiagnostics;
pub use error::{CoreError, Result};
pub use join::{JoinOutput, JoinStats, JoinedRow, ORIGIN_FLAG_COLUMN, joined_relation, origin_join};
pub use ops::{contains_join, group_by};
pub use pipeline::{
    EngineOutput, InputFile, Inputs, LEDGER_RELATION, REGISTRY_RELATION, load_inputs, run_engine,
    run_pipeline,
};
pub use roles::{ColumnRoles, LedgerColumns, RegistryColumns, find_column};
pub use snapshot::RelationalSnapshot;
