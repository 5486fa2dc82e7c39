//! Intermediate relations kept for inspection.

use serde::Serialize;

use ekokom_model::Relation;

/// Every relation the pipeline materializes, in stage order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelationalSnapshot {
    pub ledger: Relation,
    pub registry: Relation,
    pub joined: Relation,
    pub classified: Relation,
}

impl RelationalSnapshot {
    pub fn relations(&self) -> [&Relation; 4] {
        [&self.ledger, &self.registry, &self.joined, &self.classified]
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
