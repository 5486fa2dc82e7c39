//! Non-fatal conditions observed during a run.

use serde::Serialize;

use crate::aggregate::Aggregation;
use crate::join::JoinStats;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunDiagnostics {
    pub ledger_rows: usize,
    pub registry_rows: usize,
    pub joined_rows: usize,
    pub unmatched_shipments: usize,
    pub ambiguous_shipments: usize,
    pub blank_registry_entries: usize,
    pub unclassified_rows: usize,
    pub unclassified_quantity_domestic: f64,
    pub unclassified_quantity_foreign: f64,
    pub invalid_quantities: usize,
}

impl RunDiagnostics {
    pub fn new(join: &JoinStats, aggregation: &Aggregation) -> Self {
        Self {
            ledger_rows: join.shipments,
            registry_rows: join.registry_entries,
            joined_rows: join.joined_rows,
            unmatched_shipments: join.unmatched_shipments,
            ambiguous_shipments: join.ambiguous_shipments,
            blank_registry_entries: join.blank_registry_entries,
            unclassified_rows: aggregation.stats.unclassified_rows,
            unclassified_quantity_domestic: aggregation.domestic.unclassified_quantity,
            unclassified_quantity_foreign: aggregation.foreign.unclassified_quantity,
            invalid_quantities: aggregation.stats.invalid_quantities,
        }
    }

    pub fn is_clean(&self) -> bool {
        self.notes().is_empty()
    }

    /// One line per condition worth a reviewer's attention.
    pub fn notes(&self) -> Vec<String> {
        let mut notes = Vec::new();
        if self.unmatched_shipments > 0 {
            notes.push(format!(
                "{} shipment(s) had no registry match and were left out",
                self.unmatched_shipments
            ));
        }
        if self.ambiguous_shipments > 0 {
            notes.push(format!(
                "{} shipment(s) matched several registry entries and were counted once per match",
                self.ambiguous_shipments
            ));
        }
        if self.blank_registry_entries > 0 {
            notes.push(format!(
                "{} registry entr(ies) with a blank supplier were ignored",
                self.blank_registry_entries
            ));
        }
        if self.unclassified_rows > 0 {
            notes.push(format!(
                "{} row(s) matched no goods category (quantity {} domestic, {} foreign)",
                self.unclassified_rows,
                self.unclassified_quantity_domestic,
                self.unclassified_quantity_foreign
            ));
        }
        if self.invalid_quantities > 0 {
            notes.push(format!(
                "{} quantity value(s) were not numeric and counted as zero",
                self.invalid_quantities
            ));
        }
        notes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_run_has_no_notes() {
        let diagnostics = RunDiagnostics {
            ledger_rows: 3,
            registry_rows: 2,
            joined_rows: 3,
            ..RunDiagnostics::default()
        };
        assert!(diagnostics.is_clean());
    }

    #[test]
    fn every_condition_yields_a_note() {
        let diagnostics = RunDiagnostics {
            unmatched_shipments: 1,
            ambiguous_shipments: 2,
            blank_registry_entries: 1,
            unclassified_rows: 4,
            unclassified_quantity_domestic: 7.0,
            invalid_quantities: 1,
            ..RunDiagnostics::default()
        };
        let notes = diagnostics.notes();
        assert_eq!(notes.len(), 5);
        assert!(notes[3].contains("quantity 7 domestic, 0 foreign"));
    }
}
