//! Origin join: attaches registry origin flags to shipment rows.
//!
//! A registry entry matches a shipment when its supplier text occurs inside
//! the shipment's supplier text (exact, case-sensitive). This is an inner
//! join with fan-out: a shipment matching `k` entries yields `k` joined rows
//! and a shipment matching none yields nothing. Entries with a blank
//! supplier are skipped, since the empty string would match every shipment.

use serde::Serialize;
use tracing::{debug, warn};

use ekokom_model::{Column, ColumnType, Relation};

use crate::ops::contains_join;
use crate::roles::{LedgerColumns, RegistryColumns};

/// Identifier of the origin column appended to joined relations.
pub const ORIGIN_FLAG_COLUMN: &str = "origin_flag";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JoinedRow {
    /// Row index in the ledger.
    pub shipment: usize,
    /// Row index in the registry.
    pub registry: usize,
    pub supplier: String,
    pub goods_type: String,
    pub quantity: String,
    pub origin_flag: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct JoinStats {
    pub shipments: usize,
    pub registry_entries: usize,
    pub blank_registry_entries: usize,
    pub joined_rows: usize,
    /// Shipments with no matching registry entry (dropped).
    pub unmatched_shipments: usize,
    /// Shipments matching more than one registry entry (fanned out).
    pub ambiguous_shipments: usize,
}

#[derive(Debug, Clone)]
pub struct JoinOutput {
    pub rows: Vec<JoinedRow>,
    pub stats: JoinStats,
}

pub fn origin_join(
    ledger: &Relation,
    ledger_columns: LedgerColumns,
    registry: &Relation,
    registry_columns: RegistryColumns,
) -> JoinOutput {
    let mut blank_registry_entries = 0usize;
    let pairs = contains_join(
        ledger,
        ledger_columns.supplier,
        registry,
        registry_columns.supplier,
        |idx, key| {
            if key.trim().is_empty() {
                blank_registry_entries += 1;
                debug!(registry_row = idx, "skipping registry entry with blank supplier");
                false
            } else {
                true
            }
        },
    );

    let mut matches_per_shipment = vec![0usize; ledger.len()];
    let rows: Vec<JoinedRow> = pairs
        .into_iter()
        .map(|(shipment, entry)| {
            matches_per_shipment[shipment] += 1;
            JoinedRow {
                shipment,
                registry: entry,
                supplier: ledger.value(shipment, ledger_columns.supplier).to_string(),
                goods_type: ledger.value(shipment, ledger_columns.goods_type).to_string(),
                quantity: ledger.value(shipment, ledger_columns.quantity).to_string(),
                origin_flag: registry
                    .value(entry, registry_columns.origin_flag)
                    .to_string(),
            }
        })
        .collect();

    let mut unmatched_shipments = 0usize;
    let mut ambiguous_shipments = 0usize;
    for (shipment, count) in matches_per_shipment.iter().enumerate() {
        match *count {
            0 => {
                unmatched_shipments += 1;
                debug!(
                    shipment,
                    supplier = ledger.value(shipment, ledger_columns.supplier),
                    "shipment matched no registry entry"
                );
            }
            1 => {}
            n => {
                ambiguous_shipments += 1;
                debug!(
                    shipment,
                    supplier = ledger.value(shipment, ledger_columns.supplier),
                    matches = n,
                    "shipment matched several registry entries"
                );
            }
        }
    }
    if unmatched_shipments > 0 {
        warn!(
            count = unmatched_shipments,
            "shipments without a registry match were dropped"
        );
    }
    if ambiguous_shipments > 0 {
        warn!(
            count = ambiguous_shipments,
            "shipments matched several registry entries and were counted once per match"
        );
    }

    let stats = JoinStats {
        shipments: ledger.len(),
        registry_entries: registry.len(),
        blank_registry_entries,
        joined_rows: rows.len(),
        unmatched_shipments,
        ambiguous_shipments,
    };
    JoinOutput { rows, stats }
}

/// Ledger columns plus the origin flag, one row per joined pair.
pub fn joined_relation(
    ledger: &Relation,
    registry: &Relation,
    registry_columns: RegistryColumns,
    rows: &[JoinedRow],
) -> Relation {
    let mut columns = ledger.columns.clone();
    let origin_label = registry
        .columns
        .get(registry_columns.origin_flag)
        .map(|column| column.label.clone())
        .unwrap_or_else(|| ORIGIN_FLAG_COLUMN.to_string());
    columns.push(Column::new(ORIGIN_FLAG_COLUMN, origin_label, ColumnType::Text));
    Relation {
        name: "joined".to_string(),
        columns,
        rows: rows
            .iter()
            .map(|row| {
                let mut values = ledger.rows[row.shipment].clone();
                values.push(row.origin_flag.clone());
                values
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ledger(rows: &[(&str, &str, &str)]) -> Relation {
        let mut relation = Relation::new(
            "ledger",
            vec![
                Column::text("Dodavatel"),
                Column::text("Typ_zbozi"),
                Column::text("Mnozstvi_celkem"),
            ],
        );
        for (supplier, goods, quantity) in rows {
            relation
                .push_row(vec![
                    (*supplier).to_string(),
                    (*goods).to_string(),
                    (*quantity).to_string(),
                ])
                .unwrap();
        }
        relation
    }

    fn registry(rows: &[(&str, &str)]) -> Relation {
        let mut relation = Relation::new(
            "registry",
            vec![Column::text("Dodavel"), Column::text("CZ_ano/ne")],
        );
        for (supplier, flag) in rows {
            relation
                .push_row(vec![(*supplier).to_string(), (*flag).to_string()])
                .unwrap();
        }
        relation
    }

    const LEDGER: LedgerColumns = LedgerColumns {
        supplier: 0,
        goods_type: 1,
        quantity: 2,
    };
    const REGISTRY: RegistryColumns = RegistryColumns {
        supplier: 0,
        origin_flag: 1,
    };

    #[test]
    fn two_matching_entries_yield_two_rows() {
        let ledger = ledger(&[("ACME Corp", "Boty", "5")]);
        let registry = registry(&[("ACME", "ano"), ("Corp", "ne")]);
        let output = origin_join(&ledger, LEDGER, &registry, REGISTRY);
        assert_eq!(output.rows.len(), 2);
        assert_eq!(output.rows[0].origin_flag, "ano");
        assert_eq!(output.rows[1].origin_flag, "ne");
        assert_eq!(output.stats.ambiguous_shipments, 1);
    }

    #[test]
    fn unmatched_shipment_is_dropped() {
        let ledger = ledger(&[("ACME Corp", "Boty", "5"), ("Initech", "Boty", "2")]);
        let registry = registry(&[("ACME", "ano")]);
        let output = origin_join(&ledger, LEDGER, &registry, REGISTRY);
        assert_eq!(output.rows.len(), 1);
        assert!(output.rows.iter().all(|row| row.supplier != "Initech"));
        assert_eq!(output.stats.unmatched_shipments, 1);
    }

    #[test]
    fn blank_registry_supplier_is_skipped() {
        let ledger = ledger(&[("ACME Corp", "Boty", "5")]);
        let registry = registry(&[("  ", "ne"), ("ACME", "ano")]);
        let output = origin_join(&ledger, LEDGER, &registry, REGISTRY);
        assert_eq!(output.rows.len(), 1);
        assert_eq!(output.stats.blank_registry_entries, 1);
    }

    #[test]
    fn joined_relation_appends_origin_column() {
        let ledger = ledger(&[("ACME Corp", "Boty", "5")]);
        let registry = registry(&[("ACME", "ano")]);
        let output = origin_join(&ledger, LEDGER, &registry, REGISTRY);
        let joined = joined_relation(&ledger, &registry, REGISTRY, &output.rows);
        assert_eq!(joined.width(), 4);
        assert_eq!(joined.columns[3].name, ORIGIN_FLAG_COLUMN);
        assert_eq!(joined.columns[3].label, "CZ_ano/ne");
        assert_eq!(joined.rows[0][3], "ano");
    }
}
