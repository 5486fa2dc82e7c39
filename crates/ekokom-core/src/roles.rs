//! Locates the columns each stage needs by header identifier.
//!
//! Patterns are tried in priority order; for each pattern the first column
//! (in column order) whose identifier contains it, ignoring case, is taken.

use serde::{Deserialize, Serialize};

use ekokom_ingest::normalize_identifier;
use ekokom_model::Relation;

use crate::error::{CoreError, Result};

/// Identifier patterns for every column role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColumnRoles {
    pub ledger_supplier: Vec<String>,
    pub goods_type: Vec<String>,
    pub quantity: Vec<String>,
    pub registry_supplier: Vec<String>,
    pub origin_flag: Vec<String>,
}

fn patterns(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_string()).collect()
}

impl Default for ColumnRoles {
    fn default() -> Self {
        Self {
            ledger_supplier: patterns(&["dodavatel", "supplier"]),
            goods_type: patterns(&["typ_zbozi", "goods", "zbozi"]),
            quantity: patterns(&["mnozstvi", "quantity", "qty"]),
            registry_supplier: patterns(&["dodav", "supplier"]),
            origin_flag: patterns(&["cz", "origin", "puvod"]),
        }
    }
}

/// Column positions in the shipment ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LedgerColumns {
    pub supplier: usize,
    pub goods_type: usize,
    pub quantity: usize,
}

impl LedgerColumns {
    pub fn resolve(ledger: &Relation, roles: &ColumnRoles) -> Result<Self> {
        let supplier = require(ledger, "supplier", &roles.ledger_supplier, &[], false)?;
        let goods_type = require(ledger, "goods type", &roles.goods_type, &[supplier], false)?;
        let quantity = require(
            ledger,
            "quantity",
            &roles.quantity,
            &[supplier, goods_type],
            true,
        )?;
        Ok(Self {
            supplier,
            goods_type,
            quantity,
        })
    }
}

/// Column positions in the origin registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RegistryColumns {
    pub supplier: usize,
    pub origin_flag: usize,
}

impl RegistryColumns {
    pub fn resolve(registry: &Relation, roles: &ColumnRoles) -> Result<Self> {
        let supplier = require(registry, "supplier", &roles.registry_supplier, &[], false)?;
        let origin_flag = require(registry, "origin flag", &roles.origin_flag, &[supplier], false)?;
        Ok(Self {
            supplier,
            origin_flag,
        })
    }
}

/// Finds the column for one role.
///
/// With `prefer_numeric`, Integer/Real columns matching any pattern win over
/// Text columns; a Text match is used only when no typed column matches.
pub fn find_column(
    relation: &Relation,
    patterns: &[String],
    exclude: &[usize],
    prefer_numeric: bool,
) -> Option<usize> {
    let needles: Vec<String> = patterns
        .iter()
        .map(|pattern| normalize_identifier(pattern).to_lowercase())
        .filter(|pattern| !pattern.is_empty())
        .collect();
    let candidates = |numeric_only: bool| {
        needles.iter().find_map(|needle| {
            relation.columns.iter().enumerate().position(|(idx, column)| {
                !exclude.contains(&idx)
                    && (!numeric_only || column.column_type.is_numeric())
                    && column.name.to_lowercase().contains(needle.as_str())
            })
        })
    };
    if prefer_numeric {
        candidates(true).or_else(|| candidates(false))
    } else {
        candidates(false)
    }
}

fn require(
    relation: &Relation,
    role: &'static str,
    patterns: &[String],
    exclude: &[usize],
    prefer_numeric: bool,
) -> Result<usize> {
    find_column(relation, patterns, exclude, prefer_numeric).ok_or_else(|| {
        CoreError::MissingColumn {
            relation: relation.name.clone(),
            role,
            patterns: patterns.join("|"),
        }
    })
}
