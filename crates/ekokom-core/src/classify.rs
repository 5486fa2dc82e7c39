//! Assigns a goods category to every joined row.

use serde::Serialize;
use tracing::{debug, warn};

use ekokom_model::{CategoryId, CategoryTable, Column, ColumnType, Relation};

use crate::join::JoinedRow;

/// Identifier of the category column appended to classified relations.
pub const CATEGORY_COLUMN: &str = "category";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedRow {
    pub joined: JoinedRow,
    /// None when no category pattern occurs in the goods type.
    pub category: Option<CategoryId>,
}

pub fn classify_rows(rows: Vec<JoinedRow>, categories: &CategoryTable) -> Vec<ClassifiedRow> {
    let classified: Vec<ClassifiedRow> = rows
        .into_iter()
        .map(|joined| {
            let category = categories.classify(&joined.goods_type);
            if category.is_none() {
                debug!(
                    shipment = joined.shipment,
                    goods_type = %joined.goods_type,
                    "goods type matched no category"
                );
            }
            ClassifiedRow { joined, category }
        })
        .collect();
    let unclassified = classified
        .iter()
        .filter(|row| row.category.is_none())
        .count();
    if unclassified > 0 {
        warn!(count = unclassified, "rows matched no goods category");
    }
    classified
}

/// Joined relation plus the assigned category name (empty when unclassified).
pub fn classified_relation(
    joined: &Relation,
    rows: &[ClassifiedRow],
    categories: &CategoryTable,
) -> Relation {
    let mut columns = joined.columns.clone();
    columns.push(Column::new(CATEGORY_COLUMN, CATEGORY_COLUMN, ColumnType::Text));
    Relation {
        name: "classified".to_string(),
        columns,
        rows: joined
            .rows
            .iter()
            .zip(rows)
            .map(|(values, row)| {
                let mut values = values.clone();
                values.push(
                    row.category
                        .map(|id| categories.name(id).to_string())
                        .unwrap_or_default(),
                );
                values
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn joined(goods_type: &str) -> JoinedRow {
        JoinedRow {
            shipment: 0,
            registry: 0,
            supplier: "ACME Corp".to_string(),
            goods_type: goods_type.to_string(),
            quantity: "1".to_string(),
            origin_flag: "ano".to_string(),
        }
    }

    #[test]
    fn assigns_first_matching_category() {
        let table = CategoryTable::default();
        let rows = classify_rows(
            vec![joined("Boty a oblecení"), joined("Kabelka"), joined("Nábytek")],
            &table,
        );
        let names: Vec<Option<&str>> = rows
            .iter()
            .map(|row| row.category.map(|id| table.name(id)))
            .collect();
        assert_eq!(names, vec![Some("Obleceni"), Some("Kabelky"), None]);
    }

    #[test]
    fn classified_relation_adds_category_names() {
        let table = CategoryTable::default();
        let mut joined_rel = Relation::new("joined", vec![Column::text("Typ_zbozi")]);
        joined_rel.push_row(vec!["Boty".to_string()]).unwrap();
        joined_rel.push_row(vec!["Stoly".to_string()]).unwrap();
        let rows = classify_rows(vec![joined("Boty"), joined("Stoly")], &table);
        let relation = classified_relation(&joined_rel, &rows, &table);
        assert_eq!(relation.columns[1].name, CATEGORY_COLUMN);
        assert_eq!(relation.rows[0][1], "Boty");
        assert_eq!(relation.rows[1][1], "");
    }
}
