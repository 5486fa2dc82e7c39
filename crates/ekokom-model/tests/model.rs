//! Tests for ekokom-model types.

use ekokom_model::{Category, CategoryTable, ModelError, OriginClass, OriginPolicy};

#[test]
fn default_table_order_and_coefficients() {
    let table = CategoryTable::default();
    let names: Vec<&str> = table.iter().map(|(_, c)| c.name.as_str()).collect();
    assert_eq!(names, vec!["Obleceni", "Boty", "Kosmetika", "Kabelky"]);

    let clothing = table.get(table.classify("Obleceni pruhovane").unwrap());
    assert!((clothing.coefficient_plastic - 13e-6).abs() < 1e-12);
    assert!((clothing.cardboard_units_per_box - 40.0).abs() < 1e-12);
}

#[test]
fn classification_is_deterministic_across_runs() {
    let table = CategoryTable::default();
    let goods = "kosmetika v kabelce";
    let first = table.classify(goods);
    for _ in 0..10 {
        assert_eq!(table.classify(goods), first);
    }
    assert_eq!(table.name(first.unwrap()), "Kosmetika");
}

#[test]
fn table_round_trips_through_json() {
    let table = CategoryTable::default();
    let json = serde_json::to_string(&table).expect("serialize table");
    let round: CategoryTable = serde_json::from_str(&json).expect("deserialize table");
    assert_eq!(round, table);
}

#[test]
fn invalid_json_table_is_rejected() {
    let json = r#"[{"name": "A", "match_pattern": "a", "coefficient_paper": -2.0}]"#;
    let err = serde_json::from_str::<CategoryTable>(json).unwrap_err();
    assert!(err.to_string().contains("invalid paper coefficient"));
}

#[test]
fn missing_coefficients_default_to_zero() {
    let json = r#"[{"name": "Hracky", "match_pattern": "hrac"}]"#;
    let table: CategoryTable = serde_json::from_str(json).expect("deserialize table");
    let toys = table.get(table.classify("hracky").unwrap());
    assert_eq!(toys.coefficient_plastic, 0.0);
    assert_eq!(toys.cardboard_units_per_box, 0.0);
}

#[test]
fn category_table_new_reports_error() {
    let result = CategoryTable::new(vec![
        Category::new("A", "a", 0.0, 0.0, 0.0),
        Category::new("A", "b", 0.0, 0.0, 0.0),
    ]);
    assert!(matches!(result, Err(ModelError::DuplicateCategory(_))));
}

#[test]
fn origin_view_order() {
    assert_eq!(OriginClass::ALL, [OriginClass::Domestic, OriginClass::Foreign]);
    assert_eq!(
        OriginPolicy::default().classify("foreign"),
        OriginClass::Foreign
    );
}
