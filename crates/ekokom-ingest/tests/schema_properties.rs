//! Property tests for header inference and identifier normalization.

use proptest::prelude::*;

use ekokom_ingest::{InferenceRules, infer_column_type, normalize_identifier};
use ekokom_model::ColumnType;

proptest! {
    #[test]
    fn normalization_is_idempotent(raw in "\\PC{0,24}") {
        let once = normalize_identifier(&raw);
        prop_assert_eq!(normalize_identifier(&once), once);
    }

    #[test]
    fn identifiers_are_ascii_and_space_free(raw in "\\PC{0,24}") {
        let normalized = normalize_identifier(&raw);
        prop_assert!(normalized.is_ascii());
        prop_assert!(!normalized.chars().any(char::is_whitespace));
    }

    #[test]
    fn header_containing_rule_takes_rule_type(
        rule_idx in 0usize..9,
        prefix in "[0-9 ]{0,6}",
        suffix in "[0-9 ]{0,6}",
        upper in any::<bool>(),
    ) {
        let rules = InferenceRules::default();
        let rule = &rules.rules()[rule_idx];
        let pattern = if upper { rule.pattern.to_uppercase() } else { rule.pattern.clone() };
        let header = format!("{prefix}{pattern}{suffix}");
        prop_assert_eq!(rules.infer(&header), rule.column_type);
    }

    #[test]
    fn unmatched_headers_are_text(header in "[0-9 _]{0,16}") {
        prop_assert_eq!(infer_column_type(&header), ColumnType::Text);
    }
}
