//! Header type inference and identifier normalization.
//!
//! Inference scans an ordered rule list; the first rule whose substring
//! occurs in the header (ignoring case) decides the [`ColumnType`]. Headers
//! matching no rule are Text. Normalization is applied to every header
//! independently of its type.

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use ekokom_model::{ColumnType, fold_case};

/// Character that replaces whitespace and non-ASCII leftovers in identifiers.
pub const IDENTIFIER_JOIN: char = '_';

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InferenceRule {
    pub pattern: String,
    pub column_type: ColumnType,
}

impl InferenceRule {
    pub fn new(pattern: &str, column_type: ColumnType) -> Self {
        Self {
            pattern: pattern.to_string(),
            column_type,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InferenceRules {
    rules: Vec<InferenceRule>,
}

impl InferenceRules {
    pub fn new(rules: Vec<InferenceRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[InferenceRule] {
        &self.rules
    }

    /// Infers the type of a raw header. Never fails.
    pub fn infer(&self, header: &str) -> ColumnType {
        let lowered = fold_case(header);
        self.rules
            .iter()
            .find(|rule| lowered.contains(&fold_case(&rule.pattern)))
            .map(|rule| rule.column_type)
            .unwrap_or(ColumnType::Text)
    }
}

impl Default for InferenceRules {
    fn default() -> Self {
        use ColumnType::{Integer, Real, Text};
        Self::new(vec![
            InferenceRule::new("datum", Text),
            InferenceRule::new("číslo", Integer),
            InferenceRule::new("cen", Real),
            InferenceRule::new("celk", Real),
            InferenceRule::new("dph", Real),
            InferenceRule::new("spár", Integer),
            InferenceRule::new("tisk", Integer),
            InferenceRule::new("potvrz", Integer),
            InferenceRule::new("schvál", Integer),
        ])
    }
}

/// Infers a header type with the default rule list.
pub fn infer_column_type(header: &str) -> ColumnType {
    InferenceRules::default().infer(header)
}

/// Removes diacritics: compatibility decomposition, then combining marks dropped.
pub fn strip_diacritics(value: &str) -> String {
    value.nfkd().filter(|ch| !is_combining_mark(*ch)).collect()
}

/// Turns raw header text into an ASCII-safe, space-free identifier.
///
/// Idempotent: normalizing an already normalized identifier returns it
/// unchanged.
pub fn normalize_identifier(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}').trim();
    strip_diacritics(trimmed)
        .chars()
        .map(|ch| {
            if ch.is_whitespace() || !ch.is_ascii() {
                IDENTIFIER_JOIN
            } else {
                ch
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infers_czech_headers() {
        assert_eq!(infer_column_type("Množství celkem"), ColumnType::Real);
        assert_eq!(infer_column_type("Číslo dokladu"), ColumnType::Integer);
        assert_eq!(infer_column_type("Datum vystavení"), ColumnType::Text);
        assert_eq!(infer_column_type("Jednotková cena"), ColumnType::Real);
        assert_eq!(infer_column_type("Dodavatel"), ColumnType::Text);
    }

    #[test]
    fn rule_matching_ignores_case_on_both_sides() {
        assert_eq!(infer_column_type("Sazba DPH"), ColumnType::Real);
        assert_eq!(infer_column_type("SCHVÁLENO"), ColumnType::Integer);
    }

    #[test]
    fn first_rule_wins() {
        // "datum" precedes "celk"
        assert_eq!(infer_column_type("Datum celkem"), ColumnType::Text);
        let rules = InferenceRules::new(vec![
            InferenceRule::new("a", ColumnType::Integer),
            InferenceRule::new("ab", ColumnType::Real),
        ]);
        assert_eq!(rules.infer("xaby"), ColumnType::Integer);
    }

    #[test]
    fn normalizes_czech_identifiers() {
        assert_eq!(normalize_identifier("Množství celkem"), "Mnozstvi_celkem");
        assert_eq!(normalize_identifier("Typ zboží"), "Typ_zbozi");
        assert_eq!(normalize_identifier("\u{feff}Dodavatel "), "Dodavatel");
    }

    #[test]
    fn non_decomposable_characters_become_join() {
        assert_eq!(normalize_identifier("Straße"), "Stra_e");
        assert_eq!(normalize_identifier("tab\there"), "tab_here");
    }

    #[test]
    fn normalization_is_idempotent_for_examples() {
        for raw in ["Množství celkem", " CZ ano/ne", "Číslo", "ä ö ü"] {
            let once = normalize_identifier(raw);
            assert_eq!(normalize_identifier(&once), once);
        }
    }
}
