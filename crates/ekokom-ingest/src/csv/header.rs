//! Header cleanup and identifier assignment.

use std::collections::BTreeSet;

use crate::schema::{IDENTIFIER_JOIN, normalize_identifier};

/// Strips a byte-order mark and surrounding whitespace from a header cell.
pub fn clean_header(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}').trim().to_string()
}

/// Normalized identifiers for a header row.
///
/// Blank headers get a positional name and repeated identifiers get a
/// numeric suffix, so every column of a relation is addressable.
pub fn column_identifiers(labels: &[String]) -> Vec<String> {
    let mut seen = BTreeSet::new();
    labels
        .iter()
        .enumerate()
        .map(|(idx, label)| {
            let base = match normalize_identifier(label) {
                name if name.is_empty() => format!("column{IDENTIFIER_JOIN}{}", idx + 1),
                name => name,
            };
            let mut candidate = base.clone();
            let mut suffix = 2usize;
            while !seen.insert(candidate.clone()) {
                candidate = format!("{base}{IDENTIFIER_JOIN}{suffix}");
                suffix += 1;
            }
            candidate
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_header() {
        assert_eq!(clean_header("\u{feff} Dodavatel  "), "Dodavatel");
        assert_eq!(clean_header("Typ zboží"), "Typ zboží");
    }

    #[test]
    fn test_column_identifiers() {
        let labels = vec![
            "Dodavatel".to_string(),
            "".to_string(),
            "Typ zboží".to_string(),
            "Typ zbozi".to_string(),
        ];
        assert_eq!(
            column_identifiers(&labels),
            vec!["Dodavatel", "column_2", "Typ_zbozi", "Typ_zbozi_2"]
        );
    }
}
