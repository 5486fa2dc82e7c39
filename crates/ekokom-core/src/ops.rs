//! Pure relational operators used by the pipeline stages.

use std::collections::BTreeMap;

use ekokom_model::Relation;

/// Nested-loop join on substring containment.
///
/// Emits `(left_row, right_row)` for every pair where the right key occurs in
/// the left key (case-sensitive). The predicate is neither an equality nor
/// symmetric, and a left row matching several right rows appears once per
/// match. Right rows rejected by `include_right` never match.
pub fn contains_join<F>(
    left: &Relation,
    left_key: usize,
    right: &Relation,
    right_key: usize,
    mut include_right: F,
) -> Vec<(usize, usize)>
where
    F: FnMut(usize, &str) -> bool,
{
    let eligible: Vec<(usize, &str)> = (0..right.len())
        .map(|idx| (idx, right.value(idx, right_key)))
        .filter(|(idx, key)| include_right(*idx, key))
        .collect();
    let mut pairs = Vec::new();
    for left_idx in 0..left.len() {
        let haystack = left.value(left_idx, left_key);
        for (right_idx, needle) in &eligible {
            if haystack.contains(needle) {
                pairs.push((left_idx, *right_idx));
            }
        }
    }
    pairs
}

/// Groups items by key; groups iterate in key order, items keep input order.
pub fn group_by<'a, T, K, F>(items: impl IntoIterator<Item = &'a T>, mut key: F) -> BTreeMap<K, Vec<&'a T>>
where
    T: 'a,
    K: Ord,
    F: FnMut(&T) -> K,
{
    let mut groups: BTreeMap<K, Vec<&'a T>> = BTreeMap::new();
    for item in items {
        groups.entry(key(item)).or_default().push(item);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use ekokom_model::Column;

    fn relation(name: &str, values: &[&str]) -> Relation {
        let mut relation = Relation::new(name, vec![Column::text("key")]);
        for value in values {
            relation.push_row(vec![(*value).to_string()]).unwrap();
        }
        relation
    }

    #[test]
    fn join_is_substring_and_case_sensitive() {
        let left = relation("left", &["ACME Corp", "acme ltd", "Globex"]);
        let right = relation("right", &["ACME", "Glob"]);
        let pairs = contains_join(&left, 0, &right, 0, |_, _| true);
        assert_eq!(pairs, vec![(0, 0), (2, 1)]);
    }

    #[test]
    fn join_fans_out_without_dedup() {
        let left = relation("left", &["ACME Corp"]);
        let right = relation("right", &["ACME", "Corp", "ACME"]);
        let pairs = contains_join(&left, 0, &right, 0, |_, _| true);
        assert_eq!(pairs, vec![(0, 0), (0, 1), (0, 2)]);
    }

    #[test]
    fn join_is_not_symmetric() {
        let left = relation("left", &["ACME"]);
        let right = relation("right", &["ACME Corp"]);
        assert!(contains_join(&left, 0, &right, 0, |_, _| true).is_empty());
    }

    #[test]
    fn excluded_right_rows_never_match() {
        let left = relation("left", &["ACME"]);
        let right = relation("right", &["", "ACME"]);
        let pairs = contains_join(&left, 0, &right, 0, |_, key| !key.is_empty());
        assert_eq!(pairs, vec![(0, 1)]);
    }

    #[test]
    fn group_by_orders_keys() {
        let items = vec![("b", 1), ("a", 2), ("b", 3)];
        let groups = group_by(&items, |item| item.0);
        let keys: Vec<&str> = groups.keys().copied().collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(groups["b"], vec![&("b", 1), &("b", 3)]);
    }
}
