//! Text comparison shared by every case-insensitive match.

use unicode_normalization::UnicodeNormalization;

/// Composed, lowercased form of `value`.
///
/// Precomposed and decomposed accents fold to the same string, so `obleč`
/// matches `oblec\u{30c}`.
pub fn fold_case(value: &str) -> String {
    value.nfc().collect::<String>().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decomposed_and_precomposed_fold_equal() {
        assert_eq!(fold_case("OBLEČ"), fold_case("oblec\u{30c}"));
        assert_eq!(fold_case("Kůže"), "kůže");
    }
}
