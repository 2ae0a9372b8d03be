use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Search key transform: lower-case, decompose, drop combining marks.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .nfd()
        .filter(|character| !is_combining_mark(*character))
        .collect()
}

pub(super) fn matches_search(haystacks: &[&str], needle: &str) -> bool {
    haystacks
        .iter()
        .any(|haystack| normalize(haystack).contains(needle))
}

#[cfg(test)]
mod tests {
    use super::normalize;

    #[test]
    fn folds_case_and_accents() {
        assert_eq!(normalize("CAFÉ"), "cafe");
        assert_eq!(normalize("cafe"), "cafe");
        assert_eq!(normalize("Álgebra Lineal"), "algebra lineal");
    }

    #[test]
    fn strips_tilde_from_enye() {
        assert_eq!(normalize("Señor"), "senor");
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn precomposed_and_decomposed_forms_agree() {
        assert_eq!(normalize("e\u{0301}xito"), normalize("\u{00e9}xito"));
    }
}
