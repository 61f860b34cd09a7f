use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Folds free text into the form stored in `songs.normalized_title`.
///
/// Lowercases, strips diacritics, drops apostrophes so that contractions
/// stay one word, turns any other punctuation into a space and collapses
/// runs of whitespace.
pub fn normalize_text(s: &str) -> String {
    let folded: String = s
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .filter(|c| *c != '\'' && *c != '\u{2019}')
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();

    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Tokens of the normalized query worth using as substring pre-filters.
pub fn query_tokens(normalized: &str) -> Vec<String> {
    normalized
        .split_whitespace()
        .filter(|t| t.chars().count() >= 2)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_collapses_whitespace() {
        assert_eq!(normalize_text("  Shape   Of YOU "), "shape of you");
    }

    #[test]
    fn strips_diacritics() {
        assert_eq!(normalize_text("Beyoncé"), "beyonce");
        assert_eq!(normalize_text("Motörhead"), "motorhead");
    }

    #[test]
    fn drops_apostrophes_and_splits_on_punctuation() {
        assert_eq!(normalize_text("Don't Stop Me Now"), "dont stop me now");
        assert_eq!(normalize_text("Rock'n'Roll"), "rocknroll");
        assert_eq!(normalize_text("Hello, World! (Remix)"), "hello world remix");
        assert_eq!(normalize_text("AC/DC"), "ac dc");
    }

    #[test]
    fn query_tokens_skip_single_characters() {
        assert_eq!(
            query_tokens("a day in the life"),
            vec!["day", "in", "the", "life"]
        );
        assert!(query_tokens("").is_empty());
    }
}
