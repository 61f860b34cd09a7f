//! Ordinal and number words used in "add the last two" style requests.

use std::ops::Range;

/// Index sentinel meaning "count from the end".
pub const LAST: i64 = -1;

const ORDINALS: &[(&str, i64)] = &[
    ("first", 0),
    ("second", 1),
    ("third", 2),
    ("fourth", 3),
    ("fifth", 4),
    ("sixth", 5),
    ("seventh", 6),
    ("eighth", 7),
    ("ninth", 8),
    ("last", LAST),
];

const NUMBER_WORDS: &[(&str, i64)] = &[
    ("zero", 0),
    ("one", 1),
    ("two", 2),
    ("three", 3),
    ("four", 4),
    ("five", 5),
    ("six", 6),
    ("seven", 7),
    ("eight", 8),
    ("nine", 9),
    ("ten", 10),
];

/// Maps "first".."ninth" to 0..8 and "last" to [`LAST`]. Numeric ordinals
/// ("1st", "22nd") and bare positive integers map to their 0-based index.
pub fn ordinal_to_index(word: &str) -> Option<i64> {
    let word = word.trim().to_lowercase();
    if let Some((_, index)) = ORDINALS.iter().find(|(w, _)| *w == word) {
        return Some(*index);
    }

    let digits = ["st", "nd", "rd", "th"]
        .iter()
        .find_map(|suffix| word.strip_suffix(suffix))
        .unwrap_or(word.as_str());
    match digits.parse::<i64>() {
        Ok(n) if n >= 1 => Some(n - 1),
        _ => None,
    }
}

/// Maps "zero".."ten" to their value, falling back to a literal
/// non-negative integer.
pub fn number_word_to_count(word: &str) -> Option<i64> {
    let word = word.trim().to_lowercase();
    if let Some((_, count)) = NUMBER_WORDS.iter().find(|(w, _)| *w == word) {
        return Some(*count);
    }
    word.parse::<i64>().ok().filter(|n| *n >= 0)
}

/// Turns a resolved position/count pair into a slice range over a list of
/// `len` items.
///
/// With only a position the window is that single item. With a count it
/// spans `count` items from the position, or the final `count` items when
/// the position is [`LAST`]. A bare count takes the first `count` items.
/// Windows are clamped at the end of the list; a start outside the list
/// yields `None`.
pub fn resolve_window(len: usize, position: Option<i64>, count: Option<i64>) -> Option<Range<usize>> {
    if len == 0 {
        return None;
    }
    let count = match count {
        Some(c) if c < 0 => return None,
        Some(c) => Some(c as usize),
        None => None,
    };

    match (position, count) {
        (None, None) => None,
        (None, Some(count)) => Some(0..count.min(len)),
        (Some(LAST), None) => Some(len - 1..len),
        (Some(LAST), Some(count)) => Some(len.saturating_sub(count)..len),
        (Some(index), _) if index < 0 || index as usize >= len => None,
        (Some(index), None) => {
            let start = index as usize;
            Some(start..start + 1)
        }
        (Some(index), Some(count)) => {
            let start = index as usize;
            Some(start..(start + count).min(len))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinal_words() {
        assert_eq!(ordinal_to_index("first"), Some(0));
        assert_eq!(ordinal_to_index(" Third "), Some(2));
        assert_eq!(ordinal_to_index("ninth"), Some(8));
        assert_eq!(ordinal_to_index("LAST"), Some(LAST));
        assert_eq!(ordinal_to_index("tenth"), None);
        assert_eq!(ordinal_to_index("banana"), None);
    }

    #[test]
    fn numeric_ordinals_and_digits() {
        assert_eq!(ordinal_to_index("1st"), Some(0));
        assert_eq!(ordinal_to_index("2nd"), Some(1));
        assert_eq!(ordinal_to_index("3rd"), Some(2));
        assert_eq!(ordinal_to_index("12th"), Some(11));
        assert_eq!(ordinal_to_index("4"), Some(3));
        assert_eq!(ordinal_to_index("0"), None);
        assert_eq!(ordinal_to_index("-2"), None);
    }

    #[test]
    fn number_words() {
        assert_eq!(number_word_to_count("zero"), Some(0));
        assert_eq!(number_word_to_count("Two"), Some(2));
        assert_eq!(number_word_to_count("ten"), Some(10));
        assert_eq!(number_word_to_count("12"), Some(12));
        assert_eq!(number_word_to_count("-1"), None);
        assert_eq!(number_word_to_count("eleven"), None);
    }

    #[test]
    fn window_position_only() {
        assert_eq!(resolve_window(5, Some(0), None), Some(0..1));
        assert_eq!(resolve_window(5, Some(LAST), None), Some(4..5));
        assert_eq!(resolve_window(5, Some(5), None), None);
    }

    #[test]
    fn window_position_and_count() {
        assert_eq!(resolve_window(5, Some(1), Some(2)), Some(1..3));
        assert_eq!(resolve_window(5, Some(3), Some(10)), Some(3..5));
        assert_eq!(resolve_window(5, Some(LAST), Some(2)), Some(3..5));
        assert_eq!(resolve_window(2, Some(LAST), Some(5)), Some(0..2));
    }

    #[test]
    fn window_count_only_and_degenerate_inputs() {
        assert_eq!(resolve_window(5, None, Some(3)), Some(0..3));
        assert_eq!(resolve_window(2, None, Some(3)), Some(0..2));
        assert_eq!(resolve_window(5, None, None), None);
        assert_eq!(resolve_window(0, Some(0), None), None);
        assert_eq!(resolve_window(5, Some(-3), None), None);
    }

    #[test]
    fn window_is_idempotent_over_the_same_snapshot() {
        let first = resolve_window(10, Some(LAST), Some(2));
        let second = resolve_window(10, Some(LAST), Some(2));
        assert_eq!(first, second);
        assert_eq!(first, Some(8..10));
    }
}
