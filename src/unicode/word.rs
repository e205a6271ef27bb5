//! Word boundaries for pointer word-selection.

use std::ops::Range;
use unicode_segmentation::UnicodeSegmentation;

/// Char range of the word-boundary segment containing `offset`.
///
/// Mirrors double-click selection: a word selects the word, punctuation
/// selects itself, whitespace selects the whitespace run. Offsets at or past
/// the end select the last segment; empty text yields `0..0`.
#[must_use]
pub fn word_at(text: &str, offset: usize) -> Range<usize> {
    let mut start = 0;
    let mut last = 0..0;
    for word in text.split_word_bounds() {
        let end = start + word.chars().count();
        if offset < end {
            return start..end;
        }
        last = start..end;
        start = end;
    }
    last
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_at_selects_word() {
        assert_eq!(word_at("hello world", 1), 0..5);
        assert_eq!(word_at("hello world", 6), 6..11);
    }

    #[test]
    fn test_word_at_separates_punctuation() {
        let text = "see שלום, ok";
        assert_eq!(word_at(text, 5), 4..8);
        assert_eq!(word_at(text, 8), 8..9);
    }

    #[test]
    fn test_word_at_whitespace_and_bounds() {
        assert_eq!(word_at("a  b", 1), 1..3);
        assert_eq!(word_at("abc", 10), 0..3);
        assert_eq!(word_at("", 0), 0..0);
    }
}
