//! Deterministic monospace layout for the headless surfaces.
//!
//! Each char advances `width(ch) * advance` where `width` is its terminal cell
//! width and `advance` derives from the font size and letter spacing. Rows
//! wrap greedily at the last whitespace (or anywhere, for `break-all` /
//! `overflow-wrap: anywhere`). Both headless surfaces use this model, so their
//! rows agree exactly when their mirrored metrics agree.

use crate::geometry::{FontMetrics, OverflowWrap, WordBreak, WrapStyle};
use std::ops::Range;
use unicode_width::UnicodeWidthChar;

/// Glyph advance as a fraction of the font size.
const ADVANCE_RATIO: f64 = 0.6;

/// Slack for float comparison against the content edge.
const EDGE_EPSILON: f64 = 1e-6;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutMetrics {
    pub content_width: f64,
    pub advance_px: f64,
    pub word_spacing_px: f64,
    pub text_indent_px: f64,
    pub line_height_px: f64,
    pub tab_size: usize,
    pub wraps: bool,
    pub break_anywhere: bool,
}

impl LayoutMetrics {
    #[must_use]
    pub fn new(font: &FontMetrics, wrap: &WrapStyle, content_width: f64) -> Self {
        Self {
            content_width,
            advance_px: font.size_px.mul_add(ADVANCE_RATIO, font.letter_spacing_px),
            word_spacing_px: font.word_spacing_px,
            text_indent_px: font.text_indent_px,
            line_height_px: font.line_height_px,
            tab_size: usize::from(wrap.tab_size),
            wraps: wrap.white_space.wraps(),
            break_anywhere: wrap.word_break == WordBreak::BreakAll
                || wrap.overflow_wrap == OverflowWrap::Anywhere,
        }
    }

    /// Advance of `ch` when the pen is at `x` within the row.
    #[must_use]
    pub fn char_advance(&self, ch: char, x: f64) -> f64 {
        match ch {
            '\t' => {
                let stop = self.advance_px * self.tab_size as f64;
                if stop > 0.0 { stop - x % stop } else { 0.0 }
            }
            ' ' => self.advance_px + self.word_spacing_px,
            _ => ch.width().unwrap_or(0) as f64 * self.advance_px,
        }
    }
}

/// Char ranges of the visual rows of one logical line. Never empty.
#[must_use]
pub fn wrap_line(text: &str, metrics: &LayoutMetrics) -> Vec<Range<usize>> {
    let chars: Vec<char> = text.chars().collect();
    let mut rows = Vec::new();
    let mut start = 0;
    let mut x = metrics.text_indent_px;
    let mut last_break: Option<usize> = None;

    let mut i = 0;
    while i < chars.len() {
        let ch = chars[i];
        if ch.is_whitespace() {
            // Preserved trailing whitespace hangs past the edge.
            x += metrics.char_advance(ch, x);
            i += 1;
            if !metrics.break_anywhere {
                last_break = Some(i);
            }
            continue;
        }

        let advance = metrics.char_advance(ch, x);
        if metrics.wraps && i > start && x + advance > metrics.content_width + EDGE_EPSILON {
            let at = match last_break {
                Some(b) if b > start => b,
                _ => i,
            };
            rows.push(start..at);
            start = at;
            last_break = None;
            x = advance_over(&chars[start..i], 0.0, metrics);
        }
        x += metrics.char_advance(ch, x);
        i += 1;
    }
    rows.push(start..chars.len());
    rows
}

/// Pen position after laying out `chars` from `x`.
fn advance_over(chars: &[char], x: f64, metrics: &LayoutMetrics) -> f64 {
    chars.iter().fold(x, |x, &ch| x + metrics.char_advance(ch, x))
}

/// A visual row: part of one logical line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VisualRow {
    pub line: usize,
    pub range: Range<usize>,
}

/// Rows of a whole text value.
#[derive(Clone, Debug, PartialEq)]
pub struct TextLayout {
    rows: Vec<VisualRow>,
    line_height_px: f64,
    width_px: f64,
}

impl TextLayout {
    #[must_use]
    pub fn new<'a, I>(lines: I, metrics: &LayoutMetrics) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut rows = Vec::new();
        let mut width_px: f64 = 0.0;
        for (line, text) in lines.into_iter().enumerate() {
            let chars: Vec<char> = text.chars().collect();
            for range in wrap_line(text, metrics) {
                let indent = if range.start == 0 {
                    metrics.text_indent_px
                } else {
                    0.0
                };
                width_px = width_px.max(advance_over(&chars[range.clone()], indent, metrics));
                rows.push(VisualRow { line, range });
            }
        }
        Self {
            rows,
            line_height_px: metrics.line_height_px,
            width_px,
        }
    }

    #[must_use]
    pub fn rows(&self) -> &[VisualRow] {
        &self.rows
    }

    /// Height of all rows, padding excluded.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.rows.len() as f64 * self.line_height_px
    }

    /// Width of the widest row, padding excluded. Can exceed the content
    /// width when lines do not wrap.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.width_px
    }

    /// Row holding `local` of `line`. A wrap-point offset belongs to the row it
    /// starts; the line's end offset belongs to its last row.
    #[must_use]
    pub fn row_of(&self, line: usize, local: usize) -> Option<usize> {
        let first = self.rows.iter().position(|r| r.line == line)?;
        let mut found = first;
        for (idx, row) in self.rows.iter().enumerate().skip(first) {
            if row.line != line {
                break;
            }
            found = idx;
            if local < row.range.end {
                break;
            }
        }
        Some(found)
    }

    /// Top of a row relative to the content box.
    #[must_use]
    pub fn row_top(&self, row: usize) -> f64 {
        row as f64 * self.line_height_px
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::WhiteSpace;

    /// 10px advance, 20px rows.
    fn metrics(content_width: f64) -> LayoutMetrics {
        let font = FontMetrics {
            size_px: 10.0 / ADVANCE_RATIO,
            ..FontMetrics::default()
        };
        LayoutMetrics::new(&font, &WrapStyle::default(), content_width)
    }

    #[test]
    fn test_short_line_is_one_row() {
        assert_eq!(wrap_line("hello", &metrics(100.0)), vec![0..5]);
        assert_eq!(wrap_line("", &metrics(100.0)), vec![0..0]);
    }

    #[test]
    fn test_wraps_at_last_whitespace() {
        // 6 columns: "hello " fits, "world" moves down.
        assert_eq!(wrap_line("hello world", &metrics(60.0)), vec![0..6, 6..11]);
    }

    #[test]
    fn test_long_word_breaks_at_edge() {
        assert_eq!(wrap_line("abcdefgh", &metrics(30.0)), vec![0..3, 3..6, 6..8]);
    }

    #[test]
    fn test_break_all_ignores_whitespace() {
        let font = FontMetrics {
            size_px: 10.0 / ADVANCE_RATIO,
            ..FontMetrics::default()
        };
        let wrap = WrapStyle {
            word_break: WordBreak::BreakAll,
            ..WrapStyle::default()
        };
        let m = LayoutMetrics::new(&font, &wrap, 60.0);
        assert_eq!(wrap_line("hello world", &m), vec![0..6, 6..11]);
        assert_eq!(wrap_line("ab cdefgh", &m), vec![0..6, 6..9]);
    }

    #[test]
    fn test_pre_never_wraps() {
        let wrap = WrapStyle {
            white_space: WhiteSpace::Pre,
            ..WrapStyle::default()
        };
        let m = LayoutMetrics::new(&FontMetrics::default(), &wrap, 10.0);
        assert_eq!(wrap_line("a very long line", &m), vec![0..16]);
    }

    #[test]
    fn test_layout_width_is_widest_row() {
        let layout = TextLayout::new(["abc", "abcdefg", ""], &metrics(200.0));
        assert!((layout.width() - 70.0).abs() < 1e-9);

        let wrap = WrapStyle {
            white_space: WhiteSpace::Pre,
            ..WrapStyle::default()
        };
        let font = FontMetrics {
            size_px: 10.0 / ADVANCE_RATIO,
            ..FontMetrics::default()
        };
        let m = LayoutMetrics::new(&font, &wrap, 30.0);
        let layout = TextLayout::new(["x".repeat(40).as_str()], &m);
        assert!((layout.width() - 400.0).abs() < 1e-9);
    }

    #[test]
    fn test_wide_chars_take_two_cells() {
        assert_eq!(wrap_line("中文字", &metrics(40.0)), vec![0..2, 2..3]);
    }

    #[test]
    fn test_layout_rows_and_row_of() {
        let m = metrics(60.0);
        let layout = TextLayout::new(["hello world", "", "x"], &m);
        assert_eq!(layout.rows().len(), 4);
        assert!((layout.height() - 80.0).abs() < f64::EPSILON);
        assert_eq!(layout.row_of(0, 0), Some(0));
        assert_eq!(layout.row_of(0, 6), Some(1));
        assert_eq!(layout.row_of(0, 11), Some(1));
        assert_eq!(layout.row_of(1, 0), Some(2));
        assert_eq!(layout.row_of(2, 0), Some(3));
        assert_eq!(layout.row_of(3, 0), None);
    }
}
