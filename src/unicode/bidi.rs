//! Bidirectional (BiDi) ordering for overlay lines.
//!
//! Line containers inherit the paragraph's base direction; highlighted spans
//! are isolated so the bidi algorithm cannot move a highlighted run relative to
//! the plain text around it. [`visual_order`] models that: isolated ranges are
//! wrapped in FSI/PDI before running UAX #9.

use std::ops::Range;
use unicode_bidi::{BidiInfo, Level};

/// First Strong Isolate.
const FSI: char = '\u{2068}';
/// Pop Directional Isolate.
const PDI: char = '\u{2069}';

/// Base paragraph direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Direction {
    #[default]
    Ltr,
    Rtl,
}

impl Direction {
    #[must_use]
    pub const fn is_rtl(self) -> bool {
        matches!(self, Self::Rtl)
    }

    fn level(self) -> Level {
        match self {
            Self::Ltr => Level::ltr(),
            Self::Rtl => Level::rtl(),
        }
    }
}

/// How an overlay element participates in the bidi algorithm.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BidiMode {
    /// Take part in the parent's reordering.
    #[default]
    Inherit,
    /// Reorder internally only; act as a single neutral to the parent.
    Isolate,
}

/// Logical char indices of `line` in left-to-right visual order.
///
/// `isolates` are char ranges laid out as isolated runs; they must not
/// overlap (display segments never do). Out-of-range bounds are clamped.
#[must_use]
pub fn visual_order(line: &str, base: Direction, isolates: &[Range<usize>]) -> Vec<usize> {
    let char_count = line.chars().count();
    if char_count == 0 {
        return Vec::new();
    }

    let mut opens = vec![0usize; char_count + 1];
    let mut closes = vec![0usize; char_count + 1];
    for range in isolates {
        let end = range.end.min(char_count);
        let start = range.start.min(end);
        if start < end {
            opens[start] += 1;
            closes[end] += 1;
        }
    }

    // `logical[i]` is the source index of the i-th char of `marked`.
    let mut marked = String::with_capacity(line.len() + isolates.len() * 6);
    let mut logical: Vec<Option<usize>> = Vec::with_capacity(char_count + isolates.len() * 2);
    for (i, ch) in line.chars().enumerate() {
        push_marks(&mut marked, &mut logical, PDI, closes[i]);
        push_marks(&mut marked, &mut logical, FSI, opens[i]);
        marked.push(ch);
        logical.push(Some(i));
    }
    push_marks(&mut marked, &mut logical, PDI, closes[char_count]);

    let mut char_at_byte = vec![0usize; marked.len()];
    for (char_idx, (byte_idx, _)) in marked.char_indices().enumerate() {
        char_at_byte[byte_idx] = char_idx;
    }

    let info = BidiInfo::new(&marked, Some(base.level()));
    let mut order = Vec::with_capacity(char_count);
    for para in &info.paragraphs {
        let (levels, runs) = info.visual_runs(para, para.range.clone());
        for run in runs {
            let mut chars: Vec<usize> = marked[run.clone()]
                .char_indices()
                .filter_map(|(b, _)| logical[char_at_byte[run.start + b]])
                .collect();
            if levels[run.start].is_rtl() {
                chars.reverse();
            }
            order.extend(chars);
        }
    }
    order
}

fn push_marks(marked: &mut String, logical: &mut Vec<Option<usize>>, mark: char, n: usize) {
    for _ in 0..n {
        marked.push(mark);
        logical.push(None);
    }
}

/// Visual slot (0-based, left to right) of each logical char.
#[must_use]
pub fn visual_slots(order: &[usize]) -> Vec<usize> {
    let mut slots = vec![0; order.len()];
    for (slot, &logical) in order.iter().enumerate() {
        if let Some(entry) = slots.get_mut(logical) {
            *entry = slot;
        }
    }
    slots
}
