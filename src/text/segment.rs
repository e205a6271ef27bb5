//! Highlight segmentation.
//!
//! Maps absolute highlight ranges onto per-line, contiguous, non-overlapping
//! display segments. Overlaps resolve as "earliest start wins the contested
//! region": a later-starting range only contributes the part extending past
//! everything emitted before it.

use crate::style::StyleTag;
use crate::text::lines::{LineRecord, index_lines, line_of};
use std::collections::BTreeMap;
use std::ops::Range;

/// Whole-line decorations keyed by line index.
pub type LineHighlights = BTreeMap<usize, StyleTag>;

/// Absolute, half-open char range with a style.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HighlightRange {
    pub start: usize,
    /// Exclusive.
    pub end: usize,
    pub style: StyleTag,
}

impl HighlightRange {
    #[must_use]
    pub fn new(start: usize, end: usize, style: impl Into<StyleTag>) -> Self {
        Self {
            start,
            end,
            style: style.into(),
        }
    }

    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// A styled or plain slice of one line, in local char offsets.
#[derive(Clone, Debug, PartialEq)]
pub struct DisplaySegment {
    pub line_index: usize,
    pub local_start: usize,
    /// Exclusive.
    pub local_end: usize,
    pub style: Option<StyleTag>,
    /// Index of the declaring [`HighlightRange`] for styled segments.
    pub source: Option<usize>,
}

impl DisplaySegment {
    #[must_use]
    pub fn len(&self) -> usize {
        self.local_end - self.local_start
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.local_end <= self.local_start
    }

    #[must_use]
    pub fn is_styled(&self) -> bool {
        self.style.is_some()
    }
}

/// All segments of one line plus its whole-line decoration.
#[derive(Clone, Debug, PartialEq)]
pub struct LineSegments {
    pub line_index: usize,
    /// Absolute offset of the line start.
    pub start_offset: usize,
    pub line_style: Option<StyleTag>,
    /// Empty only for an empty line.
    pub segments: Vec<DisplaySegment>,
}

impl LineSegments {
    /// Absolute start offset of a segment of this line.
    #[must_use]
    pub fn absolute_start(&self, segment: &DisplaySegment) -> usize {
        self.start_offset + segment.local_start
    }
}

/// A range clipped to one line.
#[derive(Clone, Copy, Debug)]
struct Clipped {
    start: usize,
    end: usize,
    source: usize,
}

/// Segment `text` for rendering.
///
/// Returns one [`LineSegments`] per line of `text`, in line order.
#[must_use]
pub fn segment(
    text: &str,
    ranges: &[HighlightRange],
    line_highlights: &LineHighlights,
) -> Vec<LineSegments> {
    segment_lines(&index_lines(text), ranges, line_highlights)
}

/// Segment pre-indexed lines.
#[must_use]
pub fn segment_lines(
    lines: &[LineRecord],
    ranges: &[HighlightRange],
    line_highlights: &LineHighlights,
) -> Vec<LineSegments> {
    let mut per_line: Vec<Vec<Clipped>> = vec![Vec::new(); lines.len()];

    for (source, range) in ranges.iter().enumerate() {
        if range.is_empty() {
            continue;
        }
        let (first, _) = line_of(range.start, lines);
        let (last, _) = line_of(range.end - 1, lines);
        for (line, record) in lines.iter().enumerate().take(last + 1).skip(first) {
            let start = range.start.saturating_sub(record.start_offset);
            let end = range
                .end
                .saturating_sub(record.start_offset)
                .min(record.len());
            if start < end {
                per_line[line].push(Clipped { start, end, source });
            }
        }
    }

    lines
        .iter()
        .zip(per_line)
        .enumerate()
        .map(|(line_index, (record, mut clipped))| {
            // Stable: declaration order breaks ties on equal starts.
            clipped.sort_by_key(|c| c.start);
            LineSegments {
                line_index,
                start_offset: record.start_offset,
                line_style: line_highlights.get(&line_index).cloned(),
                segments: sweep(line_index, record.len(), &clipped, ranges),
            }
        })
        .collect()
}

fn sweep(
    line_index: usize,
    line_len: usize,
    clipped: &[Clipped],
    ranges: &[HighlightRange],
) -> Vec<DisplaySegment> {
    let plain = |start, end| DisplaySegment {
        line_index,
        local_start: start,
        local_end: end,
        style: None,
        source: None,
    };

    let mut segments = Vec::with_capacity(clipped.len() * 2 + 1);
    let mut last = 0;
    for c in clipped {
        if c.end <= last {
            continue;
        }
        let effective_start = c.start.max(last);
        if effective_start > last {
            segments.push(plain(last, effective_start));
        }
        segments.push(DisplaySegment {
            line_index,
            local_start: effective_start,
            local_end: c.end,
            style: Some(ranges[c.source].style.clone()),
            source: Some(c.source),
        });
        last = c.end;
    }
    if last < line_len {
        segments.push(plain(last, line_len));
    }
    segments
}
