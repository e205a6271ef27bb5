//! Overlay document: what the overlay surface draws.
//!
//! Built from the text value, the highlight ranges and the whole-line
//! highlights. Each line container inherits the paragraph bidi direction; each
//! styled span is isolated. An empty line carries a single non-breaking
//! placeholder so its row keeps its height.

use crate::style::StyleTag;
use crate::text::{HighlightRange, LineHighlights, LineIndex, LineSegments, segment_lines};
use crate::unicode::{BidiMode, Direction};
use std::fmt;
use std::ops::Range;

/// Text of the placeholder span rendered for an empty line.
pub const PLACEHOLDER: &str = "\u{00A0}";

/// A run of text inside one overlay line.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlaySpan {
    pub text: String,
    pub local_start: usize,
    pub local_end: usize,
    pub style: Option<StyleTag>,
    /// Declaring highlight index for styled spans.
    pub source: Option<usize>,
    pub bidi: BidiMode,
    /// True only for the filler of an empty line.
    pub placeholder: bool,
}

/// One line container.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayLine {
    pub index: usize,
    pub start_offset: usize,
    /// Whole-line decoration wrapping the spans.
    pub style: Option<StyleTag>,
    pub bidi: BidiMode,
    pub spans: Vec<OverlaySpan>,
}

impl OverlayLine {
    fn from_segments(line: &LineSegments, text: &crate::text::LineRecord) -> Self {
        let spans = if line.segments.is_empty() {
            vec![OverlaySpan {
                text: PLACEHOLDER.to_string(),
                local_start: 0,
                local_end: 0,
                style: None,
                source: None,
                bidi: BidiMode::Inherit,
                placeholder: true,
            }]
        } else {
            let bounds = text.byte_boundaries();
            line.segments
                .iter()
                .map(|seg| OverlaySpan {
                    text: text.text[bounds[seg.local_start]..bounds[seg.local_end]].to_string(),
                    local_start: seg.local_start,
                    local_end: seg.local_end,
                    bidi: if seg.is_styled() {
                        BidiMode::Isolate
                    } else {
                        BidiMode::Inherit
                    },
                    style: seg.style.clone(),
                    source: seg.source,
                    placeholder: false,
                })
                .collect()
        };
        Self {
            index: line.line_index,
            start_offset: line.start_offset,
            style: line.line_style.clone(),
            bidi: BidiMode::Inherit,
            spans,
        }
    }

    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.spans.first().is_some_and(|s| s.placeholder)
    }

    /// The line's logical text; empty for a placeholder line.
    #[must_use]
    pub fn text(&self) -> String {
        self.spans
            .iter()
            .filter(|s| !s.placeholder)
            .map(|s| s.text.as_str())
            .collect()
    }

    /// Local char ranges of isolated spans.
    #[must_use]
    pub fn isolates(&self) -> Vec<Range<usize>> {
        self.spans
            .iter()
            .filter(|s| s.bidi == BidiMode::Isolate)
            .map(|s| s.local_start..s.local_end)
            .collect()
    }
}

/// Everything the overlay renders for one text value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OverlayDocument {
    pub direction: Direction,
    pub lines: Vec<OverlayLine>,
}

impl OverlayDocument {
    #[must_use]
    pub fn build(
        text: &str,
        highlights: &[HighlightRange],
        line_highlights: &LineHighlights,
        direction: Direction,
    ) -> Self {
        let index = LineIndex::new(text);
        let lines = segment_lines(index.records(), highlights, line_highlights)
            .iter()
            .zip(index.records())
            .map(|(segments, record)| OverlayLine::from_segments(segments, record))
            .collect();
        Self { direction, lines }
    }

    #[must_use]
    pub fn line(&self, index: usize) -> Option<&OverlayLine> {
        self.lines.get(index)
    }

    /// Reassembled text value.
    #[must_use]
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(OverlayLine::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// `(line_index, local_start)` of the span starting at absolute `offset`.
    #[must_use]
    pub fn span_starting_at(&self, offset: usize) -> Option<(usize, usize)> {
        self.lines.iter().find_map(|line| {
            line.spans
                .iter()
                .filter(|s| !s.placeholder)
                .find(|s| line.start_offset + s.local_start == offset)
                .map(|s| (line.index, s.local_start))
        })
    }
}

impl fmt::Display for OverlayDocument {
    /// One row per line: `index[ {line style}]| spans`, styled spans as
    /// `[{style}|text]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", line.index)?;
            if let Some(style) = &line.style {
                write!(f, " {style}")?;
            }
            write!(f, "|")?;
            for span in &line.spans {
                match &span.style {
                    Some(style) => write!(f, "[{style}|{}]", span.text)?,
                    None if span.placeholder => write!(f, "<nbsp>")?,
                    None => write!(f, "{}", span.text)?,
                }
            }
        }
        Ok(())
    }
}
