//! Computed style values shared by the native widget and the overlay.

use crate::color::Rgba;
use crate::unicode::Direction;

/// Per-edge lengths in CSS pixels (padding or border widths).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoxEdges {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl BoxEdges {
    #[must_use]
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    #[must_use]
    pub const fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }

    /// `left + right`.
    #[must_use]
    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    /// `top + bottom`.
    #[must_use]
    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
    Oblique,
}

/// Font and spacing metrics that decide glyph advances.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FontMetrics {
    pub family: String,
    pub size_px: f64,
    pub weight: u16,
    pub style: FontStyle,
    pub line_height_px: f64,
    pub letter_spacing_px: f64,
    pub word_spacing_px: f64,
    pub text_indent_px: f64,
}

impl Default for FontMetrics {
    fn default() -> Self {
        Self {
            family: "monospace".to_string(),
            size_px: 16.0,
            weight: 400,
            style: FontStyle::Normal,
            line_height_px: 20.0,
            letter_spacing_px: 0.0,
            word_spacing_px: 0.0,
            text_indent_px: 0.0,
        }
    }
}

/// CSS `white-space`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WhiteSpace {
    Normal,
    NoWrap,
    Pre,
    #[default]
    PreWrap,
    PreLine,
    BreakSpaces,
}

impl WhiteSpace {
    /// Whether lines wrap at the content edge.
    #[must_use]
    pub const fn wraps(self) -> bool {
        !matches!(self, Self::NoWrap | Self::Pre)
    }
}

/// CSS `word-break`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WordBreak {
    #[default]
    Normal,
    BreakAll,
    KeepAll,
}

/// CSS `overflow-wrap`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OverflowWrap {
    Normal,
    #[default]
    BreakWord,
    Anywhere,
}

/// Every property that influences where a line wraps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WrapStyle {
    pub white_space: WhiteSpace,
    pub word_break: WordBreak,
    pub overflow_wrap: OverflowWrap,
    pub tab_size: u8,
}

impl Default for WrapStyle {
    fn default() -> Self {
        Self {
            white_space: WhiteSpace::PreWrap,
            word_break: WordBreak::Normal,
            overflow_wrap: OverflowWrap::BreakWord,
            tab_size: 8,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TextAlign {
    #[default]
    Start,
    End,
    Left,
    Right,
    Center,
    Justify,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WritingMode {
    #[default]
    HorizontalTb,
    VerticalRl,
    VerticalLr,
}

/// The native widget's resolved style, as the platform reports it.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComputedStyle {
    pub padding: BoxEdges,
    pub border: BoxEdges,
    pub border_color: Rgba,
    pub font: FontMetrics,
    pub wrap: WrapStyle,
    pub text_align: TextAlign,
    pub direction: Direction,
    pub writing_mode: WritingMode,
}

/// Scroll position of a scroll container.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollOffset {
    pub top: f64,
    pub left: f64,
}

impl ScrollOffset {
    #[must_use]
    pub const fn new(top: f64, left: f64) -> Self {
        Self { top, left }
    }

    /// Largest per-axis difference to `other`.
    #[must_use]
    pub fn max_delta(&self, other: &Self) -> f64 {
        (self.top - other.top).abs().max((self.left - other.left).abs())
    }
}
