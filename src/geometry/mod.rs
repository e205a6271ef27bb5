//! Geometry mirroring between the native widget and the overlay.
//!
//! Every sync pass reads a fresh [`GeometrySnapshot`] from the native widget
//! and writes the equivalent [`OverlayStyle`] onto the overlay, then copies the
//! scroll position. Any property that affects where a line wraps is mirrored;
//! missing one makes the overlay break lines differently from the widget.
//!
//! # Scrollbar compensation
//!
//! The overlay never shows a scrollbar. When the widget reserves a gutter for
//! one, the gutter width is added to the overlay's trailing padding (right for
//! LTR, left for RTL) so both content boxes have the same width:
//!
//! ```
//! use textarea_overlay::geometry::{BoxEdges, compensate_scrollbar};
//! use textarea_overlay::unicode::Direction;
//!
//! let padding = BoxEdges::uniform(8.0);
//! let ltr = compensate_scrollbar(padding, 15.0, Direction::Ltr);
//! assert_eq!(ltr.right, 23.0);
//! let rtl = compensate_scrollbar(padding, 15.0, Direction::Rtl);
//! assert_eq!(rtl.left, 23.0);
//! ```

mod style;

pub use style::{
    BoxEdges, ComputedStyle, FontMetrics, FontStyle, OverflowWrap, ScrollOffset, TextAlign,
    WhiteSpace, WordBreak, WrapStyle, WritingMode,
};

use crate::color::Rgba;
use crate::unicode::{BidiMode, Direction};
use crate::widget::{NativeWidget, OverlaySurface};

/// Allowed difference between native and overlay content widths.
///
/// Browsers round layout to device pixels; half a CSS pixel absorbs that.
pub const WIDTH_TOLERANCE_PX: f64 = 0.5;

/// Allowed difference between native and overlay scroll offsets.
pub const SCROLL_TOLERANCE_PX: f64 = 2.0;

/// Metrics read from the native widget for one sync pass. Never cached.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeometrySnapshot {
    pub padding: BoxEdges,
    pub border: BoxEdges,
    pub font: FontMetrics,
    pub wrap: WrapStyle,
    pub text_align: TextAlign,
    pub direction: Direction,
    pub writing_mode: WritingMode,
    /// Width of the vertical scrollbar gutter; zero when none is shown.
    pub scrollbar_width: f64,
    pub outer_width: f64,
    pub outer_height: f64,
}

impl GeometrySnapshot {
    /// Read the current metrics of `widget`.
    pub fn read<W: NativeWidget + ?Sized>(widget: &W) -> Self {
        let style = widget.computed_style();
        let outer_width = widget.outer_width();
        let scrollbar_width = scrollbar_width(outer_width, widget.client_width(), &style.border);
        Self {
            padding: style.padding,
            border: style.border,
            font: style.font,
            wrap: style.wrap,
            text_align: style.text_align,
            direction: style.direction,
            writing_mode: style.writing_mode,
            scrollbar_width,
            outer_width,
            outer_height: widget.outer_height(),
        }
    }
}

/// Style written onto the overlay.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OverlayStyle {
    /// Widget padding plus scrollbar compensation on the trailing edge.
    pub padding: BoxEdges,
    /// Same widths as the widget so the box model matches.
    pub border: BoxEdges,
    /// Always transparent.
    pub border_color: Rgba,
    pub font: FontMetrics,
    pub wrap: WrapStyle,
    pub text_align: TextAlign,
    pub direction: Direction,
    pub writing_mode: WritingMode,
    /// Bidi mode of per-line containers.
    pub line_bidi: BidiMode,
    /// Bidi mode of highlighted spans.
    pub span_bidi: BidiMode,
    pub width: f64,
    pub height: f64,
}

impl OverlayStyle {
    #[must_use]
    pub fn from_snapshot(snapshot: &GeometrySnapshot) -> Self {
        Self {
            padding: compensate_scrollbar(
                snapshot.padding,
                snapshot.scrollbar_width,
                snapshot.direction,
            ),
            border: snapshot.border,
            border_color: Rgba::TRANSPARENT,
            font: snapshot.font.clone(),
            wrap: snapshot.wrap,
            text_align: snapshot.text_align,
            direction: snapshot.direction,
            writing_mode: snapshot.writing_mode,
            line_bidi: BidiMode::Inherit,
            span_bidi: BidiMode::Isolate,
            width: snapshot.outer_width,
            height: snapshot.outer_height,
        }
    }

    /// Width available to text inside this style's box.
    #[must_use]
    pub fn content_width(&self) -> f64 {
        (self.width - self.border.horizontal() - self.padding.horizontal()).max(0.0)
    }

    /// Width inside the borders. The overlay never reserves a gutter.
    #[must_use]
    pub fn client_width(&self) -> f64 {
        (self.width - self.border.horizontal()).max(0.0)
    }

    /// Height inside the borders.
    #[must_use]
    pub fn client_height(&self) -> f64 {
        (self.height - self.border.vertical()).max(0.0)
    }
}

/// `outer - client - border_left - border_right`, floored at zero.
#[must_use]
pub fn scrollbar_width(outer_width: f64, client_width: f64, border: &BoxEdges) -> f64 {
    (outer_width - client_width - border.left - border.right).max(0.0)
}

/// Add a scrollbar gutter to the trailing edge of `padding`.
#[must_use]
pub fn compensate_scrollbar(
    padding: BoxEdges,
    scrollbar_width: f64,
    direction: Direction,
) -> BoxEdges {
    if scrollbar_width <= 0.0 {
        return padding;
    }
    let mut padding = padding;
    match direction {
        Direction::Ltr => padding.right += scrollbar_width,
        Direction::Rtl => padding.left += scrollbar_width,
    }
    padding
}

/// Style pass: snapshot the widget and restyle the overlay.
pub fn mirror_style<W, O>(widget: &W, overlay: &mut O) -> GeometrySnapshot
where
    W: NativeWidget + ?Sized,
    O: OverlaySurface + ?Sized,
{
    let snapshot = GeometrySnapshot::read(widget);
    overlay.apply_style(&OverlayStyle::from_snapshot(&snapshot));
    snapshot
}

/// Scroll pass: copy both scroll axes verbatim. Must follow the style pass.
pub fn mirror_scroll<W, O>(widget: &W, overlay: &mut O)
where
    W: NativeWidget + ?Sized,
    O: OverlaySurface + ?Sized,
{
    overlay.set_scroll_offset(widget.scroll_offset());
}

/// Content width and scroll comparison after a pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AlignmentReport {
    pub native_content_width: f64,
    pub overlay_content_width: f64,
    pub native_scroll: ScrollOffset,
    pub overlay_scroll: ScrollOffset,
}

impl AlignmentReport {
    #[must_use]
    pub fn width_delta(&self) -> f64 {
        (self.native_content_width - self.overlay_content_width).abs()
    }

    #[must_use]
    pub fn scroll_delta(&self) -> f64 {
        self.native_scroll.max_delta(&self.overlay_scroll)
    }

    #[must_use]
    pub fn is_aligned(&self) -> bool {
        self.width_delta() <= WIDTH_TOLERANCE_PX && self.scroll_delta() <= SCROLL_TOLERANCE_PX
    }
}

/// Measure how closely the overlay tracks the widget.
pub fn alignment<W, O>(widget: &W, overlay: &O) -> AlignmentReport
where
    W: NativeWidget + ?Sized,
    O: OverlaySurface + ?Sized,
{
    AlignmentReport {
        native_content_width: widget.content_width(),
        overlay_content_width: overlay.content_width(),
        native_scroll: widget.scroll_offset(),
        overlay_scroll: overlay.scroll_offset(),
    }
}
