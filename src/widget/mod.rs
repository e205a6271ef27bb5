//! Host surfaces: the native editable widget and the overlay.
//!
//! The core never talks to a UI toolkit directly. A host implements
//! [`NativeWidget`] for its multi-line text control and [`OverlaySurface`] for
//! the non-interactive layer drawn over it. Offsets are `char` offsets into the
//! widget's value.
//!
//! [`headless`] provides in-memory implementations with a deterministic
//! monospace layout, used for server-side measurement and tests.

pub mod headless;
pub mod layout;

use crate::geometry::{ComputedStyle, OverlayStyle, ScrollOffset};
use crate::render::OverlayDocument;
use crate::unicode::Direction;
use std::ops::Range;

/// How a programmatic scroll is animated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScrollBehavior {
    #[default]
    Instant,
    Smooth,
}

/// The platform's multi-line editable text control.
pub trait NativeWidget {
    /// Current raw value as the user sees it.
    fn value(&self) -> String;
    /// Overwrite the raw value.
    fn set_value(&mut self, value: &str);

    fn computed_style(&self) -> ComputedStyle;
    /// Border-box width (`offsetWidth`).
    fn outer_width(&self) -> f64;
    /// Border-box height (`offsetHeight`).
    fn outer_height(&self) -> f64;
    /// Padding-box width excluding any scrollbar (`clientWidth`).
    fn client_width(&self) -> f64;
    /// Height of the full scrollable content including padding.
    fn scroll_height(&self) -> f64;

    fn scroll_offset(&self) -> ScrollOffset;
    fn scroll_to(&mut self, offset: ScrollOffset, behavior: ScrollBehavior);

    /// Set the border-box height.
    fn set_height(&mut self, height: f64);
    fn set_rows(&mut self, rows: u32);
    fn set_direction(&mut self, direction: Direction);

    fn focus(&mut self);
    fn blur(&mut self);
    /// Select the whole value.
    fn select_all(&mut self);
    fn set_selection_range(&mut self, start: usize, end: usize);
    fn selection(&self) -> Range<usize>;

    /// Width available to text: client width minus horizontal padding.
    fn content_width(&self) -> f64 {
        (self.client_width() - self.computed_style().padding.horizontal()).max(0.0)
    }
}

/// The styled, non-interactive layer that renders highlights.
pub trait OverlaySurface {
    fn apply_style(&mut self, style: &OverlayStyle);
    fn render(&mut self, document: &OverlayDocument);

    fn scroll_offset(&self) -> ScrollOffset;
    fn set_scroll_offset(&mut self, offset: ScrollOffset);

    /// Width available to text after padding and borders.
    fn content_width(&self) -> f64;

    /// Vertical position, relative to the overlay's padding edge, of the row
    /// holding `local_offset` of `line_index`.
    fn segment_top(&self, line_index: usize, local_offset: usize) -> Option<f64>;
}
