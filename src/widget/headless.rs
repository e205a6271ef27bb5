//! In-memory native widget and overlay.
//!
//! [`HeadlessTextarea`] behaves like a browser textarea with
//! `box-sizing: border-box` and `overflow-y: auto`: a vertical scrollbar gutter
//! appears once content overflows, shrinking the client width. Lines that do
//! not wrap scroll horizontally up to the widest row. The
//! [`HeadlessOverlay`] has no scrollbar and lays out whatever style it was
//! given, so a missing or wrong mirror shows up as different rows, widths, or
//! scroll ranges.

use crate::geometry::{BoxEdges, ComputedStyle, OverlayStyle, ScrollOffset};
use crate::render::OverlayDocument;
use crate::unicode::{Direction, visual_order, visual_slots, word_at};
use crate::widget::layout::{LayoutMetrics, TextLayout};
use crate::widget::{NativeWidget, OverlaySurface, ScrollBehavior};
use std::ops::Range;

/// Default scrollbar gutter width.
pub const DEFAULT_SCROLLBAR_GUTTER: f64 = 15.0;

fn char_to_byte(text: &str, offset: usize) -> usize {
    text.char_indices().nth(offset).map_or(text.len(), |(b, _)| b)
}

#[derive(Clone, Debug)]
pub struct HeadlessTextarea {
    value: String,
    style: ComputedStyle,
    width: f64,
    height: f64,
    scrollbar_gutter: f64,
    scroll: ScrollOffset,
    selection: Range<usize>,
    focused: bool,
    last_scroll_behavior: Option<ScrollBehavior>,
}

impl HeadlessTextarea {
    /// A border-box of `width` x `height` with 8px padding and 1px borders.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            value: String::new(),
            style: ComputedStyle {
                padding: BoxEdges::uniform(8.0),
                border: BoxEdges::uniform(1.0),
                border_color: crate::color::Rgba::BLACK,
                ..ComputedStyle::default()
            },
            width,
            height,
            scrollbar_gutter: DEFAULT_SCROLLBAR_GUTTER,
            scroll: ScrollOffset::default(),
            selection: 0..0,
            focused: false,
            last_scroll_behavior: None,
        }
    }

    #[must_use]
    pub fn with_style(mut self, style: ComputedStyle) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn with_scrollbar_gutter(mut self, gutter: f64) -> Self {
        self.scrollbar_gutter = gutter;
        self
    }

    pub fn style_mut(&mut self) -> &mut ComputedStyle {
        &mut self.style
    }

    pub fn set_width(&mut self, width: f64) {
        self.width = width;
    }

    #[must_use]
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    #[must_use]
    pub fn last_scroll_behavior(&self) -> Option<ScrollBehavior> {
        self.last_scroll_behavior
    }

    fn client_height(&self) -> f64 {
        (self.height - self.style.border.vertical()).max(0.0)
    }

    fn layout_for(&self, client_width: f64) -> TextLayout {
        let content = (client_width - self.style.padding.horizontal()).max(0.0);
        let metrics = LayoutMetrics::new(&self.style.font, &self.style.wrap, content);
        TextLayout::new(self.value.split('\n'), &metrics)
    }

    fn has_scrollbar(&self) -> bool {
        let without = (self.width - self.style.border.horizontal()).max(0.0);
        let needed = self.layout_for(without).height() + self.style.padding.vertical();
        needed > self.client_height() + 1e-6
    }

    /// Current rows, laid out at the current client width.
    #[must_use]
    pub fn layout(&self) -> TextLayout {
        self.layout_for(self.client_width())
    }

    fn max_scroll_top(&self) -> f64 {
        (self.scroll_height() - self.client_height()).max(0.0)
    }

    fn max_scroll_left(&self) -> f64 {
        if self.style.wrap.white_space.wraps() {
            return 0.0;
        }
        let content = self.layout().width() + self.style.padding.horizontal();
        (content - self.client_width()).max(0.0)
    }

    fn clamp_scroll(&mut self, offset: ScrollOffset) {
        self.scroll = ScrollOffset::new(
            offset.top.clamp(0.0, self.max_scroll_top()),
            offset.left.clamp(0.0, self.max_scroll_left()),
        );
    }

    /// Replace the selection with `text`, as typing or pasting does.
    ///
    /// Returns the new raw value the widget would report.
    pub fn type_text(&mut self, text: &str) -> String {
        let start = char_to_byte(&self.value, self.selection.start);
        let end = char_to_byte(&self.value, self.selection.end);
        self.value.replace_range(start..end, text);
        let caret = self.selection.start + text.chars().count();
        self.selection = caret..caret;
        self.value.clone()
    }

    /// Double-click word selection at a logical offset.
    pub fn select_word_at(&mut self, offset: usize) -> Range<usize> {
        let range = word_at(&self.value, offset);
        self.selection = range.clone();
        range
    }

    /// Logical offset displayed at visual `slot` of logical line `line`.
    ///
    /// The native widget applies plain paragraph bidi to the whole line.
    #[must_use]
    pub fn offset_at_visual_slot(&self, line: usize, slot: usize) -> Option<usize> {
        let mut start = 0;
        for (idx, text) in self.value.split('\n').enumerate() {
            if idx == line {
                let order = visual_order(text, self.style.direction, &[]);
                return order.get(slot).map(|local| start + local);
            }
            start += text.chars().count() + 1;
        }
        None
    }
}

impl NativeWidget for HeadlessTextarea {
    fn value(&self) -> String {
        self.value.clone()
    }

    fn set_value(&mut self, value: &str) {
        value.clone_into(&mut self.value);
        let end = self.value.chars().count();
        self.selection = end..end;
        self.clamp_scroll(self.scroll);
    }

    fn computed_style(&self) -> ComputedStyle {
        self.style.clone()
    }

    fn outer_width(&self) -> f64 {
        self.width
    }

    fn outer_height(&self) -> f64 {
        self.height
    }

    fn client_width(&self) -> f64 {
        let inner = (self.width - self.style.border.horizontal()).max(0.0);
        if self.has_scrollbar() {
            (inner - self.scrollbar_gutter).max(0.0)
        } else {
            inner
        }
    }

    fn scroll_height(&self) -> f64 {
        let content = self.layout().height() + self.style.padding.vertical();
        content.max(self.client_height())
    }

    fn scroll_offset(&self) -> ScrollOffset {
        self.scroll
    }

    fn scroll_to(&mut self, offset: ScrollOffset, behavior: ScrollBehavior) {
        self.clamp_scroll(offset);
        self.last_scroll_behavior = Some(behavior);
    }

    fn set_height(&mut self, height: f64) {
        self.height = height.max(0.0);
        self.clamp_scroll(self.scroll);
    }

    fn set_rows(&mut self, rows: u32) {
        let height = f64::from(rows) * self.style.font.line_height_px
            + self.style.padding.vertical()
            + self.style.border.vertical();
        self.set_height(height);
    }

    fn set_direction(&mut self, direction: Direction) {
        self.style.direction = direction;
    }

    fn focus(&mut self) {
        self.focused = true;
    }

    fn blur(&mut self) {
        self.focused = false;
    }

    fn select_all(&mut self) {
        self.selection = 0..self.value.chars().count();
    }

    fn set_selection_range(&mut self, start: usize, end: usize) {
        let len = self.value.chars().count();
        let end = end.min(len);
        self.selection = start.min(end)..end;
    }

    fn selection(&self) -> Range<usize> {
        self.selection.clone()
    }
}

/// In-memory overlay surface.
#[derive(Clone, Debug, Default)]
pub struct HeadlessOverlay {
    style: Option<OverlayStyle>,
    document: OverlayDocument,
    scroll: ScrollOffset,
    renders: usize,
}

impl HeadlessOverlay {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn style(&self) -> Option<&OverlayStyle> {
        self.style.as_ref()
    }

    #[must_use]
    pub fn document(&self) -> &OverlayDocument {
        &self.document
    }

    /// Number of `render` calls received.
    #[must_use]
    pub fn renders(&self) -> usize {
        self.renders
    }

    /// Rows as this overlay lays them out with its current style.
    #[must_use]
    pub fn layout(&self) -> Option<TextLayout> {
        let style = self.style.as_ref()?;
        let metrics = LayoutMetrics::new(&style.font, &style.wrap, style.content_width());
        let texts: Vec<String> = self.document.lines.iter().map(|l| l.text()).collect();
        Some(TextLayout::new(texts.iter().map(String::as_str), &metrics))
    }

    /// Largest `(top, left)` scroll the current style and document allow.
    fn max_scroll(&self) -> (f64, f64) {
        let (Some(style), Some(layout)) = (self.style.as_ref(), self.layout()) else {
            return (0.0, 0.0);
        };
        let top = (layout.height() + style.padding.vertical() - style.client_height()).max(0.0);
        let left = if style.wrap.white_space.wraps() {
            0.0
        } else {
            (layout.width() + style.padding.horizontal() - style.client_width()).max(0.0)
        };
        (top, left)
    }

    fn clamp_scroll(&mut self, offset: ScrollOffset) {
        let (top, left) = self.max_scroll();
        self.scroll = ScrollOffset::new(offset.top.clamp(0.0, top), offset.left.clamp(0.0, left));
    }

    /// Visual slots occupied by `local` chars of a line, honoring span isolation.
    #[must_use]
    pub fn visual_span(&self, line_index: usize, local: Range<usize>) -> Option<Range<usize>> {
        let line = self.document.line(line_index)?;
        let order = visual_order(&line.text(), self.document.direction, &line.isolates());
        let slots = visual_slots(&order);
        let covered: Vec<usize> = local.filter_map(|i| slots.get(i).copied()).collect();
        let min = *covered.iter().min()?;
        let max = *covered.iter().max()?;
        Some(min..max + 1)
    }
}

impl OverlaySurface for HeadlessOverlay {
    fn apply_style(&mut self, style: &OverlayStyle) {
        self.style = Some(style.clone());
        self.clamp_scroll(self.scroll);
    }

    fn render(&mut self, document: &OverlayDocument) {
        self.document = document.clone();
        self.renders += 1;
    }

    fn scroll_offset(&self) -> ScrollOffset {
        self.scroll
    }

    fn set_scroll_offset(&mut self, offset: ScrollOffset) {
        self.clamp_scroll(offset);
    }

    fn content_width(&self) -> f64 {
        self.style.as_ref().map_or(0.0, OverlayStyle::content_width)
    }

    fn segment_top(&self, line_index: usize, local_offset: usize) -> Option<f64> {
        let style = self.style.as_ref()?;
        let layout = self.layout()?;
        let row = layout.row_of(line_index, local_offset)?;
        Some(style.padding.top + layout.row_top(row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scrollbar_appears_on_overflow() {
        // 3 rows of 20px fit in 60px of content height.
        let mut widget = HeadlessTextarea::new(200.0, 78.0);
        widget.set_value("a\nb\nc");
        assert!((widget.client_width() - 198.0).abs() < f64::EPSILON);
        widget.set_value("a\nb\nc\nd");
        assert!((widget.client_width() - 183.0).abs() < f64::EPSILON);
        assert!((widget.scroll_height() - 96.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_scroll_is_clamped() {
        let mut widget = HeadlessTextarea::new(200.0, 78.0);
        widget.set_value("1\n2\n3\n4\n5\n6");
        widget.scroll_to(ScrollOffset::new(1000.0, 5.0), ScrollBehavior::Smooth);
        // 6 rows * 20 + 16 padding - 76 client height
        assert!((widget.scroll_offset().top - 60.0).abs() < f64::EPSILON);
        assert_eq!(widget.last_scroll_behavior(), Some(ScrollBehavior::Smooth));
    }

    #[test]
    fn test_horizontal_scroll_only_without_wrapping() {
        let mut widget = HeadlessTextarea::new(200.0, 78.0);
        widget.set_value(&"x".repeat(50));
        widget.scroll_to(ScrollOffset::new(0.0, 100.0), ScrollBehavior::Instant);
        assert!(widget.scroll_offset().left.abs() < f64::EPSILON);

        widget.style_mut().wrap.white_space = crate::geometry::WhiteSpace::Pre;
        widget.scroll_to(ScrollOffset::new(0.0, 100.0), ScrollBehavior::Instant);
        assert!((widget.scroll_offset().left - 100.0).abs() < f64::EPSILON);
        // 50 * 9.6 + 16 padding - 198 client width
        widget.scroll_to(ScrollOffset::new(0.0, 1e6), ScrollBehavior::Instant);
        assert!((widget.scroll_offset().left - 298.0).abs() < 1e-6);
    }

    #[test]
    fn test_type_text_replaces_selection() {
        let mut widget = HeadlessTextarea::new(200.0, 78.0);
        widget.set_value("hello world");
        widget.set_selection_range(6, 11);
        assert_eq!(widget.type_text("there"), "hello there");
        assert_eq!(widget.selection(), 11..11);
    }

    #[test]
    fn test_set_rows_sizes_border_box() {
        let mut widget = HeadlessTextarea::new(200.0, 10.0);
        widget.set_rows(4);
        assert!((widget.outer_height() - 98.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_overlay_without_style_reports_nothing() {
        let overlay = HeadlessOverlay::new();
        assert!(overlay.content_width().abs() < f64::EPSILON);
        assert_eq!(overlay.segment_top(0, 0), None);
    }
}
