//! Component configuration.

use crate::error::{Error, Result};
use crate::style::StyleTag;
use crate::text::{HighlightRange, LineHighlights};
use crate::unicode::Direction;

/// Options accepted by [`HighlightTextarea`](crate::HighlightTextarea).
///
/// The presence of `value` selects controlled ownership; without it the
/// component owns its text, seeded once from `default_value`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OverlayOptions {
    /// Owner-supplied value (controlled mode).
    pub value: Option<String>,
    /// Initial value in uncontrolled mode.
    pub default_value: String,
    pub highlights: Vec<HighlightRange>,
    pub line_highlights: LineHighlights,
    pub direction: Direction,
    /// Minimum visible rows.
    pub rows: u32,
    /// Grow the widget to fit its content on every sync pass.
    pub enable_auto_resize: bool,
    /// Report telemetry events.
    pub debug: bool,
    /// Capacity of the built-in event recorder.
    pub max_events: usize,
}

impl Default for OverlayOptions {
    fn default() -> Self {
        Self {
            value: None,
            default_value: String::new(),
            highlights: Vec::new(),
            line_highlights: LineHighlights::new(),
            direction: Direction::Ltr,
            rows: 3,
            enable_auto_resize: true,
            debug: false,
            max_events: 1000,
        }
    }
}

impl OverlayOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Controlled options with the given owner value.
    #[must_use]
    pub fn controlled(value: impl Into<String>) -> Self {
        Self::default().with_value(value)
    }

    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = value.into();
        self
    }

    #[must_use]
    pub fn with_highlights(mut self, highlights: Vec<HighlightRange>) -> Self {
        self.highlights = highlights;
        self
    }

    /// Append one highlight range.
    #[must_use]
    pub fn highlight(mut self, start: usize, end: usize, style: impl Into<StyleTag>) -> Self {
        self.highlights.push(HighlightRange::new(start, end, style));
        self
    }

    #[must_use]
    pub fn with_line_highlight(mut self, line: usize, style: impl Into<StyleTag>) -> Self {
        self.line_highlights.insert(line, style.into());
        self
    }

    #[must_use]
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    #[must_use]
    pub fn with_rows(mut self, rows: u32) -> Self {
        self.rows = rows;
        self
    }

    #[must_use]
    pub fn with_auto_resize(mut self, enabled: bool) -> Self {
        self.enable_auto_resize = enabled;
        self
    }

    #[must_use]
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    #[must_use]
    pub fn with_max_events(mut self, max_events: usize) -> Self {
        self.max_events = max_events;
        self
    }

    #[must_use]
    pub fn is_controlled(&self) -> bool {
        self.value.is_some()
    }

    /// Check the options for values the component cannot work with.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOption`] when `rows` is zero or when debug
    /// telemetry is requested with a zero-capacity recorder.
    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 {
            return Err(Error::InvalidOption {
                name: "rows",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.debug && self.max_events == 0 {
            return Err(Error::InvalidOption {
                name: "max_events",
                reason: "must be positive when debug is enabled".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = OverlayOptions::default();
        assert!(!options.is_controlled());
        assert_eq!(options.rows, 3);
        assert!(options.enable_auto_resize);
        assert!(!options.debug);
        assert_eq!(options.max_events, 1000);
        assert_eq!(options.direction, Direction::Ltr);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_builders() {
        let options = OverlayOptions::controlled("hello")
            .highlight(0, 5, "#ff0")
            .with_line_highlight(0, "current")
            .with_direction(Direction::Rtl)
            .with_rows(5);
        assert_eq!(options.value.as_deref(), Some("hello"));
        assert_eq!(options.highlights.len(), 1);
        assert_eq!(
            options.line_highlights.get(&0),
            Some(&StyleTag::Class("current".to_string()))
        );
        assert_eq!(options.rows, 5);
    }

    #[test]
    fn test_validate_rejects_zero_rows() {
        let err = OverlayOptions::default().with_rows(0).validate().unwrap_err();
        assert!(matches!(err, Error::InvalidOption { name: "rows", .. }));
    }

    #[test]
    fn test_validate_rejects_empty_debug_buffer() {
        let options = OverlayOptions::default().with_max_events(0);
        assert!(options.validate().is_ok());
        let err = options.with_debug(true).validate().unwrap_err();
        assert!(matches!(err, Error::InvalidOption { name: "max_events", .. }));
    }
}
