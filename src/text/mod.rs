//! Line indexing and highlight segmentation.
//!
//! Key types:
//!
//! - [`LineIndex`] / [`LineRecord`]: the text value split into lines
//! - [`HighlightRange`]: absolute, possibly overlapping, highlight input
//! - [`DisplaySegment`]: non-overlapping per-line output of [`segment`]
//!
//! # Examples
//!
//! ```
//! use textarea_overlay::text::{HighlightRange, LineHighlights, segment};
//!
//! let ranges = [HighlightRange::new(0, 10, "yellow"), HighlightRange::new(7, 10, "red")];
//! let lines = segment("Questioner", &ranges, &LineHighlights::new());
//! assert_eq!(lines[0].segments.len(), 1);
//! assert_eq!(lines[0].segments[0].source, Some(0));
//! ```

mod lines;
mod segment;

pub use lines::{LineIndex, LineRecord, index_lines, line_of};
pub use segment::{
    DisplaySegment, HighlightRange, LineHighlights, LineSegments, segment, segment_lines,
};
