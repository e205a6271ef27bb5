//! Unicode utilities for bidi ordering and word boundaries.

mod bidi;
mod word;

pub use bidi::{BidiMode, Direction, visual_order, visual_slots};
pub use word::word_at;
