//! `textarea_overlay` - highlight overlay for native multi-line text widgets
//!
//! Draws arbitrary character-range highlights on a styled, non-interactive
//! surface laid over a native editable text widget, and keeps the two in
//! exact value and visual agreement: ownership reconciliation, per-line
//! highlight segmentation, geometry mirroring with scrollbar compensation, and
//! frame-coalesced synchronization.

// Crate-level lint configuration
#![deny(unsafe_code)] // No FFI or raw pointers anywhere
#![allow(clippy::cast_possible_truncation)] // Pixel math on small counts
#![allow(clippy::cast_sign_loss)] // Color channel conversions
#![allow(clippy::cast_precision_loss)] // Row counts to pixels
#![allow(clippy::module_name_repetitions)] // Allow geometry::GeometrySnapshot etc
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::use_self)] // Allow explicit type names in impl blocks
#![allow(clippy::suboptimal_flops)] // Standard math notation is clearer than mul_add
#![allow(clippy::collapsible_if)] // Sometimes nested ifs are clearer
#![allow(clippy::cast_lossless)] // as casts are fine for primitive widening
#![allow(clippy::struct_excessive_bools)] // Options carry several switches
#![allow(clippy::missing_panics_doc)] // Docs WIP

pub mod color;
pub mod error;
pub mod event;
pub mod geometry;
pub mod options;
pub mod reconcile;
pub mod render;
pub mod style;
pub mod sync;
pub mod textarea;
pub mod text;
pub mod unicode;
pub mod widget;

// Re-export core types at crate root
pub use color::Rgba;
pub use error::{Error, Result};
pub use options::OverlayOptions;
pub use style::StyleTag;
pub use textarea::HighlightTextarea;

// Re-export collaborator interfaces
pub use event::{DebugEvent, EventKind, EventRecorder, EventSink, Severity, TracingSink};
pub use sync::{FrameHandle, FrameHost, ManualFrameHost, SyncTrigger};
pub use widget::{NativeWidget, OverlaySurface, ScrollBehavior};

// Re-export commonly used types
pub use geometry::{AlignmentReport, GeometrySnapshot, OverlayStyle};
pub use reconcile::OwnershipMode;
pub use render::OverlayDocument;
pub use text::{DisplaySegment, HighlightRange, LineHighlights};
pub use unicode::Direction;
