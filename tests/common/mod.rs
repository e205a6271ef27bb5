//! Shared helpers for integration tests.

#![allow(clippy::nursery)] // Test infra prioritizes clarity over pedantry
#![allow(clippy::pedantic)] // Test infra prioritizes clarity over pedantry
#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;
use textarea_overlay::widget::headless::{HeadlessOverlay, HeadlessTextarea};
use textarea_overlay::{HighlightTextarea, ManualFrameHost, OverlayOptions};
use tracing::Level;

pub type Textarea = HighlightTextarea<HeadlessTextarea, HeadlessOverlay, ManualFrameHost>;

pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_target(true)
        .with_test_writer()
        .try_init();
}

/// Component attached to a headless widget of the given border-box size.
pub fn mount(options: OverlayOptions, width: f64, height: f64) -> Textarea {
    let mut textarea = Textarea::new(options, ManualFrameHost::new()).expect("valid options");
    textarea.attach(HeadlessTextarea::new(width, height), HeadlessOverlay::new());
    textarea.advance_frame();
    textarea
}

/// Change listener that records every notified value.
pub fn recording_listener() -> (Rc<RefCell<Vec<String>>>, impl FnMut(&str) + 'static) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    (seen, move |value: &str| sink.borrow_mut().push(value.to_string()))
}

/// Assert overlay and widget agree on content width and scroll.
pub fn assert_aligned(textarea: &Textarea, context: &str) {
    let report = textarea.alignment().expect("attached");
    assert!(
        report.is_aligned(),
        "{context}: misaligned, width delta {} scroll delta {} ({report:?})",
        report.width_delta(),
        report.scroll_delta(),
    );
}
