//! E2E tests for injected event sinks: events reach a host sink only while
//! `debug` is on, alongside the built-in recorder.

mod common;

use common::{Textarea, init_logging};
use std::cell::RefCell;
use std::rc::Rc;
use textarea_overlay::widget::headless::{HeadlessOverlay, HeadlessTextarea};
use textarea_overlay::{DebugEvent, EventSink, ManualFrameHost, OverlayOptions, TracingSink};

fn mount_with_sink(options: OverlayOptions, sink: Box<dyn EventSink>) -> Textarea {
    let mut textarea = Textarea::new(options, ManualFrameHost::new())
        .expect("valid options")
        .with_event_sink(sink);
    textarea.attach(HeadlessTextarea::new(240.0, 80.0), HeadlessOverlay::new());
    textarea.advance_frame();
    textarea
}

fn collecting_sink() -> (Rc<RefCell<Vec<DebugEvent>>>, Box<dyn EventSink>) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let boxed: Box<dyn EventSink> =
        Box::new(move |event: &DebugEvent| sink.borrow_mut().push(event.clone()));
    (seen, boxed)
}

fn names(events: &[DebugEvent]) -> Vec<&'static str> {
    events.iter().map(|e| e.kind.name()).collect()
}

#[test]
fn e2e_injected_sink_receives_events_with_debug_on() {
    init_logging();
    let (seen, sink) = collecting_sink();
    let mut textarea = mount_with_sink(OverlayOptions::new().with_debug(true), sink);

    textarea.set_value("hello");
    textarea.advance_frame();

    let events = seen.borrow().clone();
    assert!(names(&events).contains(&"programmatic_set"));
    assert_eq!(names(&events).iter().filter(|n| **n == "sync_executed").count(), 2);
    assert!(events.windows(2).all(|w| w[0].sequence < w[1].sequence));
    // The built-in recorder sees the same stream.
    assert_eq!(textarea.events(), events);
}

#[test]
fn e2e_injected_sink_is_silent_with_debug_off() {
    init_logging();
    let (seen, sink) = collecting_sink();
    let mut textarea = mount_with_sink(OverlayOptions::new(), sink);

    textarea.set_value("quiet");
    textarea.handle_scroll();
    textarea.advance_frame();
    assert!(seen.borrow().is_empty());
    assert!(textarea.events().is_empty());

    let options = textarea.options().clone().with_debug(true);
    textarea.update_options(options).expect("valid options");
    textarea.advance_frame();
    assert!(names(&seen.borrow()).contains(&"sync_executed"));

    let options = textarea.options().clone().with_debug(false);
    textarea.update_options(options).expect("valid options");
    let before = seen.borrow().len();
    textarea.set_value("quiet again");
    textarea.advance_frame();
    assert_eq!(seen.borrow().len(), before);
}

#[test]
fn e2e_tracing_sink_forwards_alongside_recorder() {
    init_logging();
    let mut textarea = mount_with_sink(
        OverlayOptions::new().with_debug(true),
        Box::new(TracingSink),
    );
    textarea.set_value("traced");
    textarea.advance_frame();

    assert_eq!(textarea.recorder().count("sync_executed"), 2);
    assert_eq!(textarea.recorder().count("programmatic_set"), 1);
}
