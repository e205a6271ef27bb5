//! E2E tests for mixed-direction text: highlighted runs stay where the native
//! widget draws their characters, so pointer word selection over a highlight
//! picks exactly the highlighted token.

mod common;

use common::{Textarea, assert_aligned, init_logging, mount};
use std::ops::Range;
use textarea_overlay::unicode::{BidiMode, Direction, visual_order, visual_slots};
use textarea_overlay::{NativeWidget, OverlayOptions};
use tracing::debug;

/// Visual slots the native widget uses for `local` chars of a line.
fn native_visual_span(line: &str, base: Direction, local: Range<usize>) -> Range<usize> {
    let slots = visual_slots(&visual_order(line, base, &[]));
    let covered: Vec<usize> = local.map(|i| slots[i]).collect();
    *covered.iter().min().unwrap()..*covered.iter().max().unwrap() + 1
}

/// Double-click every visual slot of the highlight and check the selection.
fn assert_word_select_hits_token(textarea: &mut Textarea, token: Range<usize>) {
    let visual = textarea
        .overlay()
        .unwrap()
        .visual_span(0, token.clone())
        .expect("highlight is rendered");

    for slot in visual {
        let widget = textarea.widget_mut().unwrap();
        let offset = widget.offset_at_visual_slot(0, slot).expect("slot in line");
        let selected = widget.select_word_at(offset);
        debug!(slot, offset, ?selected, "double-click");
        assert_eq!(selected, token, "slot {slot} (offset {offset}) selected {selected:?}");
        textarea.handle_selection_change();
    }
    textarea.advance_frame();
    assert_aligned(textarea, "after word selection");
}

#[test]
fn e2e_rtl_token_in_latin_sentence() {
    init_logging();
    let text = "Say שלום, friend.";
    let token = 4..8;
    let options = OverlayOptions::new()
        .with_default_value(text)
        .highlight(token.start, token.end, "#ffeb3b");
    let mut textarea = mount(options, 320.0, 80.0);

    let line = textarea.document().line(0).unwrap().clone();
    let styled: Vec<_> = line.spans.iter().filter(|s| s.style.is_some()).collect();
    assert_eq!(styled.len(), 1);
    assert_eq!(styled[0].text, "שלום");
    assert_eq!(styled[0].bidi, BidiMode::Isolate);
    assert_eq!(line.bidi, BidiMode::Inherit);

    let overlay_span = textarea
        .overlay()
        .unwrap()
        .visual_span(0, token.clone())
        .unwrap();
    assert_eq!(overlay_span, native_visual_span(text, Direction::Ltr, token.clone()));

    assert_word_select_hits_token(&mut textarea, token);
}

#[test]
fn e2e_latin_token_in_rtl_paragraph() {
    init_logging();
    let text = "שלום hello, עולם";
    let token = 5..10;
    let options = OverlayOptions::new()
        .with_default_value(text)
        .with_direction(Direction::Rtl)
        .highlight(token.start, token.end, "mark");
    let mut textarea = mount(options, 320.0, 80.0);

    let overlay_span = textarea
        .overlay()
        .unwrap()
        .visual_span(0, token.clone())
        .unwrap();
    assert_eq!(overlay_span, native_visual_span(text, Direction::Rtl, token.clone()));
    assert_eq!(overlay_span.len(), token.len());

    assert_word_select_hits_token(&mut textarea, token);
}

#[test]
fn e2e_highlight_is_drawn_contiguously() {
    let text = "abc שלום עולם def";
    let token = 4..8;
    let options = OverlayOptions::new()
        .with_default_value(text)
        .highlight(token.start, token.end, "#ffeb3b");
    let textarea = mount(options, 320.0, 80.0);

    let span = textarea
        .overlay()
        .unwrap()
        .visual_span(0, token.clone())
        .unwrap();
    assert_eq!(span.len(), token.len());
    assert_eq!(textarea.widget().unwrap().value(), text);
}
