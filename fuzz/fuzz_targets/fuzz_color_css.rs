//! Fuzz target for CSS color and style tag parsing.
//!
//! Arbitrary strings must never panic: colors either parse or error, and
//! style tags fall back to class names.

#![no_main]

use libfuzzer_sys::fuzz_target;
use textarea_overlay::{Rgba, StyleTag};

fuzz_target!(|data: &str| {
    let _ = Rgba::from_hex(data);
    if let Ok(color) = Rgba::from_css(data) {
        // Display output is canonical hex and must parse back
        assert!(Rgba::from_css(&color.to_string()).is_ok());
    }

    match StyleTag::parse(data) {
        StyleTag::Color(_) => {}
        StyleTag::Class(name) => assert_eq!(name, data.trim()),
    }
});
