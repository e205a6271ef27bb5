//! Fuzz target for highlight segmentation.
//!
//! Any text with any ranges must segment into contiguous, non-overlapping
//! runs that reproduce every line.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use textarea_overlay::text::{HighlightRange, LineHighlights, index_lines, segment};

#[derive(Arbitrary, Debug)]
struct Input {
    text: String,
    ranges: Vec<(u16, u16)>,
}

fuzz_target!(|input: Input| {
    let ranges: Vec<HighlightRange> = input
        .ranges
        .iter()
        .map(|&(start, end)| HighlightRange::new(usize::from(start), usize::from(end), "mark"))
        .collect();
    let records = index_lines(&input.text);
    let lines = segment(&input.text, &ranges, &LineHighlights::new());
    assert_eq!(lines.len(), records.len());

    for (line, record) in lines.iter().zip(&records) {
        let mut cursor = 0;
        let mut rebuilt = String::new();
        for seg in &line.segments {
            assert_eq!(seg.local_start, cursor);
            assert!(seg.local_end > seg.local_start);
            rebuilt.push_str(record.slice(seg.local_start, seg.local_end));
            cursor = seg.local_end;
        }
        assert_eq!(cursor, record.len());
        assert_eq!(rebuilt, record.text);
    }
});
