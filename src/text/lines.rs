//! Line indexing over a text value.
//!
//! Offsets are counted in `char`s. Lines are split on `'\n'`; the break itself
//! belongs to no line, so `start[i + 1] == start[i] + len[i] + 1`.

/// One line of the text value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineRecord {
    /// Line content without its terminating break.
    pub text: String,
    /// Absolute char offset of the first char of this line.
    pub start_offset: usize,
    len_chars: usize,
}

impl LineRecord {
    fn new(text: &str, start_offset: usize) -> Self {
        Self {
            len_chars: text.chars().count(),
            text: text.to_string(),
            start_offset,
        }
    }

    /// Length of the line in chars.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len_chars
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len_chars == 0
    }

    /// Absolute offset one past the last char of the line.
    #[must_use]
    pub fn end_offset(&self) -> usize {
        self.start_offset + self.len_chars
    }

    /// Byte offset of every char boundary: `len() + 1` entries, the last
    /// being the byte length.
    #[must_use]
    pub fn byte_boundaries(&self) -> Vec<usize> {
        let mut bounds = Vec::with_capacity(self.len_chars + 1);
        bounds.extend(self.text.char_indices().map(|(b, _)| b));
        bounds.push(self.text.len());
        bounds
    }

    /// Slice of the line between two local char offsets (clamped).
    ///
    /// Walks the line from its start; use [`byte_boundaries`](Self::byte_boundaries)
    /// when slicing many ranges of one line.
    #[must_use]
    pub fn slice(&self, start: usize, end: usize) -> &str {
        let end = end.min(self.len_chars);
        let start = start.min(end);
        let byte = |local: usize| {
            self.text
                .char_indices()
                .nth(local)
                .map_or(self.text.len(), |(b, _)| b)
        };
        &self.text[byte(start)..byte(end)]
    }
}

/// Split `text` into line records.
///
/// Total: the empty string yields one empty line, and a trailing `'\n'`
/// yields a trailing empty line.
#[must_use]
pub fn index_lines(text: &str) -> Vec<LineRecord> {
    let mut records = Vec::new();
    let mut start = 0;
    for line in text.split('\n') {
        let record = LineRecord::new(line, start);
        start = record.end_offset() + 1;
        records.push(record);
    }
    records
}

/// Resolve an absolute offset to `(line_index, local_offset)`.
///
/// Picks the line with the greatest start not after `offset`. Offsets past the
/// end clamp to the final offset of the last line; an empty record list
/// resolves to `(0, 0)`.
#[must_use]
pub fn line_of(offset: usize, records: &[LineRecord]) -> (usize, usize) {
    if records.is_empty() {
        return (0, 0);
    }
    let line = records
        .partition_point(|r| r.start_offset <= offset)
        .saturating_sub(1);
    let record = &records[line];
    (line, (offset - record.start_offset).min(record.len()))
}

/// Line records for one text value, with offset helpers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineIndex {
    records: Vec<LineRecord>,
}

impl LineIndex {
    #[must_use]
    pub fn new(text: &str) -> Self {
        Self {
            records: index_lines(text),
        }
    }

    #[must_use]
    pub fn records(&self) -> &[LineRecord] {
        &self.records
    }

    #[must_use]
    pub fn line(&self, index: usize) -> Option<&LineRecord> {
        self.records.get(index)
    }

    /// Number of lines (always at least one).
    #[must_use]
    pub fn len_lines(&self) -> usize {
        self.records.len()
    }

    /// Total chars in the indexed text, line breaks included.
    #[must_use]
    pub fn len_chars(&self) -> usize {
        self.records.last().map_or(0, LineRecord::end_offset)
    }

    #[must_use]
    pub fn line_of(&self, offset: usize) -> (usize, usize) {
        line_of(offset, &self.records)
    }

    /// Absolute offset of a local position, clamped to the line.
    #[must_use]
    pub fn absolute(&self, line: usize, local: usize) -> Option<usize> {
        self.records
            .get(line)
            .map(|r| r.start_offset + local.min(r.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_is_one_empty_line() {
        let lines = index_lines("");
        assert_eq!(lines.len(), 1);
        assert!(lines[0].is_empty());
        assert_eq!(lines[0].start_offset, 0);
    }

    #[test]
    fn test_trailing_break_yields_empty_line() {
        let lines = index_lines("ab\n");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].text, "");
        assert_eq!(lines[1].start_offset, 3);
    }

    #[test]
    fn test_start_offsets_follow_line_lengths() {
        let lines = index_lines("one\n\nthree\nשלום");
        let starts: Vec<usize> = lines.iter().map(|l| l.start_offset).collect();
        assert_eq!(starts, vec![0, 4, 5, 11]);
        for pair in lines.windows(2) {
            assert_eq!(pair[1].start_offset, pair[0].start_offset + pair[0].len() + 1);
        }
        assert_eq!(LineIndex::new("one\n\nthree\nשלום").len_chars(), 15);
    }

    #[test]
    fn test_line_of_resolves_and_clamps() {
        let lines = index_lines("ab\ncd\n");
        assert_eq!(line_of(0, &lines), (0, 0));
        assert_eq!(line_of(2, &lines), (0, 2));
        assert_eq!(line_of(3, &lines), (1, 0));
        assert_eq!(line_of(5, &lines), (1, 2));
        assert_eq!(line_of(6, &lines), (2, 0));
        assert_eq!(line_of(99, &lines), (2, 0));

        let lines = index_lines("abc");
        assert_eq!(line_of(99, &lines), (0, 3));
        assert_eq!(line_of(7, &[]), (0, 0));
    }

    #[test]
    fn test_line_of_matches_linear_scan() {
        let text = "a\nbb\n\nccc\n";
        let lines = index_lines(text);
        for offset in 0..=text.chars().count() + 2 {
            let linear = lines
                .iter()
                .rposition(|l| l.start_offset <= offset)
                .unwrap_or(0);
            assert_eq!(line_of(offset, &lines).0, linear, "offset {offset}");
        }
    }

    #[test]
    fn test_slice_uses_char_offsets() {
        let lines = index_lines("héllo wörld");
        assert_eq!(lines[0].slice(1, 5), "éllo");
        assert_eq!(lines[0].slice(6, 99), "wörld");
        assert_eq!(lines[0].slice(9, 3), "");
    }

    #[test]
    fn test_byte_boundaries() {
        let lines = index_lines("aé😀\n");
        assert_eq!(lines[0].byte_boundaries(), vec![0, 1, 3, 7]);
        assert_eq!(lines[1].byte_boundaries(), vec![0]);
    }

    #[test]
    fn test_absolute() {
        let index = LineIndex::new("ab\ncd");
        assert_eq!(index.absolute(1, 1), Some(4));
        assert_eq!(index.absolute(1, 9), Some(5));
        assert_eq!(index.absolute(2, 0), None);
    }
}
