//! Leading-whitespace measurement for indent guides

use crate::text::LineIndexedText;
use crate::tree::ByteRange;

/// One range per line touched by `range`, each covering that line's leading
/// run of spaces and tabs.
///
/// A line without indentation yields an empty range at its start.
pub fn measure(text: &LineIndexedText, range: ByteRange) -> Vec<ByteRange> {
    let start_line = text.byte_to_line(range.start);
    let end_line = text.byte_to_line(range.end);
    (start_line..=end_line)
        .map(|line| leading_whitespace(text, line))
        .collect()
}

/// Leading space/tab run of a single line
pub fn leading_whitespace(text: &LineIndexedText, line: usize) -> ByteRange {
    let start = text.line_start(line);
    let width = text
        .line_bytes(line)
        .take_while(|&b| b == b' ' || b == b'\t')
        .count();
    ByteRange::from_len(start, width)
}
