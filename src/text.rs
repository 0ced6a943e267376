//! Line-indexed view of a source buffer

use ropey::Rope;

/// Source text with line/byte offset lookups, backed by a rope
#[derive(Debug, Clone, Default)]
pub struct LineIndexedText {
    rope: Rope,
}

impl LineIndexedText {
    pub fn new(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    pub fn from_rope(rope: Rope) -> Self {
        Self { rope }
    }

    pub fn len_bytes(&self) -> usize {
        self.rope.len_bytes()
    }

    pub fn len_lines(&self) -> usize {
        self.rope.len_lines()
    }

    /// Line (0-indexed) containing `byte`; offsets past the end map to the last line
    pub fn byte_to_line(&self, byte: usize) -> usize {
        self.rope.byte_to_line(byte.min(self.rope.len_bytes()))
    }

    /// Byte offset where `line` starts; lines past the end map to the buffer end
    pub fn line_start(&self, line: usize) -> usize {
        if line >= self.rope.len_lines() {
            return self.rope.len_bytes();
        }
        self.rope.line_to_byte(line)
    }

    /// Bytes of `line`, including its line break
    pub fn line_bytes(&self, line: usize) -> impl Iterator<Item = u8> + '_ {
        let slice = (line < self.rope.len_lines()).then(|| self.rope.line(line));
        slice.into_iter().flat_map(|s| s.bytes())
    }

    /// UTF-8 width of the character starting at `byte`, 0 at the end of the buffer
    pub fn char_len_at(&self, byte: usize) -> usize {
        if byte >= self.rope.len_bytes() {
            return 0;
        }
        let char_idx = self.rope.byte_to_char(byte);
        self.rope.get_char(char_idx).map_or(0, char::len_utf8)
    }

    /// `(line, byte column)` of `byte`, both 0-indexed
    pub fn line_col(&self, byte: usize) -> (usize, usize) {
        let byte = byte.min(self.rope.len_bytes());
        let line = self.byte_to_line(byte);
        (line, byte - self.line_start(line))
    }
}

impl From<&str> for LineIndexedText {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}
