// WHY: adapters report byte offsets; diagnostics need 1-based line/column in characters

use serde::Serialize;

/// 1-based line and column (column counted in characters, not bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl Location {
    pub fn start() -> Self {
        Self { line: 1, column: 1 }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Line-start table over a source text for O(log n) offset lookups
#[derive(Debug)]
pub struct LineIndex<'a> {
    text: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    pub fn new(text: &'a str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            text.bytes()
                .enumerate()
                .filter(|(_, b)| *b == b'\n')
                .map(|(i, _)| i + 1),
        );
        Self { text, line_starts }
    }

    /// Location of a byte offset; offsets past the end clamp to the end of text
    pub fn location(&self, byte_pos: usize) -> Location {
        let mut byte_pos = byte_pos.min(self.text.len());
        while !self.text.is_char_boundary(byte_pos) {
            byte_pos -= 1;
        }

        let line_idx = match self.line_starts.binary_search(&byte_pos) {
            Ok(i) => i,
            Err(i) => i - 1,
        };
        let line_start = self.line_starts[line_idx];
        let column = self.text[line_start..byte_pos].chars().count() + 1;

        Location {
            line: line_idx + 1,
            column,
        }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}
