//! Offset to line/column conversion.

use crate::ByteOffset;
use text_size::TextSize;

/// A zero-based line and byte column, as used inside source maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LineCol {
    pub line: u32,
    pub col: u32,
}

impl LineCol {
    #[inline]
    pub fn new(line: u32, col: u32) -> Self {
        Self { line, col }
    }
}

/// A one-based line and column, as shown to people in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Line start table for one text.
#[derive(Debug, Clone)]
pub struct LineIndex {
    line_starts: Vec<ByteOffset>,
    len: ByteOffset,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![TextSize::from(0)];
        line_starts.extend(
            text.match_indices('\n')
                .map(|(offset, _)| TextSize::from((offset + 1) as u32)),
        );

        Self {
            line_starts,
            len: TextSize::from(text.len() as u32),
        }
    }

    #[inline]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Converts an offset to a zero-based line and byte column.
    ///
    /// Returns `None` for offsets past the end of the text.
    pub fn line_col(&self, offset: ByteOffset) -> Option<LineCol> {
        if offset > self.len {
            return None;
        }

        let line = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        let col = u32::from(offset) - u32::from(self.line_starts[line]);

        Some(LineCol::new(line as u32, col))
    }

    /// Converts an offset to the one-based position used in error messages.
    ///
    /// Out-of-range offsets are clamped to the end of the text.
    pub fn position(&self, text: &str, offset: ByteOffset) -> Position {
        let offset = offset.min(self.len);
        let line_col = self.line_col(offset).unwrap_or_default();
        let line_start = self.line_starts[line_col.line as usize];
        let column = text
            .get(u32::from(line_start) as usize..u32::from(offset) as usize)
            .map_or(line_col.col as usize, |prefix| prefix.chars().count());

        Position {
            line: line_col.line as usize + 1,
            column: column + 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_col() {
        let index = LineIndex::new("ab\ncd\n");
        assert_eq!(index.line_count(), 3);
        assert_eq!(index.line_col(TextSize::from(0)), Some(LineCol::new(0, 0)));
        assert_eq!(index.line_col(TextSize::from(2)), Some(LineCol::new(0, 2)));
        assert_eq!(index.line_col(TextSize::from(3)), Some(LineCol::new(1, 0)));
        assert_eq!(index.line_col(TextSize::from(6)), Some(LineCol::new(2, 0)));
        assert_eq!(index.line_col(TextSize::from(7)), None);
    }

    #[test]
    fn test_position_is_one_based_and_counts_chars() {
        let text = "let é = 1;\nfoo";
        let index = LineIndex::new(text);
        // `=` sits after a two-byte character.
        let eq = text.find('=').unwrap() as u32;
        assert_eq!(
            index.position(text, TextSize::from(eq)),
            Position { line: 1, column: 7 }
        );
        assert_eq!(
            index.position(text, TextSize::from(13)),
            Position { line: 2, column: 2 }
        );
    }
}
