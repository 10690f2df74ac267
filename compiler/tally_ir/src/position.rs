//! Source positions.

use std::fmt;
use std::sync::Arc;

/// A location range in a named source.
///
/// Lines and columns are 1-based and columns count characters. `end_col` is
/// exclusive: a one-character token at column 4 has `start_col == 4` and
/// `end_col == 5`.
///
/// The file name is shared, so cloning a position never copies it.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Position {
    pub filename: Arc<str>,
    pub line: u32,
    pub start_col: u32,
    pub end_line: u32,
    pub end_col: u32,
}

impl Position {
    /// Create a position on a single line.
    pub fn new(filename: Arc<str>, line: u32, start_col: u32, end_col: u32) -> Self {
        Position {
            filename,
            line,
            start_col,
            end_line: line,
            end_col,
        }
    }

    /// Zero-width position at `line:col`.
    pub fn point(filename: Arc<str>, line: u32, col: u32) -> Self {
        Position::new(filename, line, col, col)
    }

    /// Position covering both `self` and `other`.
    ///
    /// Both positions are expected to be in the same file; the file name of
    /// `self` is kept.
    #[must_use]
    pub fn merge(&self, other: &Position) -> Position {
        let (line, start_col) = (self.line, self.start_col).min((other.line, other.start_col));
        let (end_line, end_col) = (self.end_line, self.end_col).max((other.end_line, other.end_col));
        Position {
            filename: Arc::clone(&self.filename),
            line,
            start_col,
            end_line,
            end_col,
        }
    }

    /// Whether the position spans more than one line.
    pub fn is_multiline(&self) -> bool {
        self.end_line != self.line
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.filename, self.line, self.start_col)
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_multiline() {
            write!(
                f,
                "{}:{}:{}-{}:{}",
                self.filename, self.line, self.start_col, self.end_line, self.end_col
            )
        } else {
            write!(
                f,
                "{}:{}:{}-{}",
                self.filename, self.line, self.start_col, self.end_col
            )
        }
    }
}
