//! Error codes for all compiler diagnostics.

use std::fmt;

/// Error codes for all compiler diagnostics.
///
/// Format: E#### where first digit indicates phase:
/// - E0xxx: Lexical errors
/// - E1xxx: Syntax errors
/// - E2xxx: Semantic errors
/// - E9xxx: Internal / I/O errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Lexical Errors (E0xxx)
    /// Unterminated string literal
    E0001,
    /// Unterminated regular expression
    E0002,
    /// Invalid number literal, or a number out of range
    E0003,
    /// Invalid character in source
    E0004,

    // Syntax Errors (E1xxx)
    /// Unexpected token
    E1001,
    /// Nesting too deep
    E1002,

    // Semantic Errors (E2xxx)
    /// Duplicate declaration in the same scope
    E2001,
    /// Undeclared identifier or capture group
    E2002,
    /// Invalid regular expression
    E2003,
    /// Metric conflicts with an existing registration
    E2004,
    /// Wrong number of metric keys or builtin arguments
    E2005,
    /// Unknown builtin function
    E2006,
    /// Name used as the wrong kind of symbol
    E2007,

    // Internal Errors (E9xxx)
    /// Source could not be read
    E9001,
}

impl ErrorCode {
    /// Get the string representation (e.g., "E1001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
            ErrorCode::E0004 => "E0004",
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E2005 => "E2005",
            ErrorCode::E2006 => "E2006",
            ErrorCode::E2007 => "E2007",
            ErrorCode::E9001 => "E9001",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
