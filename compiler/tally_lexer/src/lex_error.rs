//! Lexical errors.
//!
//! An `Invalid` token carries the error's message as its text; the error
//! itself is kept by the lexer until [`Lexer::take_error`](crate::Lexer::take_error)
//! hands it to the reporter along with its [`ErrorCode`].

use std::fmt;

use tally_diagnostic::ErrorCode;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LexError {
    UnterminatedString,
    UnterminatedRegex,
    InvalidNumber(String),
    InvalidCharacter(char),
}

impl LexError {
    pub fn code(&self) -> ErrorCode {
        match self {
            LexError::UnterminatedString => ErrorCode::E0001,
            LexError::UnterminatedRegex => ErrorCode::E0002,
            LexError::InvalidNumber(_) => ErrorCode::E0003,
            LexError::InvalidCharacter(_) => ErrorCode::E0004,
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexError::UnterminatedString => f.write_str("unterminated string literal"),
            LexError::UnterminatedRegex => f.write_str("unterminated regular expression"),
            LexError::InvalidNumber(text) => write!(f, "invalid numeric literal '{text}'"),
            LexError::InvalidCharacter(ch) => write!(f, "invalid character {ch:?}"),
        }
    }
}
