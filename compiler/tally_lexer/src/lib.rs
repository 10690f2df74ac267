//! Lexer for the Tally log-metrics language.
//!
//! Token recognition is done by a logos-generated [`RawToken`] scanner.
//! String literals, regex bodies and number suffixes are finished by hand
//! from the logos remainder so malformed input turns into a precise
//! [`TokenKind::Invalid`] token instead of a generic error.
//!
//! # Regex mode
//!
//! `/` is ambiguous: it is division between operands and a regex delimiter
//! in operand position. The lexer cannot tell the two apart, so the parser
//! decides. Right after it sees a `/` where an operand is expected, the
//! parser calls [`Lexer::enter_regex_mode`]; the following
//! [`Lexer::next_token`] then scans up to the next unescaped `/` and returns
//! a single [`TokenKind::Regex`] token.
//!
//! The lexer never panics and never stops early. After the end of input it
//! returns [`TokenKind::Eof`] on every call.

mod lex_error;
mod raw_token;
mod scan;

use std::sync::Arc;

use logos::Logos;
use tally_ir::{Position, Token, TokenKind};
use tracing::trace;

pub use lex_error::LexError;
use raw_token::RawToken;
use scan::{NumberClass, Scanned};

/// Pull-based lexer over one named source.
pub struct Lexer<'src> {
    name: Arc<str>,
    source: &'src str,
    raw: logos::Lexer<'src, RawToken>,
    /// 1-based current line.
    line: u32,
    /// Byte offset of the first character of the current line.
    line_start: usize,
    /// Byte offset just past the last token returned.
    last_end: usize,
    in_regex: bool,
    done: bool,
    /// Error behind the last `Invalid` token, until taken.
    error: Option<LexError>,
}

impl<'src> Lexer<'src> {
    pub fn new(name: impl Into<Arc<str>>, source: &'src str) -> Self {
        Lexer {
            name: name.into(),
            source,
            raw: RawToken::lexer(source),
            line: 1,
            line_start: 0,
            last_end: 0,
            in_regex: false,
            done: false,
            error: None,
        }
    }

    /// Name of the source being lexed.
    pub fn name(&self) -> &Arc<str> {
        &self.name
    }

    /// Lex the next token as a regex body.
    ///
    /// Must be called after the opening `/` has been returned and before the
    /// next call to [`Lexer::next_token`]. The flag resets once the body has
    /// been lexed.
    pub fn enter_regex_mode(&mut self) {
        trace!(line = self.line, "entering regex mode");
        self.in_regex = true;
    }

    /// The error behind the most recent `Invalid` token, if not yet taken.
    pub fn take_error(&mut self) -> Option<LexError> {
        self.error.take()
    }

    /// Produce the next token.
    pub fn next_token(&mut self) -> Token {
        self.error = None;
        if self.in_regex {
            self.in_regex = false;
            return self.lex_regex();
        }
        loop {
            let Some(result) = self.raw.next() else {
                return self.eof();
            };
            let span = self.raw.span();
            let token = match result {
                Ok(RawToken::LineComment) => continue,
                Ok(RawToken::Quote) => self.lex_string(span.start),
                Ok(RawToken::Number) => self.lex_number(span.start),
                Ok(RawToken::CapRef) => {
                    let text = &self.source[span.start + 1..span.end];
                    self.token(TokenKind::CapRef, text, span.start, span.end)
                }
                Ok(RawToken::Newline) => {
                    let token = self.token(TokenKind::Newline, "\n", span.start, span.end);
                    self.line += 1;
                    self.line_start = span.end;
                    token
                }
                Ok(raw) => match raw.simple_kind() {
                    Some(kind) => {
                        let text = self.raw.slice();
                        self.token(kind, text, span.start, span.end)
                    }
                    None => continue,
                },
                Err(()) => self.lex_invalid_char(span.start, span.end),
            };
            self.last_end = self.raw.span().end;
            return token;
        }
    }

    fn eof(&mut self) -> Token {
        if !self.done {
            trace!(name = %self.name, lines = self.line, "end of input");
            self.done = true;
        }
        let end = self.source.len();
        self.token(TokenKind::Eof, "", end, end)
    }

    fn lex_regex(&mut self) -> Token {
        let open = self.last_end.saturating_sub(1);
        let scanned = scan::scan_regex(self.raw.remainder());
        let consumed = match &scanned {
            Scanned::Closed { consumed, .. } | Scanned::Unterminated { consumed } => *consumed,
        };
        self.raw.bump(consumed);
        let end = self.raw.span().end;
        self.last_end = end;
        trace!(closed = matches!(scanned, Scanned::Closed { .. }), "leaving regex mode");
        match scanned {
            Scanned::Closed { text, .. } => self.token(TokenKind::Regex, text, open, end),
            Scanned::Unterminated { .. } => self.invalid(LexError::UnterminatedRegex, open, end),
        }
    }

    fn lex_string(&mut self, start: usize) -> Token {
        let body_start = start + 1;
        match scan::scan_string(self.raw.remainder()) {
            Scanned::Closed { text, consumed } => {
                self.raw.bump(consumed);
                self.token(TokenKind::String, text, start, body_start + consumed)
            }
            Scanned::Unterminated { consumed } => {
                self.raw.bump(consumed);
                self.invalid(LexError::UnterminatedString, start, body_start + consumed)
            }
        }
    }

    fn lex_number(&mut self, start: usize) -> Token {
        let tail = scan::exponent_tail_len(self.raw.slice(), self.raw.remainder());
        self.raw.bump(tail);
        let end = self.raw.span().end;
        let lexeme = &self.source[start..end];
        let kind = match scan::classify_number(lexeme) {
            NumberClass::Int => TokenKind::Int,
            NumberClass::Float => TokenKind::Float,
            NumberClass::Invalid => {
                return self.invalid(LexError::InvalidNumber(lexeme.to_owned()), start, end);
            }
        };
        self.token(kind, lexeme, start, end)
    }

    fn lex_invalid_char(&mut self, start: usize, end: usize) -> Token {
        let ch = self
            .source
            .get(start..)
            .and_then(|rest| rest.chars().next())
            .unwrap_or(char::REPLACEMENT_CHARACTER);
        let char_end = start + ch.len_utf8();
        if end < char_end {
            self.raw.bump(char_end - end);
        }
        let end = end.max(char_end);
        self.invalid(LexError::InvalidCharacter(ch), start, end)
    }

    /// An `Invalid` token whose text is the error message. The error is kept
    /// for [`Lexer::take_error`].
    fn invalid(&mut self, error: LexError, start: usize, end: usize) -> Token {
        let token = self.token(TokenKind::Invalid, error.to_string(), start, end);
        self.error = Some(error);
        token
    }

    /// Build a token covering `start..end` on the current line.
    fn token(&self, kind: TokenKind, text: impl Into<String>, start: usize, end: usize) -> Token {
        let start_col = self.column(start);
        let width = self.source.get(start..end).map_or(0, |s| s.chars().count());
        let end_col = start_col.saturating_add(u32::try_from(width).unwrap_or(u32::MAX));
        Token::new(
            kind,
            text,
            Position::new(Arc::clone(&self.name), self.line, start_col, end_col),
        )
    }

    fn column(&self, offset: usize) -> u32 {
        let chars = self
            .source
            .get(self.line_start..offset)
            .map_or(0, |s| s.chars().count());
        u32::try_from(chars).map_or(u32::MAX, |c| c.saturating_add(1))
    }
}

/// Lex a whole source in ordinary mode, up to and including `Eof`.
///
/// Regex mode is never entered, so `/` always lexes as `Slash`. Useful for
/// token dumps and tests; the parser drives [`Lexer`] directly.
pub fn tokenize(name: impl Into<Arc<str>>, source: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(name, source);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token();
        let eof = token.is(TokenKind::Eof);
        tokens.push(token);
        if eof {
            return tokens;
        }
    }
}

#[cfg(test)]
mod tests;
