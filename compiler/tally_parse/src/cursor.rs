//! Token pull and error reporting.
//!
//! The parser keeps exactly one token of lookahead in `current`. The lexer
//! has produced nothing beyond it, which is what lets the grammar switch the
//! lexer into regex mode while `current` is the opening `/`.

use std::mem;

use tally_diagnostic::{ErrorCode, ErrorGuaranteed};
use tally_ir::{Position, Token, TokenKind};
use tally_lexer::LexError;
use tracing::trace;

use crate::recovery::{TokenSet, STMT_END};
use crate::Parser;

/// Converted payload of the lookahead token.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum TokenValue {
    Int(i64),
    Float(f64),
    /// Everything else; the payload is the token text.
    Text,
}

impl Parser<'_> {
    /// Consume the lookahead and pull the next token from the lexer.
    ///
    /// Returns the consumed token and its converted value. Lexical errors in
    /// the new lookahead are reported here and replaced by an `Error`
    /// placeholder, as are numbers that do not fit their type.
    pub(crate) fn bump(&mut self) -> (Token, TokenValue) {
        let next = self.lexer.next_token();
        let prev = mem::replace(&mut self.current, next);
        let prev_value = mem::replace(&mut self.value, TokenValue::Text);
        self.prev_pos = prev.pos.clone();
        self.accept_lookahead();
        (prev, prev_value)
    }

    fn accept_lookahead(&mut self) {
        if self.config.traces_tokens() {
            trace!(token = ?self.current, "lexed");
        }
        match self.current.kind {
            TokenKind::Invalid => {
                let code = self
                    .lexer
                    .take_error()
                    .as_ref()
                    .map_or(ErrorCode::E0004, LexError::code);
                let message = self.current.text.clone();
                self.report_at_current_token(code, message);
                self.replace_with_placeholder();
            }
            TokenKind::Int => match self.current.text.parse::<i64>() {
                Ok(value) => self.value = TokenValue::Int(value),
                Err(err) => self.bad_number(&err.to_string()),
            },
            TokenKind::Float => match self.current.text.parse::<f64>() {
                Ok(value) if value.is_finite() => self.value = TokenValue::Float(value),
                Ok(_) => self.bad_number("value out of range"),
                Err(err) => self.bad_number(&err.to_string()),
            },
            _ => {}
        }
    }

    fn bad_number(&mut self, reason: &str) {
        let message = format!("bad number '{}': {reason}", self.current.text);
        self.report_at_current_token(ErrorCode::E0003, message);
        self.replace_with_placeholder();
    }

    fn replace_with_placeholder(&mut self) {
        let pos = self.current.pos.clone();
        let text = mem::take(&mut self.current.text);
        self.current = Token::new(TokenKind::Error, text, pos);
        self.value = TokenValue::Text;
    }

    /// Kind of the lookahead token.
    #[inline]
    pub(crate) fn current_kind(&self) -> TokenKind {
        self.current.kind
    }

    #[inline]
    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    #[inline]
    pub(crate) fn check_any(&self, set: TokenSet) -> bool {
        set.contains(self.current.kind)
    }

    /// Consume the lookahead if it is `kind`.
    pub(crate) fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consume a token of `kind` or report a syntax error.
    pub(crate) fn expect(&mut self, kind: TokenKind) -> Result<Token, ErrorGuaranteed> {
        if self.check(kind) {
            Ok(self.bump().0)
        } else {
            Err(self.syntax_error(kind.display_name()))
        }
    }

    /// Consume a token of any kind in `set` or report a syntax error listing
    /// them all.
    pub(crate) fn expect_one_of(&mut self, set: TokenSet) -> Result<Token, ErrorGuaranteed> {
        if self.check_any(set) {
            Ok(self.bump().0)
        } else {
            Err(self.syntax_error(&set.format_expected()))
        }
    }

    /// Consume an identifier and return its text and position.
    pub(crate) fn expect_ident(&mut self) -> Result<(String, Position), ErrorGuaranteed> {
        let token = self.expect(TokenKind::Ident)?;
        Ok((token.text, token.pos))
    }

    pub(crate) fn skip_newlines(&mut self) {
        while self.check(TokenKind::Newline) {
            self.bump();
        }
    }

    /// Skip ahead to the next statement boundary (newline, `;`, the `}`
    /// closing the current block, or end of input). Braced blocks met on the
    /// way are skipped whole.
    pub(crate) fn synchronize(&mut self) {
        let mut braces = 0usize;
        loop {
            match self.current_kind() {
                TokenKind::Eof => return,
                TokenKind::LBrace => braces += 1,
                TokenKind::RBrace if braces > 0 => braces -= 1,
                kind if braces == 0 && STMT_END.contains(kind) => return,
                _ => {}
            }
            self.bump();
        }
    }

    /// Report an error at `pos`.
    pub(crate) fn report_at(
        &mut self,
        code: ErrorCode,
        message: impl Into<String>,
        pos: Position,
    ) -> ErrorGuaranteed {
        self.errors.add_with_code(pos, code, message)
    }

    /// Report an error at the most recently lexed token.
    pub(crate) fn report_at_current_token(
        &mut self,
        code: ErrorCode,
        message: impl Into<String>,
    ) -> ErrorGuaranteed {
        let pos = self.current.pos.clone();
        self.report_at(code, message, pos)
    }

    /// Report `syntax error: unexpected <found>, expected <expected>` at the
    /// lookahead.
    ///
    /// Nothing new is reported when the lookahead is an `Error` placeholder:
    /// the lexical error behind it is already in the list.
    #[cold]
    pub(crate) fn syntax_error(&mut self, expected: &str) -> ErrorGuaranteed {
        if self.check(TokenKind::Error) {
            if let Some(reported) = self.errors.has_errors() {
                return reported;
            }
        }
        let message = format!(
            "syntax error: unexpected {}, expected {expected}",
            self.current.describe()
        );
        self.report_at_current_token(ErrorCode::E1001, message)
    }

    /// Span from `start` through the last consumed token.
    pub(crate) fn span_from(&self, start: &Position) -> Position {
        start.merge(&self.prev_pos)
    }
}

#[cfg(test)]
mod tests;
