//! Regex patterns.
//!
//! ```text
//! pattern  := fragment ("+" fragment)*
//! fragment := "/" REGEX "/" | CONST_IDENT
//! ```
//!
//! A pattern used as an operand is validated with the `regex` crate, its
//! capture groups are declared in the current scope, and it is interned in
//! the program's [`RegexTable`](tally_ir::RegexTable) so the code generator
//! compiles it once.

use regex::Regex;
use tally_diagnostic::{ErrorCode, ErrorGuaranteed};
use tally_ir::{Expr, ExprKind, Pattern, Position, TokenKind};
use tracing::debug;

use crate::symbol_table::SymbolKind;
use crate::Parser;

impl Parser<'_> {
    /// A pattern in operand position, as an expression.
    ///
    /// An invalid regex is reported and becomes an `Error` node, so the rest
    /// of the statement is still checked.
    pub(super) fn parse_pattern_expr(&mut self) -> Result<Expr, ErrorGuaranteed> {
        let (source, pos) = self.parse_pattern_source()?;
        Ok(match self.finish_pattern(source, &pos) {
            Some(pattern) => Expr::new(ExprKind::Pattern(pattern), pos),
            None => Expr::error(pos),
        })
    }

    /// The pattern on the right of `=~` / `!~`.
    pub(super) fn parse_match_pattern(
        &mut self,
    ) -> Result<(Option<Pattern>, Position), ErrorGuaranteed> {
        let (source, pos) = self.parse_pattern_source()?;
        Ok((self.finish_pattern(source, &pos), pos))
    }

    /// The pattern source bound by `const NAME ...`.
    ///
    /// Constants are fragments: they are validated and their groups declared
    /// only where they are used.
    pub(super) fn parse_const_pattern(&mut self) -> Result<String, ErrorGuaranteed> {
        Ok(self.parse_pattern_source()?.0)
    }

    fn parse_pattern_source(&mut self) -> Result<(String, Position), ErrorGuaranteed> {
        let (mut source, start) = self.parse_fragment()?;
        let mut end = start.clone();
        while self.eat(TokenKind::Plus) {
            self.skip_newlines();
            let (fragment, pos) = self.parse_fragment()?;
            source.push_str(&fragment);
            end = pos;
        }
        Ok((source, start.merge(&end)))
    }

    fn parse_fragment(&mut self) -> Result<(String, Position), ErrorGuaranteed> {
        match self.current_kind() {
            TokenKind::Slash => {
                // The lexer has not looked past this `/` yet, so the next
                // token it produces is the regex body.
                self.lexer.enter_regex_mode();
                self.bump();
                let token = self.expect(TokenKind::Regex)?;
                Ok((token.text, token.pos))
            }
            TokenKind::Ident => {
                let name = self.current.text.clone();
                let pos = self.current.pos.clone();
                let resolved = self
                    .symtab
                    .resolve(&name)
                    .map(|symbol| (symbol.kind, symbol.pattern.clone()));
                match resolved {
                    Some((SymbolKind::Constant, pattern)) => {
                        self.bump();
                        Ok((pattern.unwrap_or_default(), pos))
                    }
                    Some((other, _)) => Err(self.report_at(
                        ErrorCode::E2007,
                        format!("'{name}' is a {other}, not a pattern constant"),
                        pos,
                    )),
                    None => Err(self.report_at(
                        ErrorCode::E2002,
                        format!("undeclared identifier '{name}'"),
                        pos,
                    )),
                }
            }
            _ => Err(self.syntax_error("regular expression")),
        }
    }

    /// Validate, declare capture groups and intern.
    fn finish_pattern(&mut self, source: String, pos: &Position) -> Option<Pattern> {
        let regex = match Regex::new(&source) {
            Ok(regex) => regex,
            Err(err) => {
                self.report_at(
                    ErrorCode::E2003,
                    format!("invalid regular expression: {}", regex_error_reason(&err)),
                    pos.clone(),
                );
                return None;
            }
        };

        let mut captures: Vec<String> = (1..regex.captures_len()).map(|i| i.to_string()).collect();
        captures.extend(regex.capture_names().flatten().map(str::to_owned));
        for capture in &captures {
            self.symtab
                .rebind(&format!("${capture}"), SymbolKind::CaptureGroup, pos.clone());
        }

        let name = self.regexes.intern(&source);
        if self.config.traces_events() {
            debug!(%name, %source, groups = captures.len(), "pattern");
        }
        Some(Pattern {
            source,
            regex: name,
            captures,
        })
    }
}

/// The one-line cause of a regex compile error.
///
/// Syntax errors render as several lines (the pattern, a caret, the cause);
/// only the last carries the reason.
fn regex_error_reason(err: &regex::Error) -> String {
    let rendered = err.to_string();
    let last = rendered.lines().last().unwrap_or_default().trim();
    last.strip_prefix("error: ").unwrap_or(last).to_owned()
}
