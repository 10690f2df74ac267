//! Recursive descent parser for Tally.
//!
//! The parser pulls tokens from the lexer one at a time with a single token
//! of lookahead, builds the owned AST, resolves names against a lexically
//! scoped [`SymbolTable`], and registers declared metrics in a shared
//! [`MetricStore`]. Every lexical, syntactic and semantic problem goes into
//! one [`ErrorList`]; the parse never stops early except when the source
//! cannot be read at all.
//!
//! # Module Structure
//!
//! - `cursor.rs`: token pull, lookahead checks, error reporting
//! - `grammar/`: statements, expressions and patterns
//! - `symbol_table.rs`: scopes and name resolution
//! - `recovery.rs`: token sets used to resynchronize after errors
//! - `stack.rs`: stack growth for deep recursion

mod config;
mod cursor;
mod grammar;
mod recovery;
mod stack;
mod symbol_table;

use std::io::{self, Read};
use std::sync::Arc;

use tally_diagnostic::{ErrorCode, ErrorList};
use tally_ir::{Position, Program, RegexTable, Token, TokenKind};
use tally_lexer::Lexer;
use tally_metrics::MetricStore;
use tracing::debug;

pub use config::{ParserConfig, DEFAULT_MAX_NESTING_DEPTH};
pub use symbol_table::{DuplicateSymbol, ScopeId, Symbol, SymbolKind, SymbolTable};

use cursor::TokenValue;

/// Everything a parse produces.
#[derive(Debug)]
pub struct ParseOutput {
    /// The program, complete or partial. `None` only if the source could not
    /// be read. Check [`ParseOutput::errors`] to decide success.
    pub program: Option<Program>,
    pub errors: ErrorList,
    /// Named pattern constants and one internal entry per pattern in use.
    pub regexes: RegexTable,
}

impl ParseOutput {
    /// The output for a source that could not be read: no program and a
    /// single `cannot read source` error at `name:1:1`.
    pub fn unreadable(name: &str, err: &io::Error) -> Self {
        let mut errors = ErrorList::new();
        errors.add_with_code(
            Position::new(Arc::from(name), 1, 1, 1),
            ErrorCode::E9001,
            format!("cannot read source: {err}"),
        );
        ParseOutput {
            program: None,
            errors,
            regexes: RegexTable::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// The program and its regex table, or the errors if there were any.
    pub fn into_result(self) -> Result<(Program, RegexTable), ErrorList> {
        match self.program {
            Some(program) if self.errors.is_empty() => Ok((program, self.regexes)),
            _ => Err(self.errors),
        }
    }
}

/// Parse a program with the default configuration.
pub fn parse(name: &str, reader: impl Read, metrics: &MetricStore) -> ParseOutput {
    parse_with_config(name, reader, metrics, &ParserConfig::default())
}

/// Parse a program.
///
/// The source is read in full before lexing starts. Metrics declared by the
/// program are registered in `metrics`, which may be shared with parses
/// running on other threads.
pub fn parse_with_config(
    name: &str,
    mut reader: impl Read,
    metrics: &MetricStore,
    config: &ParserConfig,
) -> ParseOutput {
    let mut source = String::new();
    if let Err(err) = reader.read_to_string(&mut source) {
        return ParseOutput::unreadable(name, &err);
    }
    parse_source(name, &source, metrics, config)
}

/// Parse a program already held in memory.
pub fn parse_source(
    name: &str,
    source: &str,
    metrics: &MetricStore,
    config: &ParserConfig,
) -> ParseOutput {
    let mut parser = Parser::new(name, source, metrics, config);
    let program = parser.parse_program();
    debug_assert_eq!(parser.symtab.depth(), 0, "unbalanced scopes after parse");
    if config.traces_events() {
        debug!(
            name,
            stmts = program.stmts.len(),
            scopes = parser.symtab.scope_count(),
            errors = parser.errors.len(),
            "parse finished"
        );
    }
    ParseOutput {
        program: Some(program),
        errors: parser.errors,
        regexes: parser.regexes,
    }
}

/// Parser state for one source.
pub(crate) struct Parser<'src> {
    lexer: Lexer<'src>,
    /// The lookahead: the most recently lexed token.
    current: Token,
    /// Converted payload of `current`.
    value: TokenValue,
    /// Position of the last consumed token, for closing node spans.
    prev_pos: Position,
    name: Arc<str>,
    errors: ErrorList,
    symtab: SymbolTable,
    regexes: RegexTable,
    metrics: MetricStore,
    config: ParserConfig,
    /// Current expression/block nesting.
    depth: usize,
    /// Whether the nesting limit was already reported in this statement.
    depth_reported: bool,
}

impl<'src> Parser<'src> {
    pub(crate) fn new(
        name: &str,
        source: &'src str,
        metrics: &MetricStore,
        config: &ParserConfig,
    ) -> Self {
        let name: Arc<str> = Arc::from(name);
        let start = Position::point(Arc::clone(&name), 1, 1);
        let mut parser = Parser {
            lexer: Lexer::new(Arc::clone(&name), source),
            current: Token::new(TokenKind::Newline, "", start.clone()),
            value: TokenValue::Text,
            prev_pos: start,
            name,
            errors: ErrorList::new(),
            symtab: SymbolTable::new(),
            regexes: RegexTable::new(),
            metrics: metrics.clone(),
            config: config.clone(),
            depth: 0,
            depth_reported: false,
        };
        // Prime the lookahead.
        parser.bump();
        parser
    }
}

#[cfg(test)]
mod tests;
