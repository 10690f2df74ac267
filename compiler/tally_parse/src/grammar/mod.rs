//! Statement grammar.
//!
//! ```text
//! program      := stmt*
//! stmt         := decl | const | def | deco | "next" | "stop" | "del" postfix
//!               | "otherwise" block | cond_or_expr
//! cond_or_expr := expr (block ("else" block)?)?
//! block        := "{" stmt* "}"
//! ```
//!
//! Statements end at a newline, `;`, the closing `}` of their block, or end
//! of input. A statement that fails to parse is replaced by
//! [`StmtKind::Error`] and the parser resynchronizes at the next boundary.

mod decl;
mod expr;
mod pattern;

use tally_diagnostic::{ErrorCode, ErrorGuaranteed};
use tally_ir::{Block, ExprKind, Pattern, Program, Stmt, StmtKind, TokenKind};
use tracing::debug;

use crate::recovery::{DECL_START, STMT_END, STMT_SEPARATOR};
use crate::stack::ensure_sufficient_stack;
use crate::symbol_table::SymbolKind;
use crate::Parser;

impl Parser<'_> {
    /// Parse the whole source.
    pub(crate) fn parse_program(&mut self) -> Program {
        let start = self.current.pos.clone();
        let stmts = self.parse_stmt_list(TokenKind::Eof);
        Program {
            name: self.name.to_string(),
            stmts,
            pos: self.span_from(&start),
        }
    }

    /// Parse statements until `close` (not consumed) or end of input.
    fn parse_stmt_list(&mut self, close: TokenKind) -> Vec<Stmt> {
        let mut stmts = Vec::new();
        loop {
            while self.check_any(STMT_SEPARATOR) {
                self.bump();
            }
            if self.check(close) || self.check(TokenKind::Eof) {
                return stmts;
            }
            if self.check(TokenKind::RBrace) {
                // Stray `}` at top level.
                let start = self.current.pos.clone();
                self.syntax_error("statement");
                self.bump();
                stmts.push(Stmt::new(StmtKind::Error, start));
                continue;
            }

            self.depth_reported = false;
            let start = self.current.pos.clone();
            match self.parse_stmt() {
                Ok(stmt) => {
                    let ends_with_block = matches!(
                        stmt.kind,
                        StmtKind::Cond { .. }
                            | StmtKind::Otherwise(_)
                            | StmtKind::Def { .. }
                            | StmtKind::Deco { .. }
                    );
                    stmts.push(stmt);
                    if !ends_with_block && !self.check_any(STMT_END) {
                        self.syntax_error("end of statement");
                        self.synchronize();
                    }
                }
                Err(_) => {
                    self.synchronize();
                    stmts.push(Stmt::new(StmtKind::Error, self.span_from(&start)));
                }
            }
        }
    }

    fn parse_stmt(&mut self) -> Result<Stmt, ErrorGuaranteed> {
        let start = self.current.pos.clone();
        let kind = match self.current_kind() {
            kind if DECL_START.contains(kind) => StmtKind::Decl(self.parse_decl()?),
            TokenKind::Const => self.parse_const()?,
            TokenKind::Def => self.parse_def()?,
            TokenKind::At => self.parse_deco()?,
            TokenKind::Next => {
                self.bump();
                StmtKind::Next
            }
            TokenKind::Stop => {
                self.bump();
                StmtKind::Stop
            }
            TokenKind::Del => self.parse_del()?,
            TokenKind::Otherwise => {
                self.bump();
                StmtKind::Otherwise(self.parse_block()?)
            }
            _ => self.parse_cond_or_expr()?,
        };
        Ok(Stmt::new(kind, self.span_from(&start)))
    }

    /// `expr (block ("else" block)?)?`
    ///
    /// The condition's scope is opened before the condition is parsed so
    /// that capture groups declared by its patterns are visible both in the
    /// condition and in the block.
    fn parse_cond_or_expr(&mut self) -> Result<StmtKind, ErrorGuaranteed> {
        let (cond, then_block) = self.with_scope(|p| {
            let cond = p.parse_expr()?;
            if !p.check(TokenKind::LBrace) {
                return Ok((cond, None));
            }
            let block = p.parse_block()?;
            Ok((cond, Some(block)))
        })?;

        let Some(then_block) = then_block else {
            return Ok(StmtKind::Expr(cond));
        };

        self.skip_newlines();
        let else_block = if self.eat(TokenKind::Else) {
            Some(self.parse_block()?)
        } else {
            None
        };
        Ok(StmtKind::Cond {
            cond,
            then_block,
            else_block,
        })
    }

    /// `"{" stmt* "}"` in a scope of its own.
    pub(crate) fn parse_block(&mut self) -> Result<Block, ErrorGuaranteed> {
        self.nested(|p| {
            let start = p.expect(TokenKind::LBrace)?.pos;
            let stmts = p.with_scope(|p| p.parse_stmt_list(TokenKind::RBrace));
            p.expect(TokenKind::RBrace)?;
            Ok(Block {
                stmts,
                pos: p.span_from(&start),
            })
        })
    }

    /// `"const" IDENT pattern`
    ///
    /// The pattern source lives on the symbol, so a constant shadowed in a
    /// nested scope resolves to the inner pattern. In the regex table a
    /// shadowing constant is recorded as `NAME@line:col`.
    fn parse_const(&mut self) -> Result<StmtKind, ErrorGuaranteed> {
        self.bump();
        let (name, name_pos) = self.expect_ident()?;
        let source = self.parse_const_pattern()?;
        match self.symtab.declare(&name, SymbolKind::Constant, name_pos.clone()) {
            Ok(symbol) => symbol.pattern = Some(source.clone()),
            Err(dup) => {
                self.report_at(ErrorCode::E2001, dup.to_string(), name_pos.clone());
            }
        }

        let regex = if self.regexes.insert_named(&name, &source)
            || self.regexes.get(&name) == Some(source.as_str())
        {
            name.clone()
        } else {
            let qualified = format!("{name}@{}:{}", name_pos.line, name_pos.start_col);
            self.regexes.insert_named(&qualified, &source);
            qualified
        };
        Ok(StmtKind::Const {
            name,
            pattern: Pattern {
                source,
                regex,
                captures: Vec::new(),
            },
        })
    }

    /// `"def" IDENT block`
    fn parse_def(&mut self) -> Result<StmtKind, ErrorGuaranteed> {
        self.bump();
        let (name, name_pos) = self.expect_ident()?;
        if let Err(dup) = self.symtab.declare(&name, SymbolKind::Decorator, name_pos.clone()) {
            self.report_at(ErrorCode::E2001, dup.to_string(), name_pos);
        }
        let body = self.parse_block()?;
        Ok(StmtKind::Def { name, body })
    }

    /// `"@" IDENT block`
    fn parse_deco(&mut self) -> Result<StmtKind, ErrorGuaranteed> {
        self.bump();
        let (name, name_pos) = self.expect_ident()?;
        match self.symtab.resolve(&name).map(|symbol| symbol.kind) {
            Some(SymbolKind::Decorator) => {}
            Some(other) => {
                self.report_at(
                    ErrorCode::E2007,
                    format!("'{name}' is a {other}, not a decorator"),
                    name_pos,
                );
            }
            None => {
                self.report_at(
                    ErrorCode::E2002,
                    format!("undeclared decorator '@{name}'"),
                    name_pos,
                );
            }
        }
        let body = self.parse_block()?;
        Ok(StmtKind::Deco { name, body })
    }

    /// `"del" metric[keys]`
    fn parse_del(&mut self) -> Result<StmtKind, ErrorGuaranteed> {
        self.bump();
        let target = self.parse_postfix()?;
        if !matches!(target.kind, ExprKind::Index { .. } | ExprKind::Error) {
            self.report_at(
                ErrorCode::E1001,
                "syntax error: `del` needs an indexed metric, such as `del foo[$1]`",
                target.pos.clone(),
            );
        }
        Ok(StmtKind::Del(target))
    }

    /// Run `f` in a fresh child scope. The scope is closed whatever `f`
    /// returns.
    pub(crate) fn with_scope<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let scope = self.symtab.scope_start();
        if self.config.traces_events() {
            debug!(?scope, depth = self.symtab.depth(), "scope start");
        }
        let result = f(self);
        self.symtab.scope_end();
        if self.config.traces_events() {
            debug!(?scope, depth = self.symtab.depth(), "scope end");
        }
        result
    }

    /// Run `f` one nesting level deeper.
    ///
    /// Past [`ParserConfig::max_nesting_depth`](crate::ParserConfig) this
    /// reports `expression nested too deeply` (once per statement) and fails
    /// without calling `f`.
    pub(crate) fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, ErrorGuaranteed>,
    ) -> Result<T, ErrorGuaranteed> {
        if self.depth >= self.config.max_nesting_depth {
            if self.depth_reported {
                if let Some(reported) = self.errors.has_errors() {
                    return Err(reported);
                }
            }
            self.depth_reported = true;
            return Err(self.report_at_current_token(ErrorCode::E1002, "expression nested too deeply"));
        }
        self.depth += 1;
        let result = ensure_sufficient_stack(|| f(self));
        self.depth -= 1;
        result
    }
}
