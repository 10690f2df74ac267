//! Expression parsing.
//!
//! Precedence, lowest first:
//!
//! | level          | operators                     | assoc |
//! |----------------|-------------------------------|-------|
//! | assignment     | `=` `+=`                      | right |
//! | logical or     | `\|\|`                        | left  |
//! | logical and    | `&&`                          | left  |
//! | match          | `=~` `!~`                     | left  |
//! | comparison     | `==` `!=` `<` `>` `<=` `>=`   | left  |
//! | bitwise or     | `\|`                          | left  |
//! | bitwise xor    | `^`                           | left  |
//! | bitwise and    | `&`                           | left  |
//! | shift          | `<<` `>>`                     | left  |
//! | additive       | `+` `-`                       | left  |
//! | multiplicative | `*` `/` `%`                   | left  |
//! | power          | `**`                          | right |
//! | unary          | `!` `~` `-`                   | -     |
//! | postfix        | `++` `--`                     | -     |
//!
//! A `/` in operand position starts a pattern; anywhere else it divides.

use tally_diagnostic::{ErrorCode, ErrorGuaranteed};
use tally_ir::{
    AssignOp, BinaryOp, Builtin, Expr, ExprKind, Position, PostfixOp, TokenKind, UnaryOp,
};

use crate::cursor::TokenValue;
use crate::recovery::TokenSet;
use crate::symbol_table::SymbolKind;
use crate::Parser;

const OR_OPS: &[(TokenKind, BinaryOp)] = &[(TokenKind::PipePipe, BinaryOp::Or)];
const AND_OPS: &[(TokenKind, BinaryOp)] = &[(TokenKind::AmpAmp, BinaryOp::And)];
const COMPARISON_OPS: &[(TokenKind, BinaryOp)] = &[
    (TokenKind::EqEq, BinaryOp::Eq),
    (TokenKind::NotEq, BinaryOp::NotEq),
    (TokenKind::Lt, BinaryOp::Lt),
    (TokenKind::Gt, BinaryOp::Gt),
    (TokenKind::LtEq, BinaryOp::LtEq),
    (TokenKind::GtEq, BinaryOp::GtEq),
];
const BIT_OR_OPS: &[(TokenKind, BinaryOp)] = &[(TokenKind::Pipe, BinaryOp::BitOr)];
const BIT_XOR_OPS: &[(TokenKind, BinaryOp)] = &[(TokenKind::Caret, BinaryOp::BitXor)];
const BIT_AND_OPS: &[(TokenKind, BinaryOp)] = &[(TokenKind::Amp, BinaryOp::BitAnd)];
const SHIFT_OPS: &[(TokenKind, BinaryOp)] = &[
    (TokenKind::Shl, BinaryOp::Shl),
    (TokenKind::Shr, BinaryOp::Shr),
];
const ADDITIVE_OPS: &[(TokenKind, BinaryOp)] = &[
    (TokenKind::Plus, BinaryOp::Add),
    (TokenKind::Minus, BinaryOp::Sub),
];
const MULTIPLICATIVE_OPS: &[(TokenKind, BinaryOp)] = &[
    (TokenKind::Star, BinaryOp::Mul),
    (TokenKind::Slash, BinaryOp::Div),
    (TokenKind::Percent, BinaryOp::Mod),
];

fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
    let pos = left.pos.merge(&right.pos);
    Expr::new(
        ExprKind::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        },
        pos,
    )
}

impl Parser<'_> {
    /// Parse an expression.
    pub(crate) fn parse_expr(&mut self) -> Result<Expr, ErrorGuaranteed> {
        self.nested(Self::parse_assign)
    }

    fn parse_assign(&mut self) -> Result<Expr, ErrorGuaranteed> {
        let target = self.parse_or()?;
        let op = match self.current_kind() {
            TokenKind::Assign => AssignOp::Set,
            TokenKind::AddAssign => AssignOp::Add,
            _ => return Ok(target),
        };
        self.bump();
        self.skip_newlines();
        let value = self.parse_expr()?;
        let pos = target.pos.merge(&value.pos);
        Ok(Expr::new(
            ExprKind::Assign {
                op,
                target: Box::new(target),
                value: Box::new(value),
            },
            pos,
        ))
    }

    /// One left-associative binary level.
    fn parse_left_assoc(
        &mut self,
        ops: &[(TokenKind, BinaryOp)],
        next: fn(&mut Self) -> Result<Expr, ErrorGuaranteed>,
    ) -> Result<Expr, ErrorGuaranteed> {
        let mut left = next(self)?;
        while let Some(op) = ops
            .iter()
            .find(|(kind, _)| self.check(*kind))
            .map(|(_, op)| *op)
        {
            self.bump();
            self.skip_newlines();
            let right = next(self)?;
            left = binary(op, left, right);
        }
        Ok(left)
    }

    fn parse_or(&mut self) -> Result<Expr, ErrorGuaranteed> {
        self.parse_left_assoc(OR_OPS, Self::parse_and)
    }

    fn parse_and(&mut self) -> Result<Expr, ErrorGuaranteed> {
        self.parse_left_assoc(AND_OPS, Self::parse_match)
    }

    /// `subject =~ pattern`, `subject !~ pattern`
    fn parse_match(&mut self) -> Result<Expr, ErrorGuaranteed> {
        let mut subject = self.parse_comparison()?;
        loop {
            let negated = match self.current_kind() {
                TokenKind::Match => false,
                TokenKind::NotMatch => true,
                _ => return Ok(subject),
            };
            self.bump();
            self.skip_newlines();
            let (pattern, pattern_pos) = self.parse_match_pattern()?;
            let pos = subject.pos.merge(&pattern_pos);
            subject = match pattern {
                Some(pattern) => Expr::new(
                    ExprKind::Match {
                        negated,
                        subject: Box::new(subject),
                        pattern,
                    },
                    pos,
                ),
                None => Expr::error(pos),
            };
        }
    }

    fn parse_comparison(&mut self) -> Result<Expr, ErrorGuaranteed> {
        self.parse_left_assoc(COMPARISON_OPS, Self::parse_bit_or)
    }

    fn parse_bit_or(&mut self) -> Result<Expr, ErrorGuaranteed> {
        self.parse_left_assoc(BIT_OR_OPS, Self::parse_bit_xor)
    }

    fn parse_bit_xor(&mut self) -> Result<Expr, ErrorGuaranteed> {
        self.parse_left_assoc(BIT_XOR_OPS, Self::parse_bit_and)
    }

    fn parse_bit_and(&mut self) -> Result<Expr, ErrorGuaranteed> {
        self.parse_left_assoc(BIT_AND_OPS, Self::parse_shift)
    }

    fn parse_shift(&mut self) -> Result<Expr, ErrorGuaranteed> {
        self.parse_left_assoc(SHIFT_OPS, Self::parse_additive)
    }

    fn parse_additive(&mut self) -> Result<Expr, ErrorGuaranteed> {
        self.parse_left_assoc(ADDITIVE_OPS, Self::parse_multiplicative)
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, ErrorGuaranteed> {
        self.parse_left_assoc(MULTIPLICATIVE_OPS, Self::parse_power)
    }

    /// `**` is right-associative: `2 ** 3 ** 2` is `2 ** (3 ** 2)`.
    fn parse_power(&mut self) -> Result<Expr, ErrorGuaranteed> {
        let base = self.parse_unary()?;
        if !self.check(TokenKind::Pow) {
            return Ok(base);
        }
        self.bump();
        self.skip_newlines();
        let exponent = self.nested(Self::parse_power)?;
        Ok(binary(BinaryOp::Pow, base, exponent))
    }

    fn parse_unary(&mut self) -> Result<Expr, ErrorGuaranteed> {
        let op = match self.current_kind() {
            TokenKind::Bang => UnaryOp::Not,
            TokenKind::Tilde => UnaryOp::BitNot,
            TokenKind::Minus => UnaryOp::Neg,
            _ => return self.parse_postfix(),
        };
        let start = self.bump().0.pos;
        let operand = self.nested(Self::parse_unary)?;
        let pos = start.merge(&operand.pos);
        Ok(Expr::new(
            ExprKind::Unary {
                op,
                operand: Box::new(operand),
            },
            pos,
        ))
    }

    /// `primary ("++" | "--")*`
    pub(super) fn parse_postfix(&mut self) -> Result<Expr, ErrorGuaranteed> {
        let mut expr = self.parse_primary()?;
        loop {
            let op = match self.current_kind() {
                TokenKind::Inc => PostfixOp::Inc,
                TokenKind::Dec => PostfixOp::Dec,
                _ => return Ok(expr),
            };
            let end = self.bump().0.pos;
            let pos = expr.pos.merge(&end);
            expr = Expr::new(
                ExprKind::Postfix {
                    op,
                    operand: Box::new(expr),
                },
                pos,
            );
        }
    }

    fn parse_primary(&mut self) -> Result<Expr, ErrorGuaranteed> {
        match self.current_kind() {
            TokenKind::Int | TokenKind::Float | TokenKind::String => Ok(self.parse_literal()),
            TokenKind::CapRef => Ok(self.parse_capref()),
            TokenKind::Ident => self.parse_name(),
            TokenKind::Slash => self.parse_pattern_expr(),
            TokenKind::LParen => {
                let start = self.bump().0.pos;
                self.skip_newlines();
                let mut inner = self.parse_expr()?;
                self.skip_newlines();
                self.expect(TokenKind::RParen)?;
                inner.pos = self.span_from(&start);
                Ok(inner)
            }
            _ => Err(self.syntax_error("expression")),
        }
    }

    fn parse_literal(&mut self) -> Expr {
        let (token, value) = self.bump();
        let kind = match value {
            TokenValue::Int(value) => ExprKind::Int(value),
            TokenValue::Float(value) => ExprKind::Float(value),
            TokenValue::Text => ExprKind::Str(token.text),
        };
        Expr::new(kind, token.pos)
    }

    /// `$1` or `$name`, which must name a capture group in scope.
    fn parse_capref(&mut self) -> Expr {
        let token = self.bump().0;
        let key = format!("${}", token.text);
        match self.symtab.resolve(&key).map(|symbol| symbol.kind) {
            Some(SymbolKind::CaptureGroup) => Expr::new(ExprKind::CapRef(token.text), token.pos),
            _ => {
                self.report_at(
                    ErrorCode::E2002,
                    format!("undeclared capture group reference '{key}'"),
                    token.pos.clone(),
                );
                Expr::error(token.pos)
            }
        }
    }

    /// An identifier: a builtin call, a metric (possibly indexed), or a
    /// pattern constant.
    fn parse_name(&mut self) -> Result<Expr, ErrorGuaranteed> {
        let kind = self.symtab.resolve(&self.current.text).map(|symbol| symbol.kind);
        if kind == Some(SymbolKind::Constant) {
            return self.parse_pattern_expr();
        }

        let token = self.bump().0;
        if self.check(TokenKind::LParen) {
            return self.parse_call(token.text, token.pos);
        }

        let name = token.text;
        let pos = token.pos;
        match kind {
            Some(SymbolKind::Metric) => {
                let target = Expr::new(ExprKind::MetricRef(name.clone()), pos.clone());
                if self.check(TokenKind::LBracket) {
                    self.parse_index(target, &name)
                } else {
                    Ok(target)
                }
            }
            Some(other) => {
                self.report_at(
                    ErrorCode::E2007,
                    format!("'{name}' is a {other}, not a value"),
                    pos.clone(),
                );
                Ok(Expr::error(pos))
            }
            None => {
                self.report_at(
                    ErrorCode::E2002,
                    format!("undeclared identifier '{name}'"),
                    pos.clone(),
                );
                // Parse the index anyway so its contents are still checked.
                if self.check(TokenKind::LBracket) {
                    self.parse_args(TokenKind::LBracket, TokenKind::RBracket)?;
                }
                Ok(Expr::error(self.span_from(&pos)))
            }
        }
    }

    /// `metric[key, ...]`, checking the key count against the declaration.
    fn parse_index(&mut self, target: Expr, name: &str) -> Result<Expr, ErrorGuaranteed> {
        let args = self.parse_args(TokenKind::LBracket, TokenKind::RBracket)?;
        let pos = self.span_from(&target.pos);
        let declared = self
            .symtab
            .resolve(name)
            .and_then(|symbol| symbol.metric.as_ref())
            .map(tally_metrics::MetricHandle::dimensionality);
        if let Some(declared) = declared {
            if declared != args.len() {
                self.report_at(
                    ErrorCode::E2005,
                    format!(
                        "metric '{name}' takes {declared} key{}, got {}",
                        plural(declared),
                        args.len()
                    ),
                    pos.clone(),
                );
            }
        }
        Ok(Expr::new(
            ExprKind::Index {
                target: Box::new(target),
                args,
            },
            pos,
        ))
    }

    /// `builtin(arg, ...)`
    fn parse_call(&mut self, name: String, start: Position) -> Result<Expr, ErrorGuaranteed> {
        let args = self.parse_args(TokenKind::LParen, TokenKind::RParen)?;
        let pos = self.span_from(&start);
        let Some(builtin) = Builtin::from_name(&name) else {
            self.report_at(
                ErrorCode::E2006,
                format!("unknown builtin function '{name}'"),
                start,
            );
            return Ok(Expr::error(pos));
        };
        if builtin.arity() != args.len() {
            self.report_at(
                ErrorCode::E2005,
                format!(
                    "builtin '{builtin}' takes {} argument{}, got {}",
                    builtin.arity(),
                    plural(builtin.arity()),
                    args.len()
                ),
                pos.clone(),
            );
        }
        Ok(Expr::new(ExprKind::Call { builtin, args }, pos))
    }

    /// `open (expr ("," expr)*)? close`
    fn parse_args(&mut self, open: TokenKind, close: TokenKind) -> Result<Vec<Expr>, ErrorGuaranteed> {
        self.expect(open)?;
        self.skip_newlines();
        let mut args = Vec::new();
        if self.eat(close) {
            return Ok(args);
        }
        let separator_or_close = TokenSet::new().with(TokenKind::Comma).with(close);
        loop {
            args.push(self.parse_expr()?);
            self.skip_newlines();
            if self.expect_one_of(separator_or_close)?.is(close) {
                return Ok(args);
            }
            self.skip_newlines();
        }
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}
