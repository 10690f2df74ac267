//! Shared data types for the Tally front end.
//!
//! - [`Position`]: source locations carried by every token, node and error
//! - [`Token`] / [`TokenKind`]: lexer output
//! - [`ast`]: the owned syntax tree handed to the code generator
//! - [`RegexTable`]: pattern constants collected while parsing
//! - [`visitor`]: read-only AST traversal

pub mod ast;
mod position;
mod regex_table;
mod token;
pub mod visitor;

pub use ast::{
    AssignOp, BinaryOp, Block, Builtin, Expr, ExprKind, MetricDecl, Pattern, PostfixOp, Program,
    Stmt, StmtKind, UnaryOp,
};
pub use position::Position;
pub use regex_table::RegexTable;
pub use token::{Token, TokenKind};
pub use visitor::Visitor;
