//! AST Visitor Pattern
//!
//! Default `visit_*` methods call the matching `walk_*` function, which
//! visits the node's children. Override a `visit_*` method to act on a node
//! kind and call the `walk_*` function to keep descending.
//!
//! ```text
//! struct CountIncrements(usize);
//!
//! impl<'ast> Visitor<'ast> for CountIncrements {
//!     fn visit_expr(&mut self, expr: &'ast Expr) {
//!         if let ExprKind::Postfix { op: PostfixOp::Inc, .. } = expr.kind {
//!             self.0 += 1;
//!         }
//!         walk_expr(self, expr);
//!     }
//! }
//! ```

use crate::ast::{Block, Expr, ExprKind, Pattern, Program, Stmt, StmtKind};

pub trait Visitor<'ast> {
    fn visit_program(&mut self, program: &'ast Program) {
        walk_program(self, program);
    }

    fn visit_stmt(&mut self, stmt: &'ast Stmt) {
        walk_stmt(self, stmt);
    }

    fn visit_block(&mut self, block: &'ast Block) {
        walk_block(self, block);
    }

    fn visit_expr(&mut self, expr: &'ast Expr) {
        walk_expr(self, expr);
    }

    /// Patterns have no children.
    fn visit_pattern(&mut self, pattern: &'ast Pattern) {
        let _ = pattern;
    }
}

pub fn walk_program<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, program: &'ast Program) {
    for stmt in &program.stmts {
        visitor.visit_stmt(stmt);
    }
}

pub fn walk_block<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, block: &'ast Block) {
    for stmt in &block.stmts {
        visitor.visit_stmt(stmt);
    }
}

pub fn walk_stmt<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, stmt: &'ast Stmt) {
    match &stmt.kind {
        StmtKind::Const { pattern, .. } => visitor.visit_pattern(pattern),
        StmtKind::Cond {
            cond,
            then_block,
            else_block,
        } => {
            visitor.visit_expr(cond);
            visitor.visit_block(then_block);
            if let Some(else_block) = else_block {
                visitor.visit_block(else_block);
            }
        }
        StmtKind::Otherwise(body)
        | StmtKind::Def { body, .. }
        | StmtKind::Deco { body, .. } => visitor.visit_block(body),
        StmtKind::Del(expr) | StmtKind::Expr(expr) => visitor.visit_expr(expr),
        StmtKind::Decl(_) | StmtKind::Next | StmtKind::Stop | StmtKind::Error => {}
    }
}

pub fn walk_expr<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, expr: &'ast Expr) {
    match &expr.kind {
        ExprKind::Pattern(pattern) => visitor.visit_pattern(pattern),
        ExprKind::Index { target, args } => {
            visitor.visit_expr(target);
            for arg in args {
                visitor.visit_expr(arg);
            }
        }
        ExprKind::Unary { operand, .. } | ExprKind::Postfix { operand, .. } => {
            visitor.visit_expr(operand);
        }
        ExprKind::Binary { left, right, .. } => {
            visitor.visit_expr(left);
            visitor.visit_expr(right);
        }
        ExprKind::Match {
            subject, pattern, ..
        } => {
            visitor.visit_expr(subject);
            visitor.visit_pattern(pattern);
        }
        ExprKind::Assign { target, value, .. } => {
            visitor.visit_expr(target);
            visitor.visit_expr(value);
        }
        ExprKind::Call { args, .. } => {
            for arg in args {
                visitor.visit_expr(arg);
            }
        }
        ExprKind::Int(_)
        | ExprKind::Float(_)
        | ExprKind::Str(_)
        | ExprKind::MetricRef(_)
        | ExprKind::CapRef(_)
        | ExprKind::Error => {}
    }
}

/// Counts every program, statement, block, expression and pattern node.
#[derive(Default)]
struct NodeCounter {
    count: usize,
}

impl<'ast> Visitor<'ast> for NodeCounter {
    fn visit_program(&mut self, program: &'ast Program) {
        self.count += 1;
        walk_program(self, program);
    }

    fn visit_stmt(&mut self, stmt: &'ast Stmt) {
        self.count += 1;
        walk_stmt(self, stmt);
    }

    fn visit_block(&mut self, block: &'ast Block) {
        self.count += 1;
        walk_block(self, block);
    }

    fn visit_expr(&mut self, expr: &'ast Expr) {
        self.count += 1;
        walk_expr(self, expr);
    }

    fn visit_pattern(&mut self, _pattern: &'ast Pattern) {
        self.count += 1;
    }
}

pub(crate) fn count_nodes(program: &Program) -> usize {
    let mut counter = NodeCounter::default();
    counter.visit_program(program);
    counter.count
}

#[cfg(test)]
mod tests;
