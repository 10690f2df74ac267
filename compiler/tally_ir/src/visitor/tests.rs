use super::*;
use crate::ast::PostfixOp;
use crate::Position;
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn pos() -> Position {
    Position::new(Arc::from("t.tally"), 1, 1, 2)
}

fn pattern(source: &str) -> Pattern {
    Pattern {
        source: source.to_owned(),
        regex: "re#0".to_owned(),
        captures: Vec::new(),
    }
}

fn increment(metric: &str) -> Stmt {
    let operand = Expr::new(ExprKind::MetricRef(metric.to_owned()), pos());
    Stmt::new(
        StmtKind::Expr(Expr::new(
            ExprKind::Postfix {
                op: PostfixOp::Inc,
                operand: Box::new(operand),
            },
            pos(),
        )),
        pos(),
    )
}

/// `/bar/ { foo++ }`
fn sample() -> Program {
    let cond = Stmt::new(
        StmtKind::Cond {
            cond: Expr::new(ExprKind::Pattern(pattern("bar")), pos()),
            then_block: Block {
                stmts: vec![increment("foo")],
                pos: pos(),
            },
            else_block: None,
        },
        pos(),
    );
    Program {
        name: "t.tally".to_owned(),
        stmts: vec![cond],
        pos: pos(),
    }
}

#[test]
fn node_count_covers_every_node() {
    // program, cond stmt, pattern expr, pattern, block, expr stmt, postfix, metric ref
    assert_eq!(sample().node_count(), 8);
}

#[test]
fn custom_visitor_sees_nested_nodes() {
    struct Increments(Vec<String>);

    impl<'ast> Visitor<'ast> for Increments {
        fn visit_expr(&mut self, expr: &'ast Expr) {
            if let ExprKind::Postfix {
                op: PostfixOp::Inc,
                operand,
            } = &expr.kind
            {
                if let ExprKind::MetricRef(name) = &operand.kind {
                    self.0.push(name.clone());
                }
            }
            walk_expr(self, expr);
        }
    }

    let program = sample();
    let mut increments = Increments(Vec::new());
    increments.visit_program(&program);
    assert_eq!(increments.0, vec!["foo".to_owned()]);
}

#[test]
fn empty_program_counts_root_only() {
    let program = Program {
        name: String::new(),
        stmts: Vec::new(),
        pos: pos(),
    };
    assert_eq!(program.node_count(), 1);
}
