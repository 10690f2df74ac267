//! Abstract syntax tree.
//!
//! Nodes own their children (`Box`/`Vec`), so the tree is acyclic and moves
//! to the code generator by value. Every node records the [`Position`] span
//! of the tokens it was built from.
//!
//! Names are resolved while parsing: a [`ExprKind::MetricRef`] always names a
//! declared metric and a [`ExprKind::CapRef`] a capture group that is in
//! scope. References that failed to resolve become [`ExprKind::Error`].

use std::fmt;

use tally_metrics::MetricKind;

use crate::Position;

/// A parsed program: the root of the tree.
#[derive(Clone, Debug, PartialEq)]
pub struct Program {
    /// Source name the program was parsed from.
    pub name: String,
    pub stmts: Vec<Stmt>,
    pub pos: Position,
}

impl Program {
    /// Total number of nodes in the tree, the root included.
    pub fn node_count(&self) -> usize {
        crate::visitor::count_nodes(self)
    }
}

/// A `{ ... }` statement list.
#[derive(Clone, Debug, PartialEq)]
pub struct Block {
    pub stmts: Vec<Stmt>,
    pub pos: Position,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub pos: Position,
}

impl Stmt {
    pub fn new(kind: StmtKind, pos: Position) -> Self {
        Stmt { kind, pos }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum StmtKind {
    /// `counter foo by a, b as "x"`
    Decl(MetricDecl),
    /// `const NAME /pattern/`
    Const { name: String, pattern: Pattern },
    /// `cond { ... } else { ... }`. `cond` is usually a pattern or match.
    Cond {
        cond: Expr,
        then_block: Block,
        else_block: Option<Block>,
    },
    /// `otherwise { ... }`: runs when no sibling condition matched.
    Otherwise(Block),
    /// `def name { ... }`: a decorator definition.
    Def { name: String, body: Block },
    /// `@name { ... }`: a decorated block.
    Deco { name: String, body: Block },
    /// `next`: where a decorated block is spliced into its decorator.
    Next,
    /// `stop`: stop processing the current line.
    Stop,
    /// `del foo[...]`: remove one dimension instance of a metric.
    Del(Expr),
    Expr(Expr),
    /// Placeholder for a statement that failed to parse.
    Error,
}

/// A metric declaration.
#[derive(Clone, Debug, PartialEq)]
pub struct MetricDecl {
    pub name: String,
    pub kind: MetricKind,
    pub keys: Vec<String>,
    pub hidden: bool,
    pub exported_name: Option<String>,
    pub buckets: Vec<f64>,
}

/// A regular expression, possibly concatenated from several fragments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pattern {
    /// The full pattern source after concatenation.
    pub source: String,
    /// Name of the pattern's entry in the program's `RegexTable`.
    pub regex: String,
    /// Capture group numbers (`"1"`, `"2"`, ...) followed by the names of
    /// named groups. Empty for `const` patterns, whose groups are declared
    /// where the constant is used.
    pub captures: Vec<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub pos: Position,
}

impl Expr {
    pub fn new(kind: ExprKind, pos: Position) -> Self {
        Expr { kind, pos }
    }

    pub fn error(pos: Position) -> Self {
        Expr {
            kind: ExprKind::Error,
            pos,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.kind, ExprKind::Error)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    Int(i64),
    Float(f64),
    Str(String),
    /// A pattern in condition position; matches against the whole line.
    Pattern(Pattern),
    MetricRef(String),
    /// `$1` or `$name`, without the `$`.
    CapRef(String),
    /// `metric[key, ...]`
    Index {
        target: Box<Expr>,
        args: Vec<Expr>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// `subject =~ /pattern/` or `subject !~ /pattern/`
    Match {
        negated: bool,
        subject: Box<Expr>,
        pattern: Pattern,
    },
    Postfix {
        op: PostfixOp,
        operand: Box<Expr>,
    },
    Assign {
        op: AssignOp,
        target: Box<Expr>,
        value: Box<Expr>,
    },
    Call {
        builtin: Builtin,
        args: Vec<Expr>,
    },
    /// Placeholder for an expression that failed to parse or resolve.
    Error,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum UnaryOp {
    Not,
    BitNot,
    Neg,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    Shl,
    Shr,
    BitAnd,
    BitOr,
    BitXor,
    Eq,
    NotEq,
    Lt,
    Gt,
    LtEq,
    GtEq,
    And,
    Or,
}

impl BinaryOp {
    pub const fn as_str(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Pow => "**",
            BinaryOp::Shl => "<<",
            BinaryOp::Shr => ">>",
            BinaryOp::BitAnd => "&",
            BinaryOp::BitOr => "|",
            BinaryOp::BitXor => "^",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Gt => ">",
            BinaryOp::LtEq => "<=",
            BinaryOp::GtEq => ">=",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum PostfixOp {
    Inc,
    Dec,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum AssignOp {
    /// `=`
    Set,
    /// `+=`
    Add,
}

/// Builtin functions callable from programs.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Builtin {
    GetFilename,
    Len,
    SetTime,
    Strptime,
    Strtol,
    Timestamp,
    ToLower,
}

impl Builtin {
    pub const ALL: [Builtin; 7] = [
        Builtin::GetFilename,
        Builtin::Len,
        Builtin::SetTime,
        Builtin::Strptime,
        Builtin::Strtol,
        Builtin::Timestamp,
        Builtin::ToLower,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Builtin::GetFilename => "getfilename",
            Builtin::Len => "len",
            Builtin::SetTime => "settime",
            Builtin::Strptime => "strptime",
            Builtin::Strtol => "strtol",
            Builtin::Timestamp => "timestamp",
            Builtin::ToLower => "tolower",
        }
    }

    pub fn from_name(name: &str) -> Option<Builtin> {
        Builtin::ALL.into_iter().find(|b| b.name() == name)
    }

    /// Number of arguments the builtin takes.
    pub const fn arity(self) -> usize {
        match self {
            Builtin::GetFilename | Builtin::Timestamp => 0,
            Builtin::Len | Builtin::SetTime | Builtin::ToLower => 1,
            Builtin::Strptime | Builtin::Strtol => 2,
        }
    }
}

impl fmt::Display for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
