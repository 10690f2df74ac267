//! Lexically scoped symbol table.
//!
//! Scopes live in an arena owned by the table. Each scope points at its
//! parent by index, and the open scopes form a stack whose top is the
//! current scope. The root scope is created with the table and is never
//! closed.
//!
//! Capture groups share the table with other names but are stored with
//! their `$` sigil (`$1`, `$host`), so a capture group never collides with
//! a metric of the same name.

use std::fmt;

use rustc_hash::FxHashMap;
use tally_ir::Position;
use tally_metrics::MetricHandle;
use tracing::error;

/// Index of a scope in the table's arena.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct ScopeId(u32);

impl ScopeId {
    pub const ROOT: ScopeId = ScopeId(0);

    fn index(self) -> usize {
        self.0 as usize
    }
}

/// What a name refers to.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum SymbolKind {
    Metric,
    /// A named pattern bound with `const`.
    Constant,
    /// A regex capture group in scope, named with its `$` sigil.
    CaptureGroup,
    /// A `def` block.
    Decorator,
}

impl SymbolKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            SymbolKind::Metric => "metric",
            SymbolKind::Constant => "constant",
            SymbolKind::CaptureGroup => "capture group",
            SymbolKind::Decorator => "decorator",
        }
    }
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    pub declared_at: Position,
    /// Registry entry, for metric symbols whose registration succeeded.
    pub metric: Option<MetricHandle>,
    /// Pattern source, for `const` symbols.
    pub pattern: Option<String>,
}

/// A name declared twice in one scope.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DuplicateSymbol {
    pub name: String,
    pub previous: Position,
}

impl fmt::Display for DuplicateSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "duplicate declaration of '{}' (previously declared at {})",
            self.name, self.previous
        )
    }
}

#[derive(Debug)]
struct Scope {
    parent: Option<ScopeId>,
    symbols: FxHashMap<String, Symbol>,
}

#[derive(Debug)]
pub struct SymbolTable {
    scopes: Vec<Scope>,
    open: Vec<ScopeId>,
}

impl SymbolTable {
    /// A table holding only the root scope.
    pub fn new() -> Self {
        SymbolTable {
            scopes: vec![Scope {
                parent: None,
                symbols: FxHashMap::default(),
            }],
            open: vec![ScopeId::ROOT],
        }
    }

    /// Open a child of the current scope and make it current.
    pub fn scope_start(&mut self) -> ScopeId {
        let id = ScopeId(u32::try_from(self.scopes.len()).unwrap_or(u32::MAX));
        self.scopes.push(Scope {
            parent: Some(self.current_scope()),
            symbols: FxHashMap::default(),
        });
        self.open.push(id);
        id
    }

    /// Close the current scope. The root scope cannot be closed.
    pub fn scope_end(&mut self) {
        if self.open.len() == 1 {
            debug_assert!(false, "attempted to close the root scope");
            error!("attempted to close the root scope");
            return;
        }
        self.open.pop();
    }

    pub fn current_scope(&self) -> ScopeId {
        self.open.last().copied().unwrap_or(ScopeId::ROOT)
    }

    /// Number of open scopes above the root.
    pub fn depth(&self) -> usize {
        self.open.len() - 1
    }

    /// Total number of scopes ever opened, the root included.
    pub fn scope_count(&self) -> usize {
        self.scopes.len()
    }

    /// Declare `name` in the current scope.
    ///
    /// Fails only if the current scope already has `name`; shadowing a name
    /// from an enclosing scope is allowed.
    pub fn declare(
        &mut self,
        name: &str,
        kind: SymbolKind,
        declared_at: Position,
    ) -> Result<&mut Symbol, DuplicateSymbol> {
        let scope = self.current_scope().index();
        let symbols = &mut self.scopes[scope].symbols;
        if let Some(previous) = symbols.get(name) {
            return Err(DuplicateSymbol {
                name: name.to_owned(),
                previous: previous.declared_at.clone(),
            });
        }
        Ok(symbols.entry(name.to_owned()).or_insert(Symbol {
            name: name.to_owned(),
            kind,
            declared_at,
            metric: None,
            pattern: None,
        }))
    }

    /// Declare `name` in the current scope, replacing any existing binding
    /// there.
    pub fn rebind(&mut self, name: &str, kind: SymbolKind, declared_at: Position) {
        let scope = self.current_scope().index();
        self.scopes[scope].symbols.insert(
            name.to_owned(),
            Symbol {
                name: name.to_owned(),
                kind,
                declared_at,
                metric: None,
                pattern: None,
            },
        );
    }

    /// Find `name`, searching from the current scope out to the root.
    pub fn resolve(&self, name: &str) -> Option<&Symbol> {
        let mut scope = Some(self.current_scope());
        while let Some(id) = scope {
            let current = &self.scopes[id.index()];
            if let Some(symbol) = current.symbols.get(name) {
                return Some(symbol);
            }
            scope = current.parent;
        }
        None
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}
