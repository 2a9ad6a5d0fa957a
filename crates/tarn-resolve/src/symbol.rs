//! Symbol definitions and symbol table.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use tarn_ast::expr::Leaf;
use tarn_ast::{Node, Span};

use crate::scope::ScopeId;

/// Identifier of a symbol: its local name and owning scope.
///
/// Equality and hashing use only the fully qualified name.
#[derive(Debug, Clone)]
pub struct SymbolId {
    name: String,
    scope: ScopeId,
    qualified: String,
}

impl SymbolId {
    pub fn new(name: impl Into<String>, scope: ScopeId, qualified: String) -> Self {
        Self {
            name: name.into(),
            scope,
            qualified,
        }
    }

    /// The local name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn scope(&self) -> ScopeId {
        self.scope
    }

    /// Every enclosing scope name and the local name, joined with `::`.
    pub fn qualified(&self) -> &str {
        &self.qualified
    }
}

impl PartialEq for SymbolId {
    fn eq(&self, other: &Self) -> bool {
        self.qualified == other.qualified
    }
}

impl Eq for SymbolId {}

impl Hash for SymbolId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.qualified.hash(state);
    }
}

impl Borrow<str> for SymbolId {
    fn borrow(&self) -> &str {
        &self.qualified
    }
}

impl fmt::Display for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.qualified)
    }
}

/// The kind of symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Procedure,
    Function,
    /// `fn main` declared directly in the global scope.
    MainFunction,
    /// A variable or parameter.
    Variable,
}

impl SymbolKind {
    pub fn is_callable(self) -> bool {
        !matches!(self, SymbolKind::Variable)
    }

    pub fn describe(self) -> &'static str {
        match self {
            SymbolKind::Procedure => "procedure",
            SymbolKind::Function => "function",
            SymbolKind::MainFunction => "main function",
            SymbolKind::Variable => "variable",
        }
    }
}

/// The AST node a symbol was declared by.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Declaration<'ast> {
    /// A var-decl, var-init, function-def or procedure-def.
    Node(&'ast Node),
    /// A parameter name in a signature.
    Parameter(&'ast Leaf),
}

/// A declared symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol<'ast> {
    pub id: SymbolId,
    pub kind: SymbolKind,
    pub scope: ScopeId,
    /// Where the name was declared.
    pub span: Span,
    pub name: &'ast Leaf,
    pub declaration: Declaration<'ast>,
}

/// Table of all symbols in a program, keyed by fully qualified name.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable<'ast> {
    symbols: HashMap<SymbolId, Symbol<'ast>>,
}

impl<'ast> SymbolTable<'ast> {
    pub fn new() -> Self {
        Self {
            symbols: HashMap::new(),
        }
    }

    /// Insert a new symbol. If the identifier is taken, the table is left
    /// unchanged and the existing entry is returned.
    pub fn insert(&mut self, symbol: Symbol<'ast>) -> Result<(), &Symbol<'ast>> {
        if self.symbols.contains_key(symbol.id.qualified()) {
            return Err(&self.symbols[symbol.id.qualified()]);
        }
        self.symbols.insert(symbol.id.clone(), symbol);
        Ok(())
    }

    /// Get a symbol by fully qualified name.
    pub fn get(&self, qualified: &str) -> Option<&Symbol<'ast>> {
        self.symbols.get(qualified)
    }

    /// Iterate over all symbols, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Symbol<'ast>> {
        self.symbols.values()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
