// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Scope tree for name resolution.

use std::collections::HashMap;

use crate::symbol::SymbolId;

/// Unique identifier for a scope: its index in the tree's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(pub u32);

/// The kind of scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    /// Global scope (top-level declarations).
    Global,
    /// Function or procedure scope, holding parameters and the body.
    Callable,
    /// Block scope: a nested block or a control-flow body.
    Block,
}

/// A scope in the scope tree.
#[derive(Debug, Clone)]
pub struct Scope {
    pub id: ScopeId,
    pub name: String,
    pub kind: ScopeKind,
    pub parent: Option<ScopeId>,
    pub children: Vec<ScopeId>,
    pub bindings: HashMap<String, SymbolId>,
}

/// Tree of scopes for name lookup.
///
/// Scopes are never removed; popping only moves the cursor back to the
/// parent, so bindings stay visible for lookups after the walk.
#[derive(Debug, Clone)]
pub struct ScopeTree {
    scopes: Vec<Scope>,
    current: ScopeId,
}

pub const ROOT_SCOPE_NAME: &str = "global";

impl ScopeTree {
    /// Create a new scope tree with a global scope.
    pub fn new() -> Self {
        let global = Scope {
            id: ScopeId(0),
            name: ROOT_SCOPE_NAME.to_string(),
            kind: ScopeKind::Global,
            parent: None,
            children: Vec::new(),
            bindings: HashMap::new(),
        };
        Self {
            scopes: vec![global],
            current: ScopeId(0),
        }
    }

    pub fn root(&self) -> ScopeId {
        ScopeId(0)
    }

    /// Push a new child of the current scope and enter it.
    pub fn push(&mut self, name: String, kind: ScopeKind) -> ScopeId {
        let id = ScopeId(self.scopes.len() as u32);
        let parent = self.current;
        self.scopes.push(Scope {
            id,
            name,
            kind,
            parent: Some(parent),
            children: Vec::new(),
            bindings: HashMap::new(),
        });
        if let Some(scope) = self.scopes.get_mut(parent.0 as usize) {
            scope.children.push(id);
        }
        self.current = id;
        id
    }

    /// Pop the current scope and return to parent.
    pub fn pop(&mut self) {
        if let Some(parent) = self.get(self.current).and_then(|scope| scope.parent) {
            self.current = parent;
        }
    }

    /// Get the current scope ID.
    pub fn current(&self) -> ScopeId {
        self.current
    }

    /// Get a scope by ID.
    pub fn get(&self, id: ScopeId) -> Option<&Scope> {
        self.scopes.get(id.0 as usize)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Scope> {
        self.scopes.iter()
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Scope names from the root down to `id`.
    pub fn path(&self, id: ScopeId) -> Vec<&str> {
        let mut names = Vec::new();
        let mut scope_id = Some(id);
        while let Some(scope) = scope_id.and_then(|id| self.get(id)) {
            names.push(scope.name.as_str());
            scope_id = scope.parent;
        }
        names.reverse();
        names
    }

    /// Fully qualified form of `name` declared in scope `id`.
    pub fn qualify(&self, id: ScopeId, name: &str) -> String {
        let mut path = self.path(id);
        path.push(name);
        path.join("::")
    }

    /// Look up a name in the current scope chain.
    pub fn lookup(&self, name: &str) -> Option<&SymbolId> {
        self.lookup_from(self.current, name)
    }

    /// Look up a name starting at `id` and walking outward to the root.
    pub fn lookup_from(&self, id: ScopeId, name: &str) -> Option<&SymbolId> {
        let mut scope_id = Some(id);
        while let Some(scope) = scope_id.and_then(|id| self.get(id)) {
            if let Some(symbol) = scope.bindings.get(name) {
                return Some(symbol);
            }
            scope_id = scope.parent;
        }
        None
    }

    /// Bind a name in the current scope. An existing binding is kept and
    /// `false` is returned.
    pub fn define(&mut self, name: String, symbol: SymbolId) -> bool {
        let Some(scope) = self.scopes.get_mut(self.current.0 as usize) else {
            return false;
        };
        if scope.bindings.contains_key(&name) {
            return false;
        }
        scope.bindings.insert(name, symbol);
        true
    }
}

impl Default for ScopeTree {
    fn default() -> Self {
        Self::new()
    }
}
