// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Name resolution for the Tarn language.
//!
//! This crate walks a parsed program, builds the scope tree and symbol
//! table, and collects semantic errors.

mod error;
mod resolver;
mod scope;
mod symbol;

pub use error::SemanticError;
pub use resolver::Resolver;
pub use scope::{Scope, ScopeId, ScopeKind, ScopeTree, ROOT_SCOPE_NAME};
pub use symbol::{Declaration, Symbol, SymbolId, SymbolKind, SymbolTable};

use tarn_ast::decl::Program;

/// The result of name resolution.
///
/// Borrows the tree it was resolved from: symbols and errors point back
/// into it.
#[derive(Debug, Clone)]
pub struct Resolution<'ast> {
    pub scopes: ScopeTree,
    pub symbols: SymbolTable<'ast>,
    /// Walk-order errors, then uses with no earlier definition, then a
    /// missing `main`.
    pub errors: Vec<SemanticError<'ast>>,
}

impl Resolution<'_> {
    /// Returns true if no semantic errors were found.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Resolve all names in a program.
pub fn resolve(program: &Program) -> Resolution<'_> {
    Resolver::resolve(program)
}
