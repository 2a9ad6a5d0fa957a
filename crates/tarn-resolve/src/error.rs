// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Semantic error types.

use tarn_ast::expr::{Call, Leaf};
use tarn_ast::stmt::VarAssignment;
use thiserror::Error;

use crate::symbol::Symbol;

/// A rule violation found after a successful parse.
///
/// Every kind except [`SemanticError::MissingMain`] points at the
/// offending nodes of the tree it was resolved from.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SemanticError<'ast> {
    #[error("`{}` is a variable and cannot be called", .call.name.text)]
    CallToVariable {
        call: &'ast Call,
        target: Symbol<'ast>,
    },

    #[error("cannot assign to {} `{}`", .target.kind.describe(), .assignment.name.text)]
    AssignmentToCallable {
        assignment: &'ast VarAssignment,
        target: Symbol<'ast>,
    },

    #[error("procedure `{}` does not produce a value", .usage.text)]
    ProcedureAsValue {
        usage: &'ast Leaf,
        target: Symbol<'ast>,
    },

    #[error("`{}` is already defined in this scope (previously defined at {})", .name.text, .previous.span)]
    Redefinition {
        name: &'ast Leaf,
        previous: Symbol<'ast>,
    },

    #[error("no `main` function defined at the top level")]
    MissingMain,

    #[error("{}", use_before_definition(.usage, .definition.as_ref()))]
    UseBeforeDefinition {
        usage: &'ast Leaf,
        definition: Option<Symbol<'ast>>,
    },
}

fn use_before_definition(usage: &Leaf, definition: Option<&Symbol<'_>>) -> String {
    match definition {
        Some(symbol) => format!("`{}` is used before its definition at {}", usage.text, symbol.span),
        None => format!("undefined symbol: `{}`", usage.text),
    }
}

impl<'ast> SemanticError<'ast> {
    pub fn kind_name(&self) -> &'static str {
        match self {
            SemanticError::CallToVariable { .. } => "call-to-variable",
            SemanticError::AssignmentToCallable { .. } => "assignment-to-callable",
            SemanticError::ProcedureAsValue { .. } => "procedure-as-value",
            SemanticError::Redefinition { .. } => "redefinition",
            SemanticError::MissingMain => "missing-main",
            SemanticError::UseBeforeDefinition { .. } => "use-before-definition",
        }
    }
}
