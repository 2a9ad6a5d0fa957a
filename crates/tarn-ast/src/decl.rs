// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Declaration AST nodes.

use crate::expr::Leaf;
use crate::node::{Leaves, Node};
use crate::stmt::Block;
use crate::Span;

/// A translation unit: the ordered global declarations.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub declarations: Vec<Node>,
    pub span: Span,
}

/// `fn signature body`
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    pub signature: Signature,
    pub body: Block,
    pub span: Span,
}

/// `proc signature body`
///
/// Procedures never produce a value.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcedureDef {
    pub signature: Signature,
    pub body: Block,
    pub span: Span,
}

/// `name(parameters)`
#[derive(Debug, Clone, PartialEq)]
pub struct Signature {
    pub name: Leaf,
    pub parameters: ParameterDef,
    pub span: Span,
}

/// Declared parameter names, including the parentheses.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterDef {
    pub names: Vec<Leaf>,
    pub span: Span,
}

impl Leaves for Program {
    fn push_leaves<'a>(&'a self, out: &mut Vec<&'a Leaf>) {
        for decl in &self.declarations {
            decl.push_leaves(out);
        }
    }
}

impl Leaves for FunctionDef {
    fn push_leaves<'a>(&'a self, out: &mut Vec<&'a Leaf>) {
        self.signature.push_leaves(out);
        self.body.push_leaves(out);
    }
}

impl Leaves for ProcedureDef {
    fn push_leaves<'a>(&'a self, out: &mut Vec<&'a Leaf>) {
        self.signature.push_leaves(out);
        self.body.push_leaves(out);
    }
}

impl Leaves for Signature {
    fn push_leaves<'a>(&'a self, out: &mut Vec<&'a Leaf>) {
        out.push(&self.name);
        self.parameters.push_leaves(out);
    }
}

impl Leaves for ParameterDef {
    fn push_leaves<'a>(&'a self, out: &mut Vec<&'a Leaf>) {
        out.extend(self.names.iter());
    }
}
