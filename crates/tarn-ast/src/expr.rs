// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Expression AST nodes.

use crate::node::{Leaves, Node};
use crate::token::{Token, TokenKind};
use crate::Span;

/// A single token kept in the tree: a name, a literal or an operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaf {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
}

impl From<&Token> for Leaf {
    fn from(token: &Token) -> Self {
        Self {
            kind: token.kind,
            text: token.text.clone(),
            span: token.span,
        }
    }
}

impl Leaf {
    pub fn is_ident(&self) -> bool {
        self.kind == TokenKind::Ident
    }
}

/// Binary operation
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryOp {
    pub left: Box<Node>,
    pub operator: Leaf,
    pub right: Box<Node>,
    pub span: Span,
}

/// Unary prefix operation (`-x`, `not x`)
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryOp {
    pub operator: Leaf,
    pub operand: Box<Node>,
    pub span: Span,
}

/// Call of a named function or procedure.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub name: Leaf,
    pub arguments: ParameterPass,
    pub span: Span,
}

/// Parenthesized argument list of a call, including the parentheses.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterPass {
    pub arguments: Vec<Node>,
    pub span: Span,
}

impl Leaves for Leaf {
    fn push_leaves<'a>(&'a self, out: &mut Vec<&'a Leaf>) {
        out.push(self);
    }
}

impl Leaves for BinaryOp {
    fn push_leaves<'a>(&'a self, out: &mut Vec<&'a Leaf>) {
        self.left.push_leaves(out);
        out.push(&self.operator);
        self.right.push_leaves(out);
    }
}

impl Leaves for UnaryOp {
    fn push_leaves<'a>(&'a self, out: &mut Vec<&'a Leaf>) {
        out.push(&self.operator);
        self.operand.push_leaves(out);
    }
}

impl Leaves for Call {
    fn push_leaves<'a>(&'a self, out: &mut Vec<&'a Leaf>) {
        out.push(&self.name);
        self.arguments.push_leaves(out);
    }
}

impl Leaves for ParameterPass {
    fn push_leaves<'a>(&'a self, out: &mut Vec<&'a Leaf>) {
        for argument in &self.arguments {
            argument.push_leaves(out);
        }
    }
}
