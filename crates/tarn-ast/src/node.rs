// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! The node sum type and its checked accessors.

use crate::decl::{FunctionDef, ProcedureDef};
use crate::error::{AstError, ParseFailure};
use crate::expr::{BinaryOp, Call, Leaf, UnaryOp};
use crate::stmt::{Block, Else, ElseIf, For, If, Return, Switch, VarAssignment, VarDecl, VarInit, While};
use crate::Span;

/// A node in a declaration, statement, expression or optional position.
///
/// Shapes whose position is fixed by the grammar (signatures, parameter
/// lists, cases) are embedded directly in their parent instead.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    FunctionDef(FunctionDef),
    ProcedureDef(ProcedureDef),
    VarDecl(VarDecl),
    VarInit(VarInit),
    VarAssignment(VarAssignment),
    Call(Call),
    Block(Block),
    Return(Return),
    If(If),
    ElseIf(ElseIf),
    Else(Else),
    For(For),
    While(While),
    Switch(Switch),
    BinaryOp(BinaryOp),
    UnaryOp(UnaryOp),
    Leaf(Leaf),
    /// An optional element that was legitimately absent.
    Missing(Missing),
}

/// The missing-optional sentinel.
///
/// Keeps the failure that made the optional parser decline. It has no span.
#[derive(Debug, Clone, PartialEq)]
pub struct Missing {
    pub failure: ParseFailure,
}

impl Node {
    /// Short lowercase name of the shape, for messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::FunctionDef(_) => "function definition",
            Node::ProcedureDef(_) => "procedure definition",
            Node::VarDecl(_) => "variable declaration",
            Node::VarInit(_) => "variable initialization",
            Node::VarAssignment(_) => "assignment",
            Node::Call(_) => "call",
            Node::Block(_) => "block",
            Node::Return(_) => "return statement",
            Node::If(_) => "if statement",
            Node::ElseIf(_) => "else-if clause",
            Node::Else(_) => "else clause",
            Node::For(_) => "for loop",
            Node::While(_) => "while loop",
            Node::Switch(_) => "switch statement",
            Node::BinaryOp(_) => "binary operation",
            Node::UnaryOp(_) => "unary operation",
            Node::Leaf(_) => "leaf",
            Node::Missing(_) => "missing",
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Node::Missing(_))
    }

    /// The failure recorded by a missing node.
    pub fn missing_failure(&self) -> Option<&ParseFailure> {
        match self {
            Node::Missing(missing) => Some(&missing.failure),
            _ => None,
        }
    }

    /// Source span of the node. Fails on a missing node.
    pub fn span(&self) -> Result<Span, AstError> {
        Ok(match self {
            Node::FunctionDef(n) => n.span,
            Node::ProcedureDef(n) => n.span,
            Node::VarDecl(n) => n.span,
            Node::VarInit(n) => n.span,
            Node::VarAssignment(n) => n.span,
            Node::Call(n) => n.span,
            Node::Block(n) => n.span,
            Node::Return(n) => n.span,
            Node::If(n) => n.span,
            Node::ElseIf(n) => n.span,
            Node::Else(n) => n.span,
            Node::For(n) => n.span,
            Node::While(n) => n.span,
            Node::Switch(n) => n.span,
            Node::BinaryOp(n) => n.span,
            Node::UnaryOp(n) => n.span,
            Node::Leaf(n) => n.span,
            Node::Missing(missing) => return Err(missing.absent("a span")),
        })
    }

    /// Name leaf of a declaration-shaped node.
    pub fn declared_name(&self) -> Result<&Leaf, AstError> {
        match self {
            Node::VarDecl(n) => Ok(&n.name),
            Node::VarInit(n) => Ok(&n.name),
            Node::FunctionDef(n) => Ok(&n.signature.name),
            Node::ProcedureDef(n) => Ok(&n.signature.name),
            Node::Missing(missing) => Err(missing.absent("a declared symbol name")),
            other => Err(AstError::WrongShape {
                expected: "a declaration",
                found: other.kind_name(),
            }),
        }
    }

    /// The node as a leaf.
    pub fn leaf(&self) -> Result<&Leaf, AstError> {
        match self {
            Node::Leaf(leaf) => Ok(leaf),
            Node::Missing(missing) => Err(missing.absent("a leaf")),
            other => Err(AstError::WrongShape {
                expected: "a leaf",
                found: other.kind_name(),
            }),
        }
    }
}

impl Missing {
    fn absent(&self, expected: &'static str) -> AstError {
        AstError::Missing {
            expected,
            failure: self.failure.clone(),
        }
    }
}

/// Depth-first collection of the leaves below a node, in source order.
pub trait Leaves {
    fn push_leaves<'a>(&'a self, out: &mut Vec<&'a Leaf>);

    fn leaves(&self) -> Vec<&Leaf> {
        let mut out = Vec::new();
        self.push_leaves(&mut out);
        out
    }
}

impl Leaves for Node {
    fn push_leaves<'a>(&'a self, out: &mut Vec<&'a Leaf>) {
        match self {
            Node::FunctionDef(n) => n.push_leaves(out),
            Node::ProcedureDef(n) => n.push_leaves(out),
            Node::VarDecl(n) => n.push_leaves(out),
            Node::VarInit(n) => n.push_leaves(out),
            Node::VarAssignment(n) => n.push_leaves(out),
            Node::Call(n) => n.push_leaves(out),
            Node::Block(n) => n.push_leaves(out),
            Node::Return(n) => n.push_leaves(out),
            Node::If(n) => n.push_leaves(out),
            Node::ElseIf(n) => n.push_leaves(out),
            Node::Else(n) => n.push_leaves(out),
            Node::For(n) => n.push_leaves(out),
            Node::While(n) => n.push_leaves(out),
            Node::Switch(n) => n.push_leaves(out),
            Node::BinaryOp(n) => n.push_leaves(out),
            Node::UnaryOp(n) => n.push_leaves(out),
            Node::Leaf(n) => n.push_leaves(out),
            Node::Missing(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::{Token, TokenKind};

    fn missing() -> Node {
        let eof = Token::new(TokenKind::Eof, "", Span::point(1, 5));
        Node::Missing(Missing {
            failure: ParseFailure::new("an expression", eof, 2),
        })
    }

    fn leaf(kind: TokenKind, text: &str, col: u32) -> Leaf {
        Leaf {
            kind,
            text: text.to_string(),
            span: Span::new(1, col, 1, col + text.len() as u32),
        }
    }

    #[test]
    fn missing_span_is_an_error() {
        let err = missing().span().unwrap_err();
        match err {
            AstError::Missing { expected, failure } => {
                assert_eq!(expected, "a span");
                assert_eq!(failure.construct, "an expression");
            }
            other => panic!("expected Missing, got {:?}", other),
        }
    }

    #[test]
    fn missing_declared_name_is_an_error() {
        let err = missing().declared_name().unwrap_err();
        assert!(err.to_string().contains("a declared symbol name"), "got: {}", err);
    }

    #[test]
    fn declared_name_rejects_uses() {
        let node = Node::Leaf(leaf(TokenKind::Ident, "x", 1));
        assert_eq!(
            node.declared_name(),
            Err(AstError::WrongShape { expected: "a declaration", found: "leaf" })
        );
    }

    #[test]
    fn leaves_follow_source_order() {
        // 1 + x
        let node = Node::BinaryOp(BinaryOp {
            left: Box::new(Node::Leaf(leaf(TokenKind::Int, "1", 1))),
            operator: leaf(TokenKind::Plus, "+", 3),
            right: Box::new(Node::Leaf(leaf(TokenKind::Ident, "x", 5))),
            span: Span::new(1, 1, 1, 6),
        });
        let texts: Vec<&str> = node.leaves().iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["1", "+", "x"]);
    }

    #[test]
    fn missing_has_no_leaves() {
        assert!(missing().leaves().is_empty());
    }
}
