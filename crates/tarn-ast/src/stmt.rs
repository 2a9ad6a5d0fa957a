//! Statement AST nodes.

use crate::expr::Leaf;
use crate::node::{Leaves, Node};
use crate::Span;

/// `{ statement* }`
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub statements: Vec<Node>,
    pub span: Span,
}

/// `let name;`
#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub name: Leaf,
    pub span: Span,
}

/// `let name = value;`
#[derive(Debug, Clone, PartialEq)]
pub struct VarInit {
    pub name: Leaf,
    pub value: Box<Node>,
    pub span: Span,
}

/// `name = value;`
#[derive(Debug, Clone, PartialEq)]
pub struct VarAssignment {
    pub name: Leaf,
    pub value: Box<Node>,
    pub span: Span,
}

/// `return value?;`. A bare `return;` holds a missing value.
#[derive(Debug, Clone, PartialEq)]
pub struct Return {
    pub value: Box<Node>,
    pub span: Span,
}

/// `if (condition) body alternative?`
///
/// `alternative` is an `ElseIf`, an `Else`, or missing.
#[derive(Debug, Clone, PartialEq)]
pub struct If {
    pub condition: Box<Node>,
    pub body: Block,
    pub alternative: Box<Node>,
    pub span: Span,
}

/// `else if (condition) body alternative?`
#[derive(Debug, Clone, PartialEq)]
pub struct ElseIf {
    pub condition: Box<Node>,
    pub body: Block,
    pub alternative: Box<Node>,
    pub span: Span,
}

/// `else body`
#[derive(Debug, Clone, PartialEq)]
pub struct Else {
    pub body: Block,
    pub span: Span,
}

/// `for (init?; test?; update?) body`. Absent clauses are missing nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct For {
    pub init: Box<Node>,
    pub test: Box<Node>,
    pub update: Box<Node>,
    pub body: Block,
    pub span: Span,
}

/// `while (condition) body`
#[derive(Debug, Clone, PartialEq)]
pub struct While {
    pub condition: Box<Node>,
    pub body: Block,
    pub span: Span,
}

/// `switch (subject) { case* }`
#[derive(Debug, Clone, PartialEq)]
pub struct Switch {
    pub subject: Box<Node>,
    pub cases: Vec<Case>,
    pub span: Span,
}

/// `case value body`
#[derive(Debug, Clone, PartialEq)]
pub struct Case {
    pub value: Box<Node>,
    pub body: Block,
    pub span: Span,
}

impl Leaves for Block {
    fn push_leaves<'a>(&'a self, out: &mut Vec<&'a Leaf>) {
        for statement in &self.statements {
            statement.push_leaves(out);
        }
    }
}

impl Leaves for VarDecl {
    fn push_leaves<'a>(&'a self, out: &mut Vec<&'a Leaf>) {
        out.push(&self.name);
    }
}

impl Leaves for VarInit {
    fn push_leaves<'a>(&'a self, out: &mut Vec<&'a Leaf>) {
        out.push(&self.name);
        self.value.push_leaves(out);
    }
}

impl Leaves for VarAssignment {
    fn push_leaves<'a>(&'a self, out: &mut Vec<&'a Leaf>) {
        out.push(&self.name);
        self.value.push_leaves(out);
    }
}

impl Leaves for Return {
    fn push_leaves<'a>(&'a self, out: &mut Vec<&'a Leaf>) {
        self.value.push_leaves(out);
    }
}

impl Leaves for If {
    fn push_leaves<'a>(&'a self, out: &mut Vec<&'a Leaf>) {
        self.condition.push_leaves(out);
        self.body.push_leaves(out);
        self.alternative.push_leaves(out);
    }
}

impl Leaves for ElseIf {
    fn push_leaves<'a>(&'a self, out: &mut Vec<&'a Leaf>) {
        self.condition.push_leaves(out);
        self.body.push_leaves(out);
        self.alternative.push_leaves(out);
    }
}

impl Leaves for Else {
    fn push_leaves<'a>(&'a self, out: &mut Vec<&'a Leaf>) {
        self.body.push_leaves(out);
    }
}

impl Leaves for For {
    fn push_leaves<'a>(&'a self, out: &mut Vec<&'a Leaf>) {
        self.init.push_leaves(out);
        self.test.push_leaves(out);
        self.update.push_leaves(out);
        self.body.push_leaves(out);
    }
}

impl Leaves for While {
    fn push_leaves<'a>(&'a self, out: &mut Vec<&'a Leaf>) {
        self.condition.push_leaves(out);
        self.body.push_leaves(out);
    }
}

impl Leaves for Switch {
    fn push_leaves<'a>(&'a self, out: &mut Vec<&'a Leaf>) {
        self.subject.push_leaves(out);
        for case in &self.cases {
            case.push_leaves(out);
        }
    }
}

impl Leaves for Case {
    fn push_leaves<'a>(&'a self, out: &mut Vec<&'a Leaf>) {
        self.value.push_leaves(out);
        self.body.push_leaves(out);
    }
}
