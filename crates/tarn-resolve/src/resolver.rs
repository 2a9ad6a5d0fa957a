// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! The name resolver implementation.

use tarn_ast::decl::{Program, Signature};
use tarn_ast::expr::{Call, Leaf};
use tarn_ast::stmt::{Block, VarAssignment};
use tarn_ast::{Node, Span};

use crate::error::SemanticError;
use crate::scope::{ScopeId, ScopeKind, ScopeTree};
use crate::symbol::{Declaration, Symbol, SymbolId, SymbolKind, SymbolTable};
use crate::Resolution;

/// A use that found no declaration during the walk.
struct Deferred<'ast> {
    usage: &'ast Leaf,
    scope: ScopeId,
}

pub struct Resolver<'ast> {
    scopes: ScopeTree,
    symbols: SymbolTable<'ast>,
    errors: Vec<SemanticError<'ast>>,
    deferred: Vec<Deferred<'ast>>,
}

impl<'ast> Resolver<'ast> {
    pub fn new() -> Self {
        Self {
            scopes: ScopeTree::new(),
            symbols: SymbolTable::new(),
            errors: Vec::new(),
            deferred: Vec::new(),
        }
    }

    /// Resolve a whole program in one pass.
    pub fn resolve(program: &'ast Program) -> Resolution<'ast> {
        let mut resolver = Self::new();
        for declaration in &program.declarations {
            resolver.statement(declaration);
        }
        resolver.finish()
    }

    fn finish(mut self) -> Resolution<'ast> {
        for deferred in std::mem::take(&mut self.deferred) {
            let definition = self
                .scopes
                .lookup_from(deferred.scope, &deferred.usage.text)
                .and_then(|id| self.symbols.get(id.qualified()))
                .cloned();
            self.errors.push(SemanticError::UseBeforeDefinition {
                usage: deferred.usage,
                definition,
            });
        }

        let root = self.scopes.root();
        let has_main = self
            .symbols
            .get(&self.scopes.qualify(root, "main"))
            .is_some_and(|symbol| symbol.kind == SymbolKind::MainFunction);
        if !has_main {
            self.errors.push(SemanticError::MissingMain);
        }

        Resolution {
            scopes: self.scopes,
            symbols: self.symbols,
            errors: self.errors,
        }
    }

    // =========================================================================
    // Statements
    // =========================================================================

    fn statement(&mut self, node: &'ast Node) {
        match node {
            Node::FunctionDef(function) => {
                let kind = if function.signature.name.text == "main"
                    && self.scopes.current() == self.scopes.root()
                {
                    SymbolKind::MainFunction
                } else {
                    SymbolKind::Function
                };
                self.callable(node, &function.signature, &function.body, kind);
            }
            Node::ProcedureDef(procedure) => {
                self.callable(node, &procedure.signature, &procedure.body, SymbolKind::Procedure);
            }
            Node::VarDecl(decl) => {
                self.declare(&decl.name, SymbolKind::Variable, Declaration::Node(node));
            }
            Node::VarInit(init) => {
                self.value(&init.value);
                self.declare(&init.name, SymbolKind::Variable, Declaration::Node(node));
            }
            Node::VarAssignment(assignment) => self.assignment(assignment),
            Node::Call(call) => self.call(call, false),
            Node::Block(block) => self.scoped_block("block", block.span, block),
            Node::Return(ret) => self.value(&ret.value),
            Node::If(stmt) => {
                self.value(&stmt.condition);
                self.scoped_block("if", stmt.span, &stmt.body);
                self.statement(&stmt.alternative);
            }
            Node::ElseIf(stmt) => {
                self.value(&stmt.condition);
                self.scoped_block("elseif", stmt.span, &stmt.body);
                self.statement(&stmt.alternative);
            }
            Node::Else(stmt) => self.scoped_block("else", stmt.span, &stmt.body),
            Node::For(stmt) => {
                // The init declaration lives in the loop's scope with the body.
                self.enter_block("for", stmt.span);
                self.statement(&stmt.init);
                self.value(&stmt.test);
                self.statement(&stmt.update);
                self.block_statements(&stmt.body);
                self.scopes.pop();
            }
            Node::While(stmt) => {
                self.value(&stmt.condition);
                self.scoped_block("while", stmt.span, &stmt.body);
            }
            Node::Switch(stmt) => {
                self.value(&stmt.subject);
                for case in &stmt.cases {
                    self.value(&case.value);
                    self.scoped_block("case", case.span, &case.body);
                }
            }
            Node::BinaryOp(_) | Node::UnaryOp(_) | Node::Leaf(_) => self.value(node),
            Node::Missing(_) => {}
        }
    }

    fn callable(&mut self, node: &'ast Node, signature: &'ast Signature, body: &'ast Block, kind: SymbolKind) {
        // Declared before the body is walked so recursive calls resolve.
        let name = &signature.name;
        let scope_name = if self.declare(name, kind, Declaration::Node(node)) {
            name.text.clone()
        } else {
            format!("{}@{}", name.text, name.span)
        };

        self.scopes.push(scope_name, ScopeKind::Callable);
        for parameter in &signature.parameters.names {
            self.declare(parameter, SymbolKind::Variable, Declaration::Parameter(parameter));
        }
        self.block_statements(body);
        self.scopes.pop();
    }

    fn enter_block(&mut self, construct: &str, span: Span) {
        self.scopes.push(format!("{}@{}", construct, span), ScopeKind::Block);
    }

    fn scoped_block(&mut self, construct: &str, span: Span, block: &'ast Block) {
        self.enter_block(construct, span);
        self.block_statements(block);
        self.scopes.pop();
    }

    fn block_statements(&mut self, block: &'ast Block) {
        for statement in &block.statements {
            self.statement(statement);
        }
    }

    /// Insert a symbol for `name` in the current scope. Returns false and
    /// reports a redefinition if the qualified name is already taken.
    fn declare(&mut self, name: &'ast Leaf, kind: SymbolKind, declaration: Declaration<'ast>) -> bool {
        let scope = self.scopes.current();
        let id = SymbolId::new(name.text.as_str(), scope, self.scopes.qualify(scope, &name.text));
        let symbol = Symbol {
            id: id.clone(),
            kind,
            scope,
            span: name.span,
            name,
            declaration,
        };

        match self.symbols.insert(symbol) {
            Ok(()) => {
                self.scopes.define(name.text.clone(), id);
                true
            }
            Err(previous) => {
                let previous = previous.clone();
                self.errors.push(SemanticError::Redefinition { name, previous });
                false
            }
        }
    }

    // =========================================================================
    // Uses
    // =========================================================================

    fn lookup(&self, name: &Leaf) -> Option<Symbol<'ast>> {
        let id = self.scopes.lookup(&name.text)?;
        self.symbols.get(id.qualified()).cloned()
    }

    fn defer(&mut self, usage: &'ast Leaf) {
        self.deferred.push(Deferred {
            usage,
            scope: self.scopes.current(),
        });
    }

    /// Resolve an expression in a position where a value is expected.
    fn value(&mut self, node: &'ast Node) {
        match node {
            Node::Leaf(leaf) if leaf.is_ident() => match self.lookup(leaf) {
                None => self.defer(leaf),
                Some(target) if target.kind == SymbolKind::Procedure => {
                    self.errors.push(SemanticError::ProcedureAsValue { usage: leaf, target });
                }
                Some(_) => {}
            },
            Node::Call(call) => self.call(call, true),
            Node::BinaryOp(op) => {
                self.value(&op.left);
                self.value(&op.right);
            }
            Node::UnaryOp(op) => self.value(&op.operand),
            _ => {}
        }
    }

    fn call(&mut self, call: &'ast Call, as_value: bool) {
        match self.lookup(&call.name) {
            None => self.defer(&call.name),
            Some(target) if target.kind == SymbolKind::Variable => {
                self.errors.push(SemanticError::CallToVariable { call, target });
            }
            Some(target) if as_value && target.kind == SymbolKind::Procedure => {
                self.errors.push(SemanticError::ProcedureAsValue {
                    usage: &call.name,
                    target,
                });
            }
            Some(_) => {}
        }
        for argument in &call.arguments.arguments {
            self.value(argument);
        }
    }

    fn assignment(&mut self, assignment: &'ast VarAssignment) {
        match self.lookup(&assignment.name) {
            None => self.defer(&assignment.name),
            Some(target) if target.kind.is_callable() => {
                self.errors.push(SemanticError::AssignmentToCallable { assignment, target });
            }
            Some(_) => {}
        }
        self.value(&assignment.value);
    }
}

impl Default for Resolver<'_> {
    fn default() -> Self {
        Self::new()
    }
}
