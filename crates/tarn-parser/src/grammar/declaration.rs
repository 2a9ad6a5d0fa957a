// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Declaration rules and the program root.

use tarn_ast::decl::{FunctionDef, ParameterDef, ProcedureDef, Program, Signature};
use tarn_ast::expr::Leaf;
use tarn_ast::stmt::{VarDecl, VarInit};
use tarn_ast::token::TokenKind;
use tarn_ast::Node;

use super::expression::expression;
use super::statement::block;
use crate::combinator::{
    all, any, many_until, named, optional, separated, spanned, surrounded, token, ParseResult,
    Parser, TokenView,
};

/// `global* EOF`
pub fn program(input: TokenView<'_>) -> ParseResult<'_, Program> {
    spanned(many_until(global, token(TokenKind::Eof)))
        .map(|((declarations, _), span)| Program { declarations, span })
        .parse(input)
}

fn global(input: TokenView<'_>) -> ParseResult<'_, Node> {
    named(any((function, procedure, var_init, var_decl)), "a declaration").parse(input)
}

pub fn function(input: TokenView<'_>) -> ParseResult<'_, Node> {
    spanned(all((token(TokenKind::Fn), signature, block)))
        .map(|((_, signature, body), span)| Node::FunctionDef(FunctionDef { signature, body, span }))
        .parse(input)
}

pub fn procedure(input: TokenView<'_>) -> ParseResult<'_, Node> {
    spanned(all((token(TokenKind::Proc), signature, block)))
        .map(|((_, signature, body), span)| Node::ProcedureDef(ProcedureDef { signature, body, span }))
        .parse(input)
}

fn signature(input: TokenView<'_>) -> ParseResult<'_, Signature> {
    spanned(all((token(TokenKind::Ident), parameter_def)))
        .map(|((name, parameters), span)| Signature {
            name: Leaf::from(name),
            parameters,
            span,
        })
        .parse(input)
}

fn parameter_def(input: TokenView<'_>) -> ParseResult<'_, ParameterDef> {
    let name = token(TokenKind::Ident).map(|t| Leaf::from(t));
    spanned(surrounded(
        token(TokenKind::LParen),
        token(TokenKind::RParen),
        optional(separated(token(TokenKind::Comma), name)),
    ))
    .map(|((_, names, _), span)| ParameterDef { names, span })
    .parse(input)
}

/// `let name;`
pub fn var_decl(input: TokenView<'_>) -> ParseResult<'_, Node> {
    spanned(all((token(TokenKind::Let), token(TokenKind::Ident), token(TokenKind::Semi))))
        .map(|((_, name, _), span)| {
            Node::VarDecl(VarDecl {
                name: Leaf::from(name),
                span,
            })
        })
        .parse(input)
}

/// `let name = value;`
pub fn var_init(input: TokenView<'_>) -> ParseResult<'_, Node> {
    spanned(all((
        token(TokenKind::Let),
        token(TokenKind::Ident),
        token(TokenKind::Eq),
        expression,
        token(TokenKind::Semi),
    )))
    .map(|((_, name, _, value, _), span)| {
        Node::VarInit(VarInit {
            name: Leaf::from(name),
            value: Box::new(value),
            span,
        })
    })
    .parse(input)
}
