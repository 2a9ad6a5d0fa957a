// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Expression rules, from loosest to tightest binding.

use tarn_ast::expr::{BinaryOp, Call, Leaf, ParameterPass, UnaryOp};
use tarn_ast::token::{Token, TokenKind};
use tarn_ast::{Node, Span};

use crate::combinator::{
    all, any, many, named, optional, separated, spanned, surrounded, token, ParseResult, Parser,
    TokenView,
};

pub fn expression(input: TokenView<'_>) -> ParseResult<'_, Node> {
    named(or_expr, "an expression").parse(input)
}

fn or_expr(input: TokenView<'_>) -> ParseResult<'_, Node> {
    left_assoc(input, and_expr, token(TokenKind::Or))
}

fn and_expr(input: TokenView<'_>) -> ParseResult<'_, Node> {
    left_assoc(input, comparison, token(TokenKind::And))
}

fn comparison(input: TokenView<'_>) -> ParseResult<'_, Node> {
    let operator = any([
        token(TokenKind::EqEq),
        token(TokenKind::BangEq),
        token(TokenKind::LtEq),
        token(TokenKind::GtEq),
        token(TokenKind::Lt),
        token(TokenKind::Gt),
    ]);
    left_assoc(input, additive, operator)
}

fn additive(input: TokenView<'_>) -> ParseResult<'_, Node> {
    let operator = any([token(TokenKind::Plus), token(TokenKind::Minus)]);
    left_assoc(input, multiplicative, operator)
}

fn multiplicative(input: TokenView<'_>) -> ParseResult<'_, Node> {
    let operator = any([
        token(TokenKind::Star),
        token(TokenKind::Slash),
        token(TokenKind::Percent),
    ]);
    left_assoc(input, unary, operator)
}

/// `operand (operator operand)*`, folded to the left.
fn left_assoc<'t, O>(
    input: TokenView<'t>,
    operand: fn(TokenView<'t>) -> ParseResult<'t, Node>,
    operator: O,
) -> ParseResult<'t, Node>
where
    O: Parser<'t, Output = &'t Token>,
{
    all((spanned(operand), many(all((operator, spanned(operand))))))
        .map(|(first, rest)| fold(first, rest))
        .parse(input)
}

fn fold(first: (Node, Span), rest: Vec<(&Token, (Node, Span))>) -> Node {
    let (mut node, mut span) = first;
    for (operator, (right, right_span)) in rest {
        span = span.to(right_span);
        node = Node::BinaryOp(BinaryOp {
            left: Box::new(node),
            operator: Leaf::from(operator),
            right: Box::new(right),
            span,
        });
    }
    node
}

fn unary(input: TokenView<'_>) -> ParseResult<'_, Node> {
    let prefixed = spanned(all((any([token(TokenKind::Minus), token(TokenKind::Not)]), unary)))
        .map(|((operator, operand), span)| {
            Node::UnaryOp(UnaryOp {
                operator: Leaf::from(operator),
                operand: Box::new(operand),
                span,
            })
        });
    any((prefixed, primary)).parse(input)
}

fn primary(input: TokenView<'_>) -> ParseResult<'_, Node> {
    let literal = any([
        token(TokenKind::Int),
        token(TokenKind::Str),
        token(TokenKind::True),
        token(TokenKind::False),
        token(TokenKind::Ident),
    ])
    .map(|t| Node::Leaf(Leaf::from(t)));

    // Parentheses only group; the inner expression is the node.
    let grouped = surrounded(token(TokenKind::LParen), token(TokenKind::RParen), expression)
        .map(|(_, inner, _)| inner);

    named(any((call.map(Node::Call), literal, grouped)), "an expression").parse(input)
}

/// `name(arguments)`
pub fn call(input: TokenView<'_>) -> ParseResult<'_, Call> {
    spanned(all((token(TokenKind::Ident), parameter_pass)))
        .map(|((name, arguments), span)| Call {
            name: Leaf::from(name),
            arguments,
            span,
        })
        .parse(input)
}

fn parameter_pass(input: TokenView<'_>) -> ParseResult<'_, ParameterPass> {
    spanned(surrounded(
        token(TokenKind::LParen),
        token(TokenKind::RParen),
        optional(separated(token(TokenKind::Comma), expression)),
    ))
    .map(|((_, arguments, _), span)| ParameterPass { arguments, span })
    .parse(input)
}
