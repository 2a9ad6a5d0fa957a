// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Statement rules.

use tarn_ast::expr::Leaf;
use tarn_ast::stmt::{
    Block, Case, Else, ElseIf, For, If, Return, Switch, VarAssignment, VarInit, While,
};
use tarn_ast::token::TokenKind;
use tarn_ast::Node;

use super::declaration::{function, procedure, var_decl, var_init};
use super::expression::{call, expression};
use crate::combinator::{
    all, any, many_until, named, optional, spanned, surrounded, token, ParseResult, Parser,
    TokenView,
};

pub fn statement(input: TokenView<'_>) -> ParseResult<'_, Node> {
    let assignment_statement = all((assignment, token(TokenKind::Semi))).map(|(node, _)| node);
    let call_statement = all((call, token(TokenKind::Semi))).map(|(call, _)| Node::Call(call));

    named(
        any((
            function,
            procedure,
            var_init,
            var_decl,
            assignment_statement,
            call_statement,
            return_statement,
            if_statement,
            for_statement,
            while_statement,
            switch_statement,
            block.map(Node::Block),
        )),
        "a statement",
    )
    .parse(input)
}

/// `{ statement* }`
pub fn block(input: TokenView<'_>) -> ParseResult<'_, Block> {
    spanned(all((token(TokenKind::LBrace), many_until(statement, token(TokenKind::RBrace)))))
        .map(|((_, (statements, _)), span)| Block { statements, span })
        .parse(input)
}

/// `name = value`, without the terminator.
fn assignment(input: TokenView<'_>) -> ParseResult<'_, Node> {
    spanned(all((token(TokenKind::Ident), token(TokenKind::Eq), expression)))
        .map(|((name, _, value), span)| {
            Node::VarAssignment(VarAssignment {
                name: Leaf::from(name),
                value: Box::new(value),
                span,
            })
        })
        .parse(input)
}

fn return_statement(input: TokenView<'_>) -> ParseResult<'_, Node> {
    spanned(all((
        token(TokenKind::Return),
        optional(expression),
        token(TokenKind::Semi),
    )))
    .map(|((_, value, _), span)| {
        Node::Return(Return {
            value: Box::new(value),
            span,
        })
    })
    .parse(input)
}

/// `( expression )`
fn condition(input: TokenView<'_>) -> ParseResult<'_, Node> {
    surrounded(token(TokenKind::LParen), token(TokenKind::RParen), expression)
        .map(|(_, inner, _)| inner)
        .parse(input)
}

fn if_statement(input: TokenView<'_>) -> ParseResult<'_, Node> {
    spanned(all((token(TokenKind::If), condition, block, optional(alternative))))
        .map(|((_, condition, body, alternative), span)| {
            Node::If(If {
                condition: Box::new(condition),
                body,
                alternative: Box::new(alternative),
                span,
            })
        })
        .parse(input)
}

fn alternative(input: TokenView<'_>) -> ParseResult<'_, Node> {
    let else_if = spanned(all((
        token(TokenKind::Else),
        token(TokenKind::If),
        condition,
        block,
        optional(alternative),
    )))
    .map(|((_, _, condition, body, alternative), span)| {
        Node::ElseIf(ElseIf {
            condition: Box::new(condition),
            body,
            alternative: Box::new(alternative),
            span,
        })
    });
    let else_clause = spanned(all((token(TokenKind::Else), block)))
        .map(|((_, body), span)| Node::Else(Else { body, span }));

    any((else_if, else_clause)).parse(input)
}

fn for_statement(input: TokenView<'_>) -> ParseResult<'_, Node> {
    spanned(all((
        token(TokenKind::For),
        token(TokenKind::LParen),
        optional(for_init),
        token(TokenKind::Semi),
        optional(expression),
        token(TokenKind::Semi),
        optional(assignment),
        token(TokenKind::RParen),
        block,
    )))
    .map(|((_, _, init, _, test, _, update, _, body), span)| {
        Node::For(For {
            init: Box::new(init),
            test: Box::new(test),
            update: Box::new(update),
            body,
            span,
        })
    })
    .parse(input)
}

/// `let name = value` or an assignment, as the first clause of a `for`.
fn for_init(input: TokenView<'_>) -> ParseResult<'_, Node> {
    let declaration = spanned(all((
        token(TokenKind::Let),
        token(TokenKind::Ident),
        token(TokenKind::Eq),
        expression,
    )))
    .map(|((_, name, _, value), span)| {
        Node::VarInit(VarInit {
            name: Leaf::from(name),
            value: Box::new(value),
            span,
        })
    });

    any((declaration, assignment)).parse(input)
}

fn while_statement(input: TokenView<'_>) -> ParseResult<'_, Node> {
    spanned(all((token(TokenKind::While), condition, block)))
        .map(|((_, condition, body), span)| {
            Node::While(While {
                condition: Box::new(condition),
                body,
                span,
            })
        })
        .parse(input)
}

fn switch_statement(input: TokenView<'_>) -> ParseResult<'_, Node> {
    spanned(all((
        token(TokenKind::Switch),
        condition,
        token(TokenKind::LBrace),
        many_until(case, token(TokenKind::RBrace)),
    )))
    .map(|((_, subject, _, (cases, _)), span)| {
        Node::Switch(Switch {
            subject: Box::new(subject),
            cases,
            span,
        })
    })
    .parse(input)
}

fn case(input: TokenView<'_>) -> ParseResult<'_, Case> {
    spanned(all((token(TokenKind::Case), expression, block)))
        .map(|((_, value, body), span)| Case {
            value: Box::new(value),
            body,
            span,
        })
        .parse(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tarn_ast::Span;
    use tarn_lexer::{Keywords, Lexer};

    fn parse_stmt(src: &str) -> Node {
        let keywords = Keywords::new();
        let result = Lexer::new(src, &keywords).tokenize();
        assert!(result.is_ok(), "Lex errors: {:?}", result.errors);
        let parsed = statement(TokenView::new(&result.tokens)).expect("statement should parse");
        assert_eq!(parsed.rest.peek().map(|t| t.kind), Some(TokenKind::Eof));
        parsed.value
    }

    fn stmt_error(src: &str) -> tarn_ast::ParseFailure {
        let keywords = Keywords::new();
        let result = Lexer::new(src, &keywords).tokenize();
        statement(TokenView::new(&result.tokens)).unwrap_err()
    }

    #[test]
    fn assignment_and_call_statements() {
        let Node::VarAssignment(assign) = parse_stmt("x = x + 1;") else { panic!("expected assignment") };
        assert_eq!(assign.name.text, "x");
        // The terminator is not part of the assignment.
        assert_eq!(assign.span, Span::new(1, 1, 1, 10));

        let Node::Call(call) = parse_stmt("print(x, 2);") else { panic!("expected call") };
        assert_eq!(call.name.text, "print");
        assert_eq!(call.arguments.arguments.len(), 2);
    }

    #[test]
    fn bare_return_has_missing_value() {
        let Node::Return(ret) = parse_stmt("return;") else { panic!("expected return") };
        assert!(ret.value.is_missing());
        let Node::Return(ret) = parse_stmt("return 1 + 2;") else { panic!("expected return") };
        assert!(!ret.value.is_missing());
    }

    #[test]
    fn if_chain() {
        let node = parse_stmt("if (a) { } else if (b) { x = 1; } else { }");
        let Node::If(first) = node else { panic!("expected if") };
        assert_eq!(first.condition.leaf().unwrap().text, "a");
        let Node::ElseIf(second) = first.alternative.as_ref() else { panic!("expected else-if") };
        assert_eq!(second.body.statements.len(), 1);
        assert!(matches!(second.alternative.as_ref(), Node::Else(_)));
    }

    #[test]
    fn if_without_else() {
        let Node::If(node) = parse_stmt("if (a) { }") else { panic!("expected if") };
        assert!(node.alternative.is_missing());
    }

    #[test]
    fn for_clauses() {
        let Node::For(full) = parse_stmt("for (let i = 0; i < 10; i = i + 1) { }") else {
            panic!("expected for")
        };
        assert!(matches!(full.init.as_ref(), Node::VarInit(_)));
        assert!(matches!(full.test.as_ref(), Node::BinaryOp(_)));
        assert!(matches!(full.update.as_ref(), Node::VarAssignment(_)));

        let Node::For(empty) = parse_stmt("for (;;) { }") else { panic!("expected for") };
        assert!(empty.init.is_missing());
        assert!(empty.test.is_missing());
        assert!(empty.update.is_missing());
    }

    #[test]
    fn switch_cases() {
        let Node::Switch(switch) = parse_stmt("switch (x) { case 1 { } case 2 { y = 2; } }") else {
            panic!("expected switch")
        };
        assert_eq!(switch.cases.len(), 2);
        assert_eq!(switch.cases[1].value.leaf().unwrap().text, "2");
        assert_eq!(switch.cases[1].body.statements.len(), 1);
    }

    #[test]
    fn nested_definitions_in_blocks() {
        let Node::Block(block) = parse_stmt("{ fn inner() { } proc run(a) { } let z; }") else {
            panic!("expected block")
        };
        assert_eq!(block.statements.len(), 3);
        assert!(matches!(block.statements[0], Node::FunctionDef(_)));
        assert!(matches!(block.statements[1], Node::ProcedureDef(_)));
    }

    #[test]
    fn block_reports_the_failing_statement() {
        let failure = stmt_error("{ let x = ; }");
        assert_eq!(failure.construct, "an expression");
        assert_eq!(failure.found.kind, TokenKind::Semi);
    }

    #[test]
    fn unterminated_block() {
        let failure = stmt_error("{ x = 1;");
        assert_eq!(failure.construct, "'}'");
        assert_eq!(failure.found.kind, TokenKind::Eof);
    }

    #[test]
    fn not_a_statement() {
        let failure = stmt_error(")");
        assert_eq!(failure.construct, "a statement");
        assert_eq!(failure.offset, 0);
    }
}
