// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! End-to-end parsing of whole programs.

use tarn_ast::decl::Program;
use tarn_ast::token::{Token, TokenKind};
use tarn_ast::{Leaves, Node, Span};
use tarn_lexer::{Keywords, Lexer};
use tarn_parser::{parse, ParseError};

fn lex(src: &str) -> Vec<Token> {
    let keywords = Keywords::new();
    let result = Lexer::new(src, &keywords).tokenize();
    assert!(result.is_ok(), "Lex errors: {:?}", result.errors);
    result.tokens
}

fn parse_ok(src: &str) -> Program {
    match parse(&lex(src)) {
        Ok(program) => program,
        Err(e) => panic!("Parse error in {:?}: {}", src, e),
    }
}

fn parse_err(src: &str) -> ParseError {
    match parse(&lex(src)) {
        Ok(program) => panic!("Expected a parse error for {:?}, got {:?}", src, program),
        Err(e) => e,
    }
}

const SAMPLE: &str = r#"
let limit = 10;
let counter;

fn square(n) {
    return n * n;
}

proc report(label, value) {
    print(label, value);
}

fn main() {
    let total = 0;
    for (let i = 0; i < limit; i = i + 1) {
        total = total + square(i);
    }
    while (not (total < 0 or total == 0)) {
        total = total - 1;
    }
    if (total > 100) {
        report("big", total);
    } else if (total > 10) {
        report("medium", total);
    } else {
        report("small", -total);
    }
    switch (total % 3) {
        case 0 { counter = 0; }
        case 1 { counter = 1; }
    }
    {
        let scratch = "a\tb";
    }
    return total;
}
"#;

#[test]
fn two_global_declarations_in_order() {
    let program = parse_ok("let x ; let y ;");
    assert_eq!(program.declarations.len(), 2);
    let names: Vec<&str> = program
        .declarations
        .iter()
        .map(|decl| {
            assert!(matches!(decl, Node::VarDecl(_)), "expected var-decl, got {}", decl.kind_name());
            decl.declared_name().unwrap().text.as_str()
        })
        .collect();
    assert_eq!(names, vec!["x", "y"]);
}

#[test]
fn var_decl_span_includes_terminator() {
    let program = parse_ok("let x = 1;");
    assert_eq!(program.declarations[0].span().unwrap(), Span::new(1, 1, 1, 11));
}

#[test]
fn empty_program() {
    let program = parse_ok("");
    assert!(program.declarations.is_empty());
}

#[test]
fn sample_program_parses() {
    let program = parse_ok(SAMPLE);
    let kinds: Vec<&str> = program.declarations.iter().map(Node::kind_name).collect();
    assert_eq!(
        kinds,
        vec![
            "variable initialization",
            "variable declaration",
            "function definition",
            "procedure definition",
            "function definition",
        ]
    );

    let Node::FunctionDef(main) = &program.declarations[4] else { panic!("expected main") };
    assert_eq!(main.signature.name.text, "main");
    assert!(main.signature.parameters.names.is_empty());
    assert_eq!(main.body.statements.len(), 7);

    let Node::ProcedureDef(report) = &program.declarations[3] else { panic!("expected report") };
    let params: Vec<&str> = report.signature.parameters.names.iter().map(|l| l.text.as_str()).collect();
    assert_eq!(params, vec!["label", "value"]);
}

#[test]
fn leaves_cover_the_source_in_order() {
    let tokens = lex(SAMPLE);
    let program = parse_ok(SAMPLE);
    let leaves = program.leaves();
    assert!(!leaves.is_empty());

    for pair in leaves.windows(2) {
        assert!(
            pair[0].span.precedes(&pair[1].span),
            "leaf {:?} at {} overlaps or follows {:?} at {}",
            pair[0].text,
            pair[0].span,
            pair[1].text,
            pair[1].span
        );
    }
    for leaf in &leaves {
        assert!(program.span.contains(&leaf.span), "leaf {:?} escapes the program span", leaf.text);
    }

    // Every non-punctuation token shows up as a leaf, in order.
    let punctuation = [
        TokenKind::Let,
        TokenKind::Fn,
        TokenKind::Proc,
        TokenKind::Return,
        TokenKind::If,
        TokenKind::Else,
        TokenKind::For,
        TokenKind::While,
        TokenKind::Switch,
        TokenKind::Case,
        TokenKind::Eq,
        TokenKind::LParen,
        TokenKind::RParen,
        TokenKind::LBrace,
        TokenKind::RBrace,
        TokenKind::Comma,
        TokenKind::Semi,
        TokenKind::Eof,
    ];
    let expected: Vec<(&str, Span)> = tokens
        .iter()
        .filter(|t| !punctuation.contains(&t.kind))
        .map(|t| (t.text.as_str(), t.span))
        .collect();
    let actual: Vec<(&str, Span)> = leaves.iter().map(|l| (l.text.as_str(), l.span)).collect();
    assert_eq!(actual, expected);
}

#[test]
fn first_real_violation_is_reported() {
    let failure = parse_err("let x = 1;\nfn main() {\n    let y = ;\n}\n");
    assert_eq!(failure.construct, "an expression");
    assert_eq!(failure.found.kind, TokenKind::Semi);
    assert_eq!(failure.span(), Span::new(3, 13, 3, 14));
}

#[test]
fn end_of_input_expected_when_nothing_starts() {
    let failure = parse_err("let x; }");
    assert_eq!(failure.construct, "end of file");
    assert_eq!(failure.found.kind, TokenKind::RBrace);
}

#[test]
fn statements_are_not_globals() {
    let failure = parse_err("x = 1;");
    assert_eq!(failure.construct, "end of file");
    assert_eq!(failure.offset, 0);
}

#[test]
fn trailing_comma_in_parameters_is_rejected() {
    let failure = parse_err("fn f(a, b,) { }");
    assert_eq!(failure.construct, "a name");
    assert_eq!(failure.found.kind, TokenKind::RParen);
}

#[test]
fn missing_semicolon() {
    let failure = parse_err("fn main() { let x = 1 }");
    assert_eq!(failure.construct, "';'");
    assert_eq!(failure.found.kind, TokenKind::RBrace);
}

#[test]
fn error_message_names_construct_and_token() {
    let failure = parse_err("fn main() { let 5 = x; }");
    assert_eq!(failure.to_string(), "expected a name, found number '5'");
}

#[test]
fn deeply_nested_calls() {
    let depth = 40;
    let src = format!("fn main() {{ let x = {}1{}; }}", "f(".repeat(depth), ")".repeat(depth));
    let program = parse_ok(&src);

    let Node::FunctionDef(main) = &program.declarations[0] else { panic!("expected main") };
    let Node::VarInit(init) = &main.body.statements[0] else { panic!("expected an initializer") };
    let mut node = init.value.as_ref();
    let mut calls = 0;
    while let Node::Call(call) = node {
        calls += 1;
        assert_eq!(call.arguments.arguments.len(), 1);
        node = &call.arguments.arguments[0];
    }
    assert_eq!(calls, depth);
    assert_eq!(node.leaf().ok().map(|leaf| leaf.text.as_str()), Some("1"));
}

#[test]
fn error_inside_deeply_nested_blocks() {
    let depth = 40;
    let src = format!("fn main() {{ {} x = ; {} }}", "{ ".repeat(depth), "} ".repeat(depth));
    let failure = parse_err(&src);
    assert_eq!(failure.construct, "an expression");
    assert_eq!(failure.found.kind, TokenKind::Semi);
}
