// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Error hints - suggestions for fixing common mistakes.
//!
//! Kept separate from the grammar to avoid clutter.

use tarn_ast::token::TokenKind;
use tarn_ast::ParseFailure;

/// Get a hint for a failure based on what was expected and what was found.
pub fn for_failure(failure: &ParseFailure) -> Option<&'static str> {
    for_expected(failure.construct, failure.found.kind)
}

fn for_expected(expected: &str, found: TokenKind) -> Option<&'static str> {
    match (expected, found) {
        // Terminators
        ("';'", TokenKind::RBrace | TokenKind::Eof) => Some("statements end with ';'"),
        ("';'", _) => Some("end the statement with ';'"),

        // Block hints
        ("'{'", _) => Some("bodies start with '{'"),
        ("'}'", TokenKind::Eof) => Some("every '{' needs a matching '}'"),

        // Parentheses hints
        ("'('", _) => Some("conditions and parameter lists go in parentheses"),
        ("')'", TokenKind::Eof) => Some("add ')' to close the parenthesis"),
        ("')'", TokenKind::Comma) => None,

        ("'='", TokenKind::Semi) => None,
        ("'='", _) => Some("use '=' to give a value"),

        // Expression hints
        ("an expression", TokenKind::Semi) => Some("statement is incomplete"),
        ("an expression", TokenKind::RParen) => Some("put a value inside the parentheses"),
        ("an expression", _) => Some("try a value, variable, or function call"),

        // Name/identifier hints
        ("a name", TokenKind::Int) => Some("names can't start with a number"),
        ("a name", TokenKind::RParen) => Some("remove the trailing ','"),
        ("a name", kind) if kind.is_keyword() => Some("keywords can't be used as names"),
        ("a name", _) => Some("names start with a letter or '_'"),

        ("a declaration", _) => Some("start with 'fn', 'proc' or 'let'"),
        ("a statement", _) => Some("try a declaration, assignment, call or control statement"),

        ("end of file", TokenKind::RBrace) => Some("this '}' has no matching '{'"),

        _ => None,
    }
}
