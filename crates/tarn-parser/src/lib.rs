// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Parser for the Tarn language.
//!
//! Transforms a token stream into an abstract syntax tree. The grammar is
//! built from the combinators in [`combinator`].

pub mod combinator;
pub mod grammar;
mod hints;

use tarn_ast::decl::Program;
use tarn_ast::token::Token;

pub use combinator::{ParseResult, Parsed, Parser, TokenView};
pub use hints::for_failure as hint;

/// A syntax error: the construct expected and the token found instead.
pub type ParseError = tarn_ast::ParseFailure;

/// Parse a complete translation unit.
///
/// Parsing is all-or-nothing: on failure no tree is produced.
pub fn parse(tokens: &[Token]) -> Result<Program, ParseError> {
    grammar::program(TokenView::new(tokens)).map(|parsed| parsed.value)
}
