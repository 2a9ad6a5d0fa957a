//! The lexer implementation using logos.

use std::collections::HashMap;

use logos::{FilterResult, Logos};
use tarn_ast::token::{Token, TokenKind};
use tarn_ast::{LineMap, Span};
use thiserror::Error;

/// Raw token type for logos. Words are classified against [`Keywords`]
/// in a second pass.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
enum RawToken {
    // === Operators (order matters - longer first) ===
    #[token("==")]
    EqEq,
    #[token("!=")]
    BangEq,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,

    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("=")]
    Eq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,

    // === Delimiters ===
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(",")]
    Comma,
    #[token(";")]
    Semi,

    // === Comments (skip them) ===
    #[regex(r"//[^\n]*", logos::skip)]
    LineComment,

    // Block comments - handled specially for nesting
    #[token("/*", block_comment)]
    BlockComment,

    // === Literals ===
    #[regex(r"[0-9]+")]
    Int,

    #[regex(r#""([^"\\\n]|\\.)*""#)]
    Str,

    // Identifiers and keywords
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Word,
}

/// Skip block comments, handling nesting. Unterminated comments are errors.
fn block_comment(lexer: &mut logos::Lexer<RawToken>) -> FilterResult<(), ()> {
    let mut depth = 1;
    let remainder = lexer.remainder();
    let mut chars = remainder.chars().peekable();
    let mut consumed = 0;

    while depth > 0 {
        match chars.next() {
            Some('/') if chars.peek() == Some(&'*') => {
                chars.next();
                consumed += 2;
                depth += 1;
            }
            Some('*') if chars.peek() == Some(&'/') => {
                chars.next();
                consumed += 2;
                depth -= 1;
            }
            Some(c) => {
                consumed += c.len_utf8();
            }
            None => {
                lexer.bump(consumed);
                return FilterResult::Error(());
            }
        }
    }

    lexer.bump(consumed);
    FilterResult::Skip
}

/// Lexeme → keyword lookup, built once and shared by reference.
#[derive(Debug, Clone)]
pub struct Keywords {
    table: HashMap<&'static str, TokenKind>,
}

impl Keywords {
    pub fn new() -> Self {
        let table = [
            ("let", TokenKind::Let),
            ("fn", TokenKind::Fn),
            ("proc", TokenKind::Proc),
            ("return", TokenKind::Return),
            ("if", TokenKind::If),
            ("else", TokenKind::Else),
            ("for", TokenKind::For),
            ("while", TokenKind::While),
            ("switch", TokenKind::Switch),
            ("case", TokenKind::Case),
            ("and", TokenKind::And),
            ("or", TokenKind::Or),
            ("not", TokenKind::Not),
            ("true", TokenKind::True),
            ("false", TokenKind::False),
        ]
        .into_iter()
        .collect();
        Self { table }
    }

    pub fn lookup(&self, word: &str) -> Option<TokenKind> {
        self.table.get(word).copied()
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl Default for Keywords {
    fn default() -> Self {
        Self::new()
    }
}

/// Maximum number of errors to collect before stopping.
const MAX_ERRORS: usize = 20;

/// The lexer for Tarn source code.
pub struct Lexer<'a> {
    source: &'a str,
    keywords: &'a Keywords,
    line_map: LineMap,
    errors: Vec<LexError>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source code.
    pub fn new(source: &'a str, keywords: &'a Keywords) -> Self {
        Self {
            source,
            keywords,
            line_map: LineMap::new(source),
            errors: Vec::new(),
        }
    }

    /// Tokenize the entire source, collecting multiple errors.
    ///
    /// The token list always ends with a single `Eof` token.
    pub fn tokenize(&mut self) -> LexResult {
        let mut tokens = Vec::new();
        let mut logos_lexer = RawToken::lexer(self.source);

        while let Some(result) = logos_lexer.next() {
            // Stop if we have too many errors
            if self.errors.len() >= MAX_ERRORS {
                break;
            }

            let range = logos_lexer.span();
            let slice = logos_lexer.slice();
            let span = self.line_map.span(self.source, range.start, range.end);

            let kind = match result {
                Ok(raw) => match self.convert_token(raw, slice, span) {
                    Ok(kind) => kind,
                    Err(e) => {
                        self.errors.push(e);
                        continue;
                    }
                },
                Err(()) => {
                    self.errors.push(self.classify_error(slice, span));
                    continue;
                }
            };

            tokens.push(Token::new(kind, slice, span));
        }

        let end = self.line_map.span(self.source, self.source.len(), self.source.len());
        tokens.push(Token::new(TokenKind::Eof, "", end));

        LexResult {
            tokens,
            errors: std::mem::take(&mut self.errors),
        }
    }

    /// Convert a raw logos token to our TokenKind, validating literals.
    fn convert_token(&self, raw: RawToken, slice: &str, span: Span) -> Result<TokenKind, LexError> {
        Ok(match raw {
            RawToken::Plus => TokenKind::Plus,
            RawToken::Minus => TokenKind::Minus,
            RawToken::Star => TokenKind::Star,
            RawToken::Slash => TokenKind::Slash,
            RawToken::Percent => TokenKind::Percent,
            RawToken::Eq => TokenKind::Eq,
            RawToken::EqEq => TokenKind::EqEq,
            RawToken::BangEq => TokenKind::BangEq,
            RawToken::Lt => TokenKind::Lt,
            RawToken::Gt => TokenKind::Gt,
            RawToken::LtEq => TokenKind::LtEq,
            RawToken::GtEq => TokenKind::GtEq,

            RawToken::LParen => TokenKind::LParen,
            RawToken::RParen => TokenKind::RParen,
            RawToken::LBrace => TokenKind::LBrace,
            RawToken::RBrace => TokenKind::RBrace,
            RawToken::Comma => TokenKind::Comma,
            RawToken::Semi => TokenKind::Semi,

            RawToken::Int => {
                slice.parse::<i64>().map_err(|_| LexError::invalid_number(span))?;
                TokenKind::Int
            }
            RawToken::Str => {
                check_escapes(&slice[1..slice.len() - 1], span)?;
                TokenKind::Str
            }
            RawToken::Word => self.keywords.lookup(slice).unwrap_or(TokenKind::Ident),

            // These are skipped by logos, but we list them for completeness
            RawToken::LineComment | RawToken::BlockComment => {
                unreachable!("comments are skipped")
            }
        })
    }

    fn classify_error(&self, slice: &str, span: Span) -> LexError {
        if slice.starts_with("/*") {
            return LexError::unterminated_comment(span);
        }
        match slice.chars().next() {
            Some('"') => LexError::unterminated_string(span),
            Some(ch) => LexError::unexpected_char(ch, span),
            None => LexError::unexpected_char('?', span),
        }
    }
}

/// Validate the escape sequences of a string literal body.
fn check_escapes(body: &str, span: Span) -> Result<(), LexError> {
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n' | 't' | '\\' | '"') => {}
                _ => return Err(LexError::invalid_escape(span)),
            }
        }
    }
    Ok(())
}

/// Result of lexing: tokens plus any errors found.
#[derive(Debug)]
pub struct LexResult {
    pub tokens: Vec<Token>,
    pub errors: Vec<LexError>,
}

impl LexResult {
    /// Returns true if lexing completed without errors.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// What went wrong while scanning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexErrorKind {
    UnexpectedChar,
    UnterminatedString,
    UnterminatedComment,
    InvalidEscape,
    InvalidNumber,
}

/// A lexer error with location and friendly message.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
    pub message: String,
    pub hint: Option<String>,
}

impl LexError {
    fn unexpected_char(ch: char, span: Span) -> Self {
        Self {
            kind: LexErrorKind::UnexpectedChar,
            span,
            message: format!("Unexpected character '{}'", ch),
            hint: None,
        }
    }

    fn unterminated_string(span: Span) -> Self {
        Self {
            kind: LexErrorKind::UnterminatedString,
            span,
            message: "Unterminated string".to_string(),
            hint: Some("Add a closing '\"' on the same line".to_string()),
        }
    }

    fn unterminated_comment(span: Span) -> Self {
        Self {
            kind: LexErrorKind::UnterminatedComment,
            span,
            message: "Unterminated block comment".to_string(),
            hint: Some("Close the comment with '*/'".to_string()),
        }
    }

    fn invalid_escape(span: Span) -> Self {
        Self {
            kind: LexErrorKind::InvalidEscape,
            span,
            message: "Invalid escape sequence".to_string(),
            hint: Some("Valid: \\n \\t \\\\ \\\"".to_string()),
        }
    }

    fn invalid_number(span: Span) -> Self {
        Self {
            kind: LexErrorKind::InvalidNumber,
            span,
            message: "Invalid number".to_string(),
            hint: Some("integers must fit in 64 bits".to_string()),
        }
    }
}
