// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Error types shared by the parser and tree consumers.

use thiserror::Error;

use crate::token::Token;
use crate::Span;

/// A syntax error: the construct being attempted and the token that
/// stopped it.
///
/// `offset` is the index of `found` in the token stream. Combinators
/// compare offsets to decide which failure is the most informative and
/// whether any input was consumed before failing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected {construct}, found {}", found.describe())]
pub struct ParseFailure {
    pub construct: &'static str,
    pub found: Token,
    pub offset: usize,
}

impl ParseFailure {
    pub fn new(construct: &'static str, found: Token, offset: usize) -> Self {
        Self { construct, found, offset }
    }

    pub fn span(&self) -> Span {
        self.found.span
    }

    /// Keep whichever failure got further, preferring `later` on ties.
    pub fn furthest(self, later: ParseFailure) -> ParseFailure {
        if later.offset >= self.offset {
            later
        } else {
            self
        }
    }
}

/// Misuse of a tree accessor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AstError {
    /// The accessor reached a missing-optional sentinel.
    #[error("expected {expected}, but the optional element is absent ({failure})")]
    Missing {
        expected: &'static str,
        failure: ParseFailure,
    },

    #[error("expected {expected}, found a {found} node")]
    WrongShape {
        expected: &'static str,
        found: &'static str,
    },
}
