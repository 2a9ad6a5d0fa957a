// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Abstract Syntax Tree types for the Tarn language.
//!
//! This crate defines the tokens, spans and tree nodes shared between the
//! lexer, parser, resolver and diagnostics.

pub mod span;
pub mod token;
pub mod error;
pub mod node;
pub mod expr;
pub mod stmt;
pub mod decl;

pub use span::{Span, LineMap};
pub use error::{AstError, ParseFailure};
pub use node::{Leaves, Missing, Node};
