// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! The Tarn grammar, one rule per construct.
//!
//! Rules are plain functions so they can refer to each other recursively.

mod declaration;
mod expression;
mod statement;

pub use declaration::program;
pub use expression::expression;
pub use statement::{block, statement};
