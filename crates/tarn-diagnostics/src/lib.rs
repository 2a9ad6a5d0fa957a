// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Tarn compiler diagnostics.
//!
//! Every front-end error converts into a [`Diagnostic`] through
//! [`ToDiagnostic`]. Tarn has no warnings, so a diagnostic is always an
//! error: a registered code, a message, the site it is about, at most one
//! related site, and optional note and help lines.

pub mod codes;
pub mod convert;
pub mod formatter;
pub mod json;
pub mod suggestions;

use tarn_ast::Span;

pub use convert::resolution_diagnostics;
pub use formatter::DiagnosticFormatter;

/// An error ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// One of the constants in [`codes`].
    pub code: &'static str,
    pub message: String,
    /// Where the error is. Absent for whole-program errors like a missing `main`.
    pub primary: Option<Label>,
    /// Another declaration the error refers to.
    pub related: Option<Label>,
    pub note: Option<String>,
    pub help: Option<String>,
}

/// A source span with the text shown beside its underline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub span: Span,
    pub message: String,
}

impl Label {
    fn new(span: Span, message: impl Into<String>) -> Self {
        Self { span, message: message.into() }
    }
}

impl Diagnostic {
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            primary: None,
            related: None,
            note: None,
            help: None,
        }
    }

    pub fn at(mut self, span: Span, message: impl Into<String>) -> Self {
        self.primary = Some(Label::new(span, message));
        self
    }

    pub fn related_to(mut self, span: Span, message: impl Into<String>) -> Self {
        self.related = Some(Label::new(span, message));
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn primary_span(&self) -> Option<Span> {
        self.primary.as_ref().map(|label| label.span)
    }
}

/// Convert a compiler error into a diagnostic.
pub trait ToDiagnostic {
    fn to_diagnostic(&self) -> Diagnostic;
}
