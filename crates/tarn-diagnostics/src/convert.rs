// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Conversions from compiler error types to `Diagnostic`.
//!
//! The CLI renders every phase through these conversions. The
//! `ToDiagnostic` trait is implemented for every compiler error type.

use tarn_lexer::{LexError, LexErrorKind};
use tarn_parser::ParseError;
use tarn_resolve::{Resolution, SemanticError, SymbolKind};

use crate::codes;
use crate::suggestions::did_you_mean;
use crate::{Diagnostic, ToDiagnostic};

// ============================================================================
// Lex Errors
// ============================================================================

impl ToDiagnostic for LexError {
    fn to_diagnostic(&self) -> Diagnostic {
        let (code, label) = match self.kind {
            LexErrorKind::UnexpectedChar => (codes::UNEXPECTED_CHARACTER, "unexpected character"),
            LexErrorKind::UnterminatedString => (codes::UNTERMINATED_STRING, "string starts here"),
            LexErrorKind::UnterminatedComment => (codes::UNTERMINATED_COMMENT, "comment starts here"),
            LexErrorKind::InvalidEscape => (codes::INVALID_ESCAPE, "in this string"),
            LexErrorKind::InvalidNumber => (codes::INVALID_NUMBER, "number out of range"),
        };

        let mut diag = Diagnostic::new(code, &self.message).at(self.span, label);

        if let Some(ref hint) = self.hint {
            diag = diag.with_help(hint.as_str());
        }

        diag
    }
}

// ============================================================================
// Parse Errors
// ============================================================================

impl ToDiagnostic for ParseError {
    fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::new(codes::UNEXPECTED_TOKEN, self.to_string())
            .at(self.span(), format!("expected {}", self.construct));

        if let Some(hint) = tarn_parser::hint(self) {
            diag = diag.with_help(hint);
        }

        diag
    }
}

// ============================================================================
// Semantic Errors
// ============================================================================

impl ToDiagnostic for SemanticError<'_> {
    fn to_diagnostic(&self) -> Diagnostic {
        let message = self.to_string();

        match self {
            SemanticError::CallToVariable { call, target } => Diagnostic::new(codes::CALL_TO_VARIABLE, message)
                .at(call.name.span, "called here")
                .related_to(target.span, "declared as a variable here"),

            SemanticError::AssignmentToCallable { assignment, target } => Diagnostic::new(codes::ASSIGNMENT_TO_CALLABLE, message)
                .at(assignment.name.span, "assigned here")
                .related_to(target.span, format!("{} defined here", target.kind.describe()))
                .with_help("declare a variable with `let` to hold the value"),

            SemanticError::ProcedureAsValue { usage, target } => Diagnostic::new(codes::PROCEDURE_AS_VALUE, message)
                .at(usage.span, "used as a value")
                .related_to(target.span, "procedure defined here")
                .with_note("procedures can only be called as statements")
                .with_help(format!("define `{}` with `fn` if it should return a value", usage.text)),

            SemanticError::Redefinition { name, previous } => Diagnostic::new(codes::REDEFINITION, message)
                .at(name.span, "redefined here")
                .related_to(previous.span, "previously defined here"),

            SemanticError::MissingMain => Diagnostic::new(codes::MISSING_MAIN, message)
                .with_help("add `fn main() { }` at the top level"),

            SemanticError::UseBeforeDefinition { usage, definition: Some(definition) } => {
                let mut diag = Diagnostic::new(codes::USE_BEFORE_DEFINITION, message)
                    .at(usage.span, "used here")
                    .related_to(definition.span, "defined later here");
                if definition.kind == SymbolKind::Variable {
                    diag = diag.with_help("move the declaration before its first use");
                } else {
                    diag = diag.with_help(format!(
                        "define {} `{}` before the code that calls it",
                        definition.kind.describe(),
                        usage.text
                    ));
                }
                diag
            }

            SemanticError::UseBeforeDefinition { usage, definition: None } => Diagnostic::new(codes::USE_BEFORE_DEFINITION, message)
                .at(usage.span, "not found in this scope"),
        }
    }
}

/// Convert every semantic error of a resolution, suggesting close
/// matches for names that were never declared.
pub fn resolution_diagnostics(resolution: &Resolution<'_>) -> Vec<Diagnostic> {
    resolution
        .errors
        .iter()
        .map(|error| {
            let diag = error.to_diagnostic();
            match error {
                SemanticError::UseBeforeDefinition { usage, definition: None } => {
                    let names = resolution.symbols.iter().map(|symbol| symbol.id.name());
                    match did_you_mean(&usage.text, names) {
                        Some(help) => diag.with_help(help),
                        None => diag,
                    }
                }
                _ => diag,
            }
        })
        .collect()
}
