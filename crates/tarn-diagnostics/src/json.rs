//! `--json` output.
//!
//! One report per run: the phase that produced it, whether the file got
//! through, and each diagnostic with the source line under every site.

use serde::Serialize;
use tarn_ast::{LineMap, Span};

use crate::codes::ErrorCodeRegistry;
use crate::{Diagnostic, Label};

#[derive(Debug, Serialize)]
pub struct DiagnosticReport {
    /// Bumped when a field changes meaning or goes away.
    pub version: u32,
    pub file: String,
    pub phase: String,
    pub success: bool,
    pub error_count: usize,
    pub diagnostics: Vec<JsonDiagnostic>,
}

#[derive(Debug, Serialize)]
pub struct JsonDiagnostic {
    pub code: &'static str,
    /// "Syntax" or "Resolution".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary: Option<JsonLabel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related: Option<JsonLabel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct JsonLabel {
    pub message: String,
    /// 1-based, end column exclusive.
    pub span: Span,
    /// Text of the line the span starts on.
    pub source_line: String,
}

impl DiagnosticReport {
    pub fn new(diagnostics: &[Diagnostic], source: &str, file: &str, phase: &str) -> Self {
        let registry = ErrorCodeRegistry::default();
        let line_map = LineMap::new(source);
        let site = |label: &Label| JsonLabel {
            message: label.message.clone(),
            span: label.span,
            source_line: line_map
                .line_text(source, label.span.start_line)
                .unwrap_or("")
                .to_string(),
        };

        let diagnostics: Vec<JsonDiagnostic> = diagnostics
            .iter()
            .map(|diag| JsonDiagnostic {
                code: diag.code,
                category: registry.get(diag.code).map(|info| info.category.to_string()),
                message: diag.message.clone(),
                primary: diag.primary.as_ref().map(site),
                related: diag.related.as_ref().map(site),
                note: diag.note.clone(),
                help: diag.help.clone(),
            })
            .collect();

        Self {
            version: 1,
            file: file.to_string(),
            phase: phase.to_string(),
            success: diagnostics.is_empty(),
            error_count: diagnostics.len(),
            diagnostics,
        }
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sites_carry_their_source_lines() {
        let source = "fn main() {\n  let y;\n  let y;\n}";
        let diag = Diagnostic::new("E0203", "`y` is already defined in this scope")
            .at(Span::new(3, 7, 3, 8), "redefined here")
            .related_to(Span::new(2, 7, 2, 8), "previously defined here");
        let report = DiagnosticReport::new(&[diag], source, "main.tarn", "resolve");

        assert!(!report.success);
        assert_eq!(report.error_count, 1);
        let entry = &report.diagnostics[0];
        assert_eq!(entry.category.as_deref(), Some("Resolution"));
        let primary = entry.primary.as_ref().expect("primary site");
        assert_eq!(primary.span, Span::new(3, 7, 3, 8));
        assert_eq!(primary.source_line, "  let y;");
        let related = entry.related.as_ref().expect("related site");
        assert_eq!(related.message, "previously defined here");
    }

    #[test]
    fn absent_parts_are_left_out() {
        let diag = Diagnostic::new("E0204", "no `main` function defined at the top level");
        let report = DiagnosticReport::new(&[diag], "", "empty.tarn", "resolve");
        let value: serde_json::Value =
            serde_json::from_str(&report.to_json()).expect("report is valid JSON");

        assert_eq!(value["file"], "empty.tarn");
        assert_eq!(value["diagnostics"][0]["code"], "E0204");
        let entry = value["diagnostics"][0].as_object().expect("diagnostic object");
        for key in ["primary", "related", "note", "help"] {
            assert!(!entry.contains_key(key), "{} should be omitted", key);
        }
    }

    #[test]
    fn spans_serialize_as_line_and_column() {
        let diag = Diagnostic::new("E0100", "expected ';', found end of file").at(Span::point(1, 7), "expected ';'");
        let report = DiagnosticReport::new(&[diag], "let x", "main.tarn", "parse");
        let value: serde_json::Value =
            serde_json::from_str(&report.to_json()).expect("report is valid JSON");

        let span = &value["diagnostics"][0]["primary"]["span"];
        assert_eq!(span["start_line"], 1);
        assert_eq!(span["start_col"], 7);
        assert_eq!(span["end_col"], 7);
    }

    #[test]
    fn empty_report_succeeds() {
        let report = DiagnosticReport::new(&[], "fn main() { }", "ok.tarn", "check");
        assert!(report.success);
        assert_eq!(report.error_count, 0);
    }
}
