// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Terminal rendering of diagnostics.
//!
//! ```text
//! error[E0202]: procedure `log` does not produce a value
//!   --> main.tarn:4:13
//!     |
//!   1 | proc log(message) {
//!     |      --- procedure defined here
//! ...
//!   4 |     let x = log(1);
//!     |             ^^^ used as a value
//!     = note: procedures can only be called as statements
//!     = help: define `log` with `fn` if it should return a value
//! ```

use std::fmt::{self, Write};

use colored::{ColoredString, Colorize};

use tarn_ast::LineMap;

use crate::{Diagnostic, Label};

/// Renders diagnostics against the source they were produced from.
pub struct DiagnosticFormatter<'a> {
    source: &'a str,
    file_name: &'a str,
    line_map: LineMap,
}

#[derive(Clone, Copy)]
enum Site {
    Primary,
    Related,
}

impl Site {
    fn marker(self) -> char {
        match self {
            Site::Primary => '^',
            Site::Related => '-',
        }
    }

    fn paint(self, text: &str) -> ColoredString {
        match self {
            Site::Primary => text.red().bold(),
            Site::Related => text.blue(),
        }
    }
}

impl<'a> DiagnosticFormatter<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            file_name: "<source>",
            line_map: LineMap::new(source),
        }
    }

    pub fn with_file_name(mut self, name: &'a str) -> Self {
        self.file_name = name;
        self
    }

    pub fn format(&self, diagnostic: &Diagnostic) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write(&mut out, diagnostic);
        out
    }

    pub fn write(&self, out: &mut impl Write, diagnostic: &Diagnostic) -> fmt::Result {
        writeln!(
            out,
            "{}[{}]: {}",
            "error".red().bold(),
            diagnostic.code.red().bold(),
            diagnostic.message.bold()
        )?;

        let mut sites: Vec<(&Label, Site)> = diagnostic
            .primary
            .iter()
            .map(|label| (label, Site::Primary))
            .chain(diagnostic.related.iter().map(|label| (label, Site::Related)))
            .collect();
        sites.sort_by_key(|(label, _)| (label.span.start_line, label.span.start_col));

        let width = sites
            .iter()
            .map(|(label, _)| label.span.start_line.to_string().len())
            .max()
            .unwrap_or(0)
            .max(2);
        let pad = " ".repeat(width + 2);

        if let Some(primary) = &diagnostic.primary {
            writeln!(
                out,
                "{}{} {}:{}:{}",
                " ".repeat(width),
                "-->".blue(),
                self.file_name,
                primary.span.start_line,
                primary.span.start_col
            )?;
            writeln!(out, "{}{}", pad, "|".blue())?;
        }

        let mut shown_line = None;
        for (label, site) in sites {
            let line = label.span.start_line;
            if shown_line != Some(line) {
                if shown_line.is_some_and(|shown| line > shown + 1) {
                    writeln!(out, "{}", "...".blue())?;
                }
                let number = format!("{:>width$}", line, width = width + 1);
                writeln!(out, "{} {} {}", number.blue().bold(), "|".blue(), self.line(line))?;
                shown_line = Some(line);
            }
            self.write_underline(out, &pad, label, site)?;
        }

        for (kind, text) in [("note", &diagnostic.note), ("help", &diagnostic.help)] {
            if let Some(text) = text {
                writeln!(out, "{}{} {}: {}", pad, "=".cyan(), kind.cyan().bold(), text)?;
            }
        }
        Ok(())
    }

    /// Marks the label's columns on its first line. Multi-line labels run
    /// to the end of that line and every label is at least one column wide.
    fn write_underline(&self, out: &mut impl Write, pad: &str, label: &Label, site: Site) -> fmt::Result {
        let span = label.span;
        let start = span.start_col.max(1) as usize;
        let end = if span.end_line == span.start_line {
            span.end_col as usize
        } else {
            self.line(span.start_line).chars().count() + 1
        };
        let marks = site.marker().to_string().repeat(end.saturating_sub(start).max(1));
        writeln!(
            out,
            "{}{} {}{} {}",
            pad,
            "|".blue(),
            " ".repeat(start - 1),
            site.paint(&marks),
            site.paint(&label.message)
        )
    }

    fn line(&self, line: u32) -> &str {
        self.line_map.line_text(self.source, line).unwrap_or("")
    }
}
