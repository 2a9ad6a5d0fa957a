// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Tarn CLI - runs the front-end phases over a source file.

mod commands;
mod help;
mod output;

use std::env;
use std::process;

use tarn_diagnostics::json::DiagnosticReport;
use tarn_diagnostics::{Diagnostic, DiagnosticFormatter};

/// How diagnostics are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Colored text on stderr.
    Human,
    /// A JSON report on stdout.
    Json,
}

#[derive(Debug, Clone, Copy)]
pub struct Options {
    pub format: Format,
    pub verbose: bool,
}

fn main() {
    output::init();

    let mut options = Options {
        format: Format::Human,
        verbose: false,
    };
    let mut positional: Vec<String> = Vec::new();
    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--json" => options.format = Format::Json,
            "-v" | "--verbose" => options.verbose = true,
            _ => positional.push(arg),
        }
    }

    let Some(command) = positional.first().map(String::as_str) else {
        help::print_usage();
        return;
    };

    match command {
        "lex" | "parse" | "resolve" | "check" => {
            let Some(path) = positional.get(1) else {
                eprintln!("Usage: tarn {} <file.tarn> [--json] [--verbose]", command);
                process::exit(1);
            };
            match command {
                "lex" => commands::phase::cmd_lex(path, options),
                "parse" => commands::phase::cmd_parse(path, options),
                "resolve" => commands::phase::cmd_resolve(path, options),
                _ => commands::phase::cmd_check(path, options),
            }
        }
        "explain" => {
            let Some(code) = positional.get(1) else {
                eprintln!("Usage: tarn explain <code>");
                process::exit(1);
            };
            commands::explain::cmd_explain(code);
        }
        "help" | "--help" | "-h" => help::print_usage(),
        "version" | "--version" | "-V" => println!("tarn {}", env!("CARGO_PKG_VERSION")),
        other => {
            // Treat as filename
            if other.ends_with(".tarn") {
                commands::phase::cmd_check(other, options);
            } else {
                eprintln!("{}: unknown command: {}", output::error_label(), other);
                help::print_usage();
                process::exit(1);
            }
        }
    }
}

/// Write diagnostics in the requested format.
pub fn show_diagnostics(diags: &[Diagnostic], source: &str, path: &str, phase: &str, format: Format) {
    match format {
        Format::Human => {
            let formatter = DiagnosticFormatter::new(source).with_file_name(path);
            for diag in diags {
                eprintln!("{}", formatter.format(diag));
            }
        }
        Format::Json => {
            println!("{}", DiagnosticReport::new(diags, source, path, phase).to_json());
        }
    }
}
