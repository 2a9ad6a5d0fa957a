// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Compiler phase inspection commands: lex, parse, resolve, check.

use colored::Colorize;
use std::fs;
use std::process;

use tarn_ast::decl::Program;
use tarn_ast::token::Token;
use tarn_diagnostics::json::DiagnosticReport;
use tarn_diagnostics::{resolution_diagnostics, Diagnostic, ToDiagnostic};
use tarn_lexer::{Keywords, LexResult, Lexer};
use tarn_resolve::{Resolution, ScopeId, ScopeTree};

use crate::{output, show_diagnostics, Format, Options};

pub fn cmd_lex(path: &str, options: Options) {
    let source = read_source(path);
    let result = lex_or_exit(&source, path, options);

    match options.format {
        Format::Human => {
            println!("{} Tokens ({}) {}\n", "===".dimmed(), result.tokens.len(), "===".dimmed());
            for tok in &result.tokens {
                println!(
                    "{:>4}:{:<3} {:<10} {}",
                    tok.span.start_line,
                    tok.span.start_col,
                    format!("{:?}", tok.kind),
                    tok.text
                );
            }
            println!("\n{}", output::banner_ok(&format!("Lex: {} tokens", result.tokens.len())));
        }
        Format::Json => print_clean_report(&source, path, "lex"),
    }
}

pub fn cmd_parse(path: &str, options: Options) {
    let source = read_source(path);
    let lex_result = lex_or_exit(&source, path, options);
    let program = parse_or_exit(&lex_result.tokens, &source, path, options);

    match options.format {
        Format::Human => {
            println!(
                "{} AST ({} declarations) {}\n",
                "===".dimmed(),
                program.declarations.len(),
                "===".dimmed()
            );
            for (i, decl) in program.declarations.iter().enumerate() {
                println!("--- Declaration {} ---", i + 1);
                println!("{:#?}", decl);
                println!();
            }
            println!("{}", output::banner_ok("Parse"));
        }
        Format::Json => print_clean_report(&source, path, "parse"),
    }
}

pub fn cmd_resolve(path: &str, options: Options) {
    let source = read_source(path);
    let lex_result = lex_or_exit(&source, path, options);
    let program = parse_or_exit(&lex_result.tokens, &source, path, options);
    let resolution = tarn_resolve::resolve(&program);
    report_or_exit(&resolution, &source, path, options);

    match options.format {
        Format::Human => {
            println!("{} Scopes ({}) {}\n", "===".dimmed(), resolution.scopes.len(), "===".dimmed());
            print_scope(&resolution.scopes, resolution.scopes.root(), 1);

            let mut symbols: Vec<_> = resolution.symbols.iter().collect();
            symbols.sort_by_key(|symbol| symbol.span);
            println!("\n{} Symbols ({}) {}\n", "===".dimmed(), symbols.len(), "===".dimmed());
            for symbol in symbols {
                println!(
                    "{:>4}:{:<3} {:<14} {}",
                    symbol.span.start_line,
                    symbol.span.start_col,
                    format!("{:?}", symbol.kind),
                    symbol.id.qualified()
                );
            }
            println!("\n{}", output::banner_ok("Resolve"));
        }
        Format::Json => print_clean_report(&source, path, "resolve"),
    }
}

/// Run every phase, printing nothing but diagnostics and the verdict.
pub fn cmd_check(path: &str, options: Options) {
    let source = read_source(path);
    let lex_result = lex_or_exit(&source, path, options);
    let program = parse_or_exit(&lex_result.tokens, &source, path, options);
    let resolution = tarn_resolve::resolve(&program);
    report_or_exit(&resolution, &source, path, options);

    match options.format {
        Format::Human => println!("{}", output::banner_ok("Check")),
        Format::Json => print_clean_report(&source, path, "check"),
    }
}

fn read_source(path: &str) -> String {
    match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{}: reading {}: {}", output::error_label(), output::file_path(path), e);
            process::exit(1);
        }
    }
}

fn lex_or_exit(source: &str, path: &str, options: Options) -> LexResult {
    let keywords = Keywords::new();
    let result = Lexer::new(source, &keywords).tokenize();

    if !result.is_ok() {
        // One per line; the rest of a bad line is usually fallout.
        let mut diags: Vec<Diagnostic> = Vec::new();
        let mut last_line: Option<u32> = None;
        for error in &result.errors {
            if last_line != Some(error.span.start_line) {
                diags.push(error.to_diagnostic());
                last_line = Some(error.span.start_line);
            }
        }
        show_diagnostics(&diags, source, path, "lex", options.format);
        if options.format == Format::Human {
            eprintln!("\n{}", output::banner_fail("Lex", diags.len()));
        }
        process::exit(1);
    }

    if options.verbose {
        eprintln!("{}", output::banner(&format!("Lexed {} tokens", result.tokens.len())));
    }
    result
}

fn parse_or_exit(tokens: &[Token], source: &str, path: &str, options: Options) -> Program {
    match tarn_parser::parse(tokens) {
        Ok(program) => {
            if options.verbose {
                eprintln!(
                    "{}",
                    output::banner(&format!("Parsed {} declarations", program.declarations.len()))
                );
            }
            program
        }
        Err(failure) => {
            show_diagnostics(&[failure.to_diagnostic()], source, path, "parse", options.format);
            if options.format == Format::Human {
                eprintln!("\n{}", output::banner_fail("Parse", 1));
            }
            process::exit(1);
        }
    }
}

fn report_or_exit(resolution: &Resolution<'_>, source: &str, path: &str, options: Options) {
    if options.verbose {
        eprintln!(
            "{}",
            output::banner(&format!(
                "Resolved {} symbols in {} scopes",
                resolution.symbols.len(),
                resolution.scopes.len()
            ))
        );
    }

    if !resolution.is_ok() {
        let diags = resolution_diagnostics(resolution);
        show_diagnostics(&diags, source, path, "resolve", options.format);
        if options.format == Format::Human {
            eprintln!("\n{}", output::banner_fail("Resolve", diags.len()));
        }
        process::exit(1);
    }
}

fn print_scope(scopes: &ScopeTree, id: ScopeId, depth: usize) {
    let Some(scope) = scopes.get(id) else { return };
    println!(
        "{}{} {}",
        "  ".repeat(depth),
        scope.name,
        output::dim(&format!("({} bindings)", scope.bindings.len()))
    );
    for &child in &scope.children {
        print_scope(scopes, child, depth + 1);
    }
}

fn print_clean_report(source: &str, path: &str, phase: &str) {
    println!("{}", DiagnosticReport::new(&[], source, path, phase).to_json());
}
