// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Help text for CLI commands.

use crate::output;

pub fn print_usage() {
    println!(
        "{} {} - Front end for the Tarn teaching language",
        output::title("Tarn"),
        output::version(env!("CARGO_PKG_VERSION"))
    );
    println!();
    println!(
        "{}: {} {} {} {}",
        output::section_header("Usage"),
        output::command("tarn"),
        output::arg("<command>"),
        output::arg("<file>"),
        output::arg("[options]")
    );
    println!();
    println!("{}", output::section_header("Compilation Phases:"));
    println!("  {} {}       Tokenize a file and print tokens", output::command("lex"), output::arg("<file>"));
    println!("  {} {}     Parse a file and print the tree", output::command("parse"), output::arg("<file>"));
    println!("  {} {}   Resolve names and print scopes and symbols", output::command("resolve"), output::arg("<file>"));
    println!("  {} {}     Run every phase and report errors only", output::command("check"), output::arg("<file>"));

    println!();
    println!("{}", output::section_header("Other:"));
    println!("  {} {}   Explain an error code", output::command("explain"), output::arg("<code>"));
    println!("  {}             Show this help", output::command("help"));
    println!("  {}          Show version", output::command("version"));

    println!();
    println!("{}", output::section_header("Options:"));
    println!("  {}        Output diagnostics as structured JSON", output::arg("--json"));
    println!("  {} {} Print phase banners with counts", output::arg("-v"), output::arg("--verbose"));
}
