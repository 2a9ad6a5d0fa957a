// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! Integration tests for the `tarn` binary.
//! Each test runs a phase command over a fixture and checks the exit
//! status and output.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn tarn(args: &[&str], fixture_name: &str) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tarn"))
        .args(args)
        .arg(fixture(fixture_name))
        .env("NO_COLOR", "1")
        .output()
        .expect("failed to run tarn")
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).to_string()
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).to_string()
}

#[test]
fn check_accepts_valid_programs() {
    for name in ["hello.tarn", "clean.tarn"] {
        let out = tarn(&["check"], name);
        assert!(out.status.success(), "{} should check cleanly:\n{}", name, stderr(&out));
        assert!(stdout(&out).contains("Check OK"), "{}", stdout(&out));
    }
}

#[test]
fn lex_prints_tokens() {
    let out = tarn(&["lex"], "clean.tarn");
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.contains("Fn"), "{}", text);
    assert!(text.contains("twice"), "{}", text);
    assert!(text.contains("Eof"), "{}", text);
}

#[test]
fn parse_prints_declarations() {
    let out = tarn(&["parse"], "hello.tarn");
    assert!(out.status.success(), "{}", stderr(&out));
    assert!(stdout(&out).contains("AST (3 declarations)"), "{}", stdout(&out));
}

#[test]
fn resolve_prints_scopes_and_symbols() {
    let out = tarn(&["resolve"], "hello.tarn");
    assert!(out.status.success(), "{}", stderr(&out));
    let text = stdout(&out);
    assert!(text.contains("global"), "{}", text);
    assert!(text.contains("for@16:5"), "{}", text);
    assert!(text.contains("MainFunction"), "{}", text);
}

#[test]
fn syntax_error_points_at_the_next_token() {
    let out = tarn(&["parse"], "syntax_error.tarn");
    assert_eq!(out.status.code(), Some(1));
    let text = stderr(&out);
    assert!(text.contains("error[E0100]"), "{}", text);
    assert!(text.contains("expected ';', found identifier 'x'"), "{}", text);
    assert!(text.contains("syntax_error.tarn:3:5"), "{}", text);
    assert!(text.contains("Parse FAILED: 1 error"), "{}", text);
}

#[test]
fn lex_error_stops_the_pipeline() {
    let out = tarn(&["check"], "lex_error.tarn");
    assert_eq!(out.status.code(), Some(1));
    let text = stderr(&out);
    assert!(text.contains("error[E0001]"), "{}", text);
    assert!(text.contains("Unexpected character '$'"), "{}", text);
    assert!(text.contains("Lex FAILED"), "{}", text);
}

#[test]
fn semantic_errors_are_all_reported() {
    let out = tarn(&["resolve"], "semantic_errors.tarn");
    assert_eq!(out.status.code(), Some(1));
    let text = stderr(&out);
    for code in ["E0202", "E0200", "E0203"] {
        assert!(text.contains(&format!("error[{}]", code)), "missing {}:\n{}", code, text);
    }
    assert!(text.contains("Resolve FAILED: 3 errors"), "{}", text);
}

#[test]
fn json_report_on_failure() {
    let out = tarn(&["check", "--json"], "semantic_errors.tarn");
    assert_eq!(out.status.code(), Some(1));
    let text = stdout(&out);
    assert!(text.contains("\"phase\": \"resolve\""), "{}", text);
    assert!(text.contains("\"success\": false"), "{}", text);
    assert!(text.contains("\"code\": \"E0203\""), "{}", text);
    assert!(text.contains("\"category\": \"Resolution\""), "{}", text);
}

#[test]
fn json_report_on_success() {
    let out = tarn(&["check", "--json"], "clean.tarn");
    assert!(out.status.success());
    assert!(stdout(&out).contains("\"success\": true"), "{}", stdout(&out));
}

#[test]
fn verbose_prints_phase_counts() {
    let out = tarn(&["check", "--verbose"], "clean.tarn");
    assert!(out.status.success());
    let text = stderr(&out);
    assert!(text.contains("Lexed"), "{}", text);
    assert!(text.contains("Parsed 2 declarations"), "{}", text);
    assert!(text.contains("Resolved"), "{}", text);
}

#[test]
fn missing_file_fails() {
    let out = tarn(&["check"], "does_not_exist.tarn");
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("reading"), "{}", stderr(&out));
}
