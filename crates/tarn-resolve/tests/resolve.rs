// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Resolution of whole programs.

use tarn_ast::decl::Program;
use tarn_ast::Span;
use tarn_lexer::{Keywords, Lexer};
use tarn_resolve::{resolve, Declaration, ScopeKind, SemanticError, SymbolKind};

fn parse_program(src: &str) -> Program {
    let keywords = Keywords::new();
    let result = Lexer::new(src, &keywords).tokenize();
    assert!(result.is_ok(), "Lex errors: {:?}", result.errors);
    match tarn_parser::parse(&result.tokens) {
        Ok(program) => program,
        Err(e) => panic!("Parse error in {:?}: {}", src, e),
    }
}

fn kinds(errors: &[SemanticError<'_>]) -> Vec<&'static str> {
    errors.iter().map(SemanticError::kind_name).collect()
}

#[test]
fn clean_program() {
    let program = parse_program(
        "let limit = 3;\n\
         fn square(n) { return n * n; }\n\
         proc show(v) { show(v); }\n\
         fn main() {\n\
             let total = 0;\n\
             for (let i = 0; i < limit; i = i + 1) { total = total + square(i); }\n\
             show(total);\n\
         }",
    );
    let resolution = resolve(&program);
    assert!(resolution.is_ok(), "unexpected errors: {:?}", kinds(&resolution.errors));
}

#[test]
fn redefinition_in_one_scope() {
    let program = parse_program("fn main() {\n    let x;\n    let x = 1;\n}");
    let resolution = resolve(&program);
    assert_eq!(resolution.errors.len(), 1, "errors: {:?}", kinds(&resolution.errors));
    let SemanticError::Redefinition { name, previous } = &resolution.errors[0] else {
        panic!("expected redefinition, got {:?}", resolution.errors[0]);
    };
    assert_eq!(name.span, Span::new(3, 9, 3, 10));
    assert_eq!(previous.span, Span::new(2, 9, 2, 10));
    assert_eq!(previous.id.qualified(), "global::main::x");

    // The first declaration stays in the table.
    let symbol = resolution.symbols.get("global::main::x").unwrap();
    assert_eq!(symbol.span, Span::new(2, 9, 2, 10));
}

#[test]
fn shadowing_in_a_nested_scope_is_not_a_redefinition() {
    let program = parse_program("fn main() { let x; { let x; } }");
    let resolution = resolve(&program);
    assert!(resolution.is_ok(), "errors: {:?}", kinds(&resolution.errors));
    assert!(resolution.symbols.get("global::main::block@1:20::x").is_some());
}

#[test]
fn enclosing_declarations_are_visible() {
    let program = parse_program(
        "fn main() {\n\
             let x = 1;\n\
             if (x > 0) {\n\
                 x = x + 1;\n\
                 while (x < 10) { x = x * 2; }\n\
             } else { x = 0; }\n\
         }",
    );
    let resolution = resolve(&program);
    assert!(resolution.is_ok(), "errors: {:?}", kinds(&resolution.errors));
}

#[test]
fn sibling_scopes_are_not_visible() {
    let program = parse_program("fn helper() { let x; } fn main() { x = 1; }");
    let resolution = resolve(&program);
    assert_eq!(kinds(&resolution.errors), vec!["use-before-definition"]);
    let SemanticError::UseBeforeDefinition { usage, definition } = &resolution.errors[0] else {
        unreachable!()
    };
    assert_eq!(usage.text, "x");
    assert!(definition.is_none());
}

#[test]
fn missing_main_is_reported_once() {
    let program = parse_program("let a;");
    let resolution = resolve(&program);
    assert_eq!(resolution.errors, vec![SemanticError::MissingMain]);

    let program = parse_program("fn helper() { let y; let y; undefined(); }");
    let resolution = resolve(&program);
    assert_eq!(
        kinds(&resolution.errors),
        vec!["redefinition", "use-before-definition", "missing-main"]
    );
}

#[test]
fn main_must_be_a_global_function() {
    let program = parse_program("fn outer() { fn main() { } }");
    let resolution = resolve(&program);
    assert_eq!(kinds(&resolution.errors), vec!["missing-main"]);
    let nested = resolution.symbols.get("global::outer::main").unwrap();
    assert_eq!(nested.kind, SymbolKind::Function);

    let program = parse_program("proc main() { }");
    assert_eq!(kinds(&resolve(&program).errors), vec!["missing-main"]);

    let program = parse_program("fn main() { }");
    let resolution = resolve(&program);
    assert!(resolution.is_ok());
    assert_eq!(resolution.symbols.get("global::main").unwrap().kind, SymbolKind::MainFunction);
}

#[test]
fn call_to_variable() {
    let program = parse_program("fn main() { let x = 1; x(); }");
    let resolution = resolve(&program);
    assert_eq!(kinds(&resolution.errors), vec!["call-to-variable"]);
    let SemanticError::CallToVariable { call, target } = &resolution.errors[0] else { unreachable!() };
    assert_eq!(call.name.text, "x");
    assert_eq!(target.kind, SymbolKind::Variable);
}

#[test]
fn assignment_to_callable() {
    let program = parse_program("fn f() { } proc p() { } fn main() { f = 2; p = 3; main = 4; }");
    let resolution = resolve(&program);
    assert_eq!(
        kinds(&resolution.errors),
        vec!["assignment-to-callable", "assignment-to-callable", "assignment-to-callable"]
    );
    let SemanticError::AssignmentToCallable { assignment, target } = &resolution.errors[2] else {
        unreachable!()
    };
    assert_eq!(assignment.name.text, "main");
    assert_eq!(target.kind, SymbolKind::MainFunction);
}

#[test]
fn procedure_as_value() {
    let program = parse_program("proc p() { } fn main() { p(); let v = p(); let w = p; v = 1 + p(); }");
    let resolution = resolve(&program);
    assert_eq!(
        kinds(&resolution.errors),
        vec!["procedure-as-value", "procedure-as-value", "procedure-as-value"]
    );
    for error in &resolution.errors {
        let SemanticError::ProcedureAsValue { usage, target } = error else { unreachable!() };
        assert_eq!(usage.text, "p");
        assert_eq!(target.id.qualified(), "global::p");
    }
}

#[test]
fn functions_are_values() {
    let program = parse_program("fn f() { return 1; } fn main() { let v = f() + f(); return f; }");
    assert!(resolve(&program).is_ok());
}

#[test]
fn forward_reference_is_use_before_definition() {
    let program = parse_program("fn main() { helper(); }\nfn helper() { }");
    let resolution = resolve(&program);
    assert_eq!(kinds(&resolution.errors), vec!["use-before-definition"]);
    let SemanticError::UseBeforeDefinition { usage, definition } = &resolution.errors[0] else {
        unreachable!()
    };
    assert_eq!(usage.span, Span::new(1, 13, 1, 19));
    let definition = definition.as_ref().expect("definition should be attached");
    assert_eq!(definition.id.qualified(), "global::helper");
    assert_eq!(definition.span, Span::new(2, 4, 2, 10));
}

#[test]
fn undefined_name_has_no_definition() {
    let program = parse_program("fn main() { missing(1); }");
    let resolution = resolve(&program);
    let SemanticError::UseBeforeDefinition { usage, definition } = &resolution.errors[0] else {
        panic!("expected use-before-definition, got {:?}", resolution.errors);
    };
    assert_eq!(usage.text, "missing");
    assert!(definition.is_none());
    assert_eq!(resolution.errors[0].to_string(), "undefined symbol: `missing`");
}

#[test]
fn initializer_is_resolved_before_its_name() {
    let program = parse_program("fn main() { let x = x; }");
    let resolution = resolve(&program);
    let SemanticError::UseBeforeDefinition { definition, .. } = &resolution.errors[0] else {
        panic!("expected use-before-definition, got {:?}", resolution.errors);
    };
    assert_eq!(definition.as_ref().map(|d| d.id.qualified()), Some("global::main::x"));
}

#[test]
fn recursion_resolves() {
    let program = parse_program(
        "fn fact(n) { if (n < 2) { return 1; } return n * fact(n - 1); }\n\
         fn main() { fact(5); }",
    );
    assert!(resolve(&program).is_ok());
}

#[test]
fn parameters_live_in_the_callable_scope() {
    let program = parse_program("fn add(a, b) { return a + b; } fn main() { add(1, 2); }");
    let resolution = resolve(&program);
    assert!(resolution.is_ok());
    let a = resolution.symbols.get("global::add::a").unwrap();
    assert_eq!(a.kind, SymbolKind::Variable);
    assert!(matches!(a.declaration, Declaration::Parameter(leaf) if leaf.text == "a"));

    let program = parse_program("fn add(a, a) { } fn main() { }");
    assert_eq!(kinds(&resolve(&program).errors), vec!["redefinition"]);
}

#[test]
fn for_init_lives_in_the_loop_scope() {
    let program = parse_program("fn main() { for (let i = 0; i < 3; i = i + 1) { } i = 5; }");
    let resolution = resolve(&program);
    assert_eq!(kinds(&resolution.errors), vec!["use-before-definition"]);
    assert!(resolution.symbols.get("global::main::for@1:13::i").is_some());
}

#[test]
fn redefined_callable_gets_a_positioned_scope() {
    let program = parse_program("fn f() { } fn f() { let y; } fn main() { }");
    let resolution = resolve(&program);
    assert_eq!(kinds(&resolution.errors), vec!["redefinition"]);
    assert!(resolution.symbols.get("global::f@1:15::y").is_some());

    let root = resolution.scopes.get(resolution.scopes.root()).unwrap();
    let names: Vec<&str> = root
        .children
        .iter()
        .map(|&id| resolution.scopes.get(id).unwrap().name.as_str())
        .collect();
    assert_eq!(names, vec!["f", "f@1:15", "main"]);
}

#[test]
fn scope_tree_mirrors_nesting() {
    let program = parse_program(
        "fn main() {\n\
         if (true) { } else if (false) { } else { }\n\
         switch (1) { case 1 { } }\n\
         while (false) { }\n\
         }",
    );
    let resolution = resolve(&program);
    assert!(resolution.is_ok());
    let names: Vec<String> = resolution
        .scopes
        .iter()
        .map(|scope| resolution.scopes.path(scope.id).join("::"))
        .collect();
    assert_eq!(
        names,
        vec![
            "global",
            "global::main",
            "global::main::if@2:1",
            "global::main::elseif@2:15",
            "global::main::else@2:35",
            "global::main::case@3:14",
            "global::main::while@4:1",
        ]
    );
    let kinds: Vec<ScopeKind> = resolution.scopes.iter().map(|scope| scope.kind).collect();
    assert_eq!(kinds[0], ScopeKind::Global);
    assert_eq!(kinds[1], ScopeKind::Callable);
    assert!(kinds[2..].iter().all(|kind| *kind == ScopeKind::Block));
}

#[test]
fn errors_are_ordered_walk_then_deferred_then_main() {
    let program = parse_program("fn helper() { later(); let v = 1; v(); }\nfn later() { }");
    let resolution = resolve(&program);
    assert_eq!(
        kinds(&resolution.errors),
        vec!["call-to-variable", "use-before-definition", "missing-main"]
    );
}
