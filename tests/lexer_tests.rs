// Integration tests for the lexer

use gofront::parser::ast::SourceLocation;
use gofront::parser::diagnostic::LexDiagnostic;
use gofront::parser::lexer::tokenize;
use gofront::parser::token::TokenKind;

#[test]
fn test_boundary_lookahead_keeps_identifier_whole() {
    let out = tokenize("iffy = 1");
    assert!(out.diagnostics.is_empty());
    assert_eq!(out.tokens[0].kind, TokenKind::Ident);
    assert_eq!(out.tokens[0].text, "iffy");
    assert_eq!(out.tokens.len(), 3);
    assert!(out.keywords.is_empty());
}

#[test]
fn test_booleans_are_constants() {
    let out = tokenize("ok := true && falsey");
    let kinds: Vec<TokenKind> = out.tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Ident,
            TokenKind::ShortDeclaration,
            TokenKind::Boolean,
            TokenKind::Logical,
            TokenKind::Ident,
        ]
    );
}

#[test]
fn test_interning_is_first_seen_order() {
    let out = tokenize("a := b; b = a; c := 1; if a { }");
    let ids: Vec<(&str, &str)> = out
        .tokens
        .iter()
        .map(|t| (t.text.as_str(), t.id.as_str()))
        .collect();

    assert!(ids.contains(&("a", "N:0")));
    assert!(ids.contains(&("b", "N:1")));
    assert!(ids.contains(&("c", "N:2")));
    assert!(ids.contains(&("1", "N:3")));
    assert!(ids.contains(&(":=", "O:0")));
    assert!(ids.contains(&("=", "O:1")));
    assert!(ids.contains(&(";", "P:0")));
    assert!(ids.contains(&("if", "K:0")));

    let names: Vec<&str> = out.names.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(names, vec!["a", "b", "c", "1"]);
    assert_eq!(out.operators.len(), 2);
}

#[test]
fn test_balanced_brackets_produce_no_diagnostics() {
    let out = tokenize("func f(a []int) { x := a[0]; if (x > 1) { } }");
    assert!(out.diagnostics.is_empty());
}

#[test]
fn test_single_unclosed_paren() {
    let out = tokenize("x := f(1,\n  2");
    assert_eq!(
        out.diagnostics,
        vec![LexDiagnostic::UnclosedBracket {
            bracket: '(',
            location: SourceLocation::new(1, 7),
        }]
    );
}

#[test]
fn test_garbage_makes_progress() {
    let out = tokenize("@@@");
    assert!(out.tokens.is_empty());
    assert_eq!(out.diagnostics.len(), 3);
    let columns: Vec<usize> = out
        .diagnostics
        .iter()
        .map(|d| d.location().column)
        .collect();
    assert_eq!(columns, vec![1, 2, 3]);
}

#[test]
fn test_recovers_after_unrecognized_word() {
    let out = tokenize("x := 3abc + y");
    assert_eq!(out.diagnostics.len(), 1);
    let texts: Vec<&str> = out.tokens.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, vec!["x", ":=", "+", "y"]);
}

#[test]
fn test_fixture_lexes_cleanly() {
    let source = include_str!("fixtures/main.go");
    let out = tokenize(source);
    assert!(out.diagnostics.is_empty(), "{:?}", out.diagnostics);

    // Columns count characters, so Cyrillic text does not shift what follows.
    let price = out.tokens.iter().find(|t| t.text == "1200.50").unwrap();
    assert_eq!(price.kind, TokenKind::Float);
    assert_eq!((price.line, price.column), (12, 42));
}
