//! Property-based tests for the lexer.
//!
//! These tests use `proptest` to check lexer invariants over generated inputs:
//!
//! 1. **Lexer terminates** on arbitrary input, without panicking
//! 2. **Positions move forward**: tokens come out in source order
//! 3. **Lexer is deterministic**: same input, same tokens and diagnostics
//! 4. **Interning is stable**: equal lexemes of one class share an id
//! 5. **Valid fragments lex cleanly**

use proptest::prelude::*;
use rustc_hash::FxHashMap;

use super::lexer::tokenize;
use super::token::TokenClass;

/// Fragments that should lex without diagnostics.
const VALID_FRAGMENTS: &[&str] = &[
    "x := 42;",
    "var total float64 = 1.5;",
    "if a <= b && !done { a++ }",
    "for i := 0; i < 10; i++ { sum += i; }",
    "for k, v := range items { fmt.Println(k, v); }",
    "p := Point{X: 1, Y: -2};",
    "arr := [3]int{1, 2, 3};",
    "s := `raw\nstring`;",
    "msg := \"hello\";",
    "switch x { case 1, 2: y = 3; default: y = 0; }",
    "/* block */ // line",
    "x <<= 2; y >>= 1; z ^= w;",
];

fn valid_fragment() -> impl Strategy<Value = String> {
    prop::sample::select(VALID_FRAGMENTS).prop_map(std::string::ToString::to_string)
}

/// Go-flavoured soup: keywords, operators and brackets glued in any order.
fn token_soup() -> impl Strategy<Value = String> {
    let pieces = prop::sample::select(&[
        "func", "if", "iffy", "x", "_y1", "1", "2.5", "\"s\"", "`r`", "true", "(", ")", "{",
        "}", "[", "]", ":=", "=", "<<=", "++", "&&", ".", ",", ";", " ", "\n", "/*", "*/",
        "//", "@", "%", "é",
    ][..]);
    prop::collection::vec(pieces, 0..60).prop_map(|v| v.concat())
}

fn proptest_config() -> ProptestConfig {
    let default = ProptestConfig::default();
    ProptestConfig {
        cases: default.cases.max(256),
        ..default
    }
}

proptest! {
    #![proptest_config(proptest_config())]

    /// Property 1: arbitrary input always finishes lexing.
    #[test]
    fn lexer_terminates(input in "\\PC{0,400}") {
        let _ = tokenize(&input);
    }

    /// Property 1b: same for Go-flavoured input, which hits more rules.
    #[test]
    fn lexer_terminates_on_token_soup(input in token_soup()) {
        let _ = tokenize(&input);
    }

    /// Property 2: token locations are strictly increasing.
    #[test]
    fn token_locations_move_forward(input in token_soup()) {
        let out = tokenize(&input);
        for window in out.tokens.windows(2) {
            let prev = (window[0].line, window[0].column);
            let next = (window[1].line, window[1].column);
            prop_assert!(
                next > prev,
                "Token {:?} at {:?} does not follow {:?} at {:?} for input {:?}",
                window[1].text,
                next,
                window[0].text,
                prev,
                input,
            );
        }
        for token in &out.tokens {
            prop_assert!(token.line >= 1 && token.column >= 1);
            prop_assert!(!token.text.is_empty());
        }
    }

    /// Property 3: lexing is deterministic.
    #[test]
    fn lexer_deterministic(input in "\\PC{0,200}") {
        let first = tokenize(&input);
        let second = tokenize(&input);
        prop_assert_eq!(first.tokens, second.tokens);
        prop_assert_eq!(first.diagnostics, second.diagnostics);
    }

    /// Property 4: equal lexemes of one class always carry the same id,
    /// and each per-class list holds every lexeme once.
    #[test]
    fn interning_is_stable(input in token_soup()) {
        let out = tokenize(&input);
        let mut seen: FxHashMap<(TokenClass, &str), &str> = FxHashMap::default();
        for token in &out.tokens {
            let key = (token.kind.class(), token.text.as_str());
            let id = seen.entry(key).or_insert(token.id.as_str());
            prop_assert_eq!(*id, token.id.as_str(), "Id changed for {:?}", token.text);
        }
        for list in [&out.keywords, &out.operators, &out.punctuation] {
            let mut texts: Vec<&str> = list.iter().map(|t| t.text.as_str()).collect();
            let total = texts.len();
            texts.sort_unstable();
            texts.dedup();
            prop_assert_eq!(texts.len(), total);
        }
    }

    /// Property 5: known-valid fragments produce no diagnostics.
    #[test]
    fn valid_fragments_lex_cleanly(fragment in valid_fragment()) {
        let out = tokenize(&fragment);
        prop_assert!(
            out.diagnostics.is_empty(),
            "Unexpected diagnostics {:?} for {:?}",
            out.diagnostics,
            fragment,
        );
    }
}
