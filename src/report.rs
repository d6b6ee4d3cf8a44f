//! Report writers: fixed-width token tables and pretty JSON artifacts.

use crate::parser::ast::Program;
use crate::parser::lexer::LexOutput;
use crate::parser::symbols::{ImportEntry, SymbolTable};
use crate::parser::token::Token;
use serde::Serialize;
use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::Path;
use tracing::info;

const RULE: &str = "=========================================================";

/// Render tokens as the `Lexeme / Token type / Row / Column / Id` table.
pub fn token_table(tokens: &[Token]) -> String {
    let mut table = String::new();
    let _ = writeln!(
        table,
        "{:<25} {:<15} {:<5} {:<5} {:<5}",
        "Lexeme", "Token type", "Row", "Column", "Id"
    );
    table.push_str(RULE);
    table.push('\n');
    for token in tokens {
        let _ = writeln!(
            table,
            "{:<25} {:<15} {:<5} {:<5} {:<5}",
            token.text,
            token.kind.name(),
            token.line,
            token.column,
            token.id
        );
    }
    table
}

/// Write the master token list and the four per-class lists.
pub fn write_token_tables(out_dir: &Path, lexed: &LexOutput) -> io::Result<()> {
    fs::create_dir_all(out_dir)?;
    let tables: [(&str, &[Token]); 5] = [
        ("result.txt", &lexed.tokens),
        ("keywords.txt", &lexed.keywords),
        ("operators.txt", &lexed.operators),
        ("names.txt", &lexed.names),
        ("punctuations.txt", &lexed.punctuation),
    ];
    for (file, tokens) in tables {
        fs::write(out_dir.join(file), token_table(tokens))?;
        info!(file, rows = tokens.len(), "wrote token table");
    }
    Ok(())
}

/// Write `cst.json`, `symbol_table.json` and `imports.json`.
pub fn write_parse_artifacts(
    out_dir: &Path,
    program: &Program,
    symbols: &SymbolTable,
    imports: &[ImportEntry],
) -> io::Result<()> {
    fs::create_dir_all(out_dir)?;
    write_json(&out_dir.join("cst.json"), program)?;
    write_json(&out_dir.join("symbol_table.json"), symbols)?;
    write_json(&out_dir.join("imports.json"), &imports)?;
    Ok(())
}

/// Pretty-print `value` as UTF-8 JSON with two-space indentation.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
    fs::write(path, json)?;
    info!(path = %path.display(), "wrote json");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::tokenize;
    use crate::parser::parse::Parser;

    #[test]
    fn test_token_table_layout() {
        let out = tokenize("x := 1");
        let table = token_table(&out.tokens);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("Lexeme                    Token type      Row   Column Id"));
        assert_eq!(lines[1].len(), 57);
        assert_eq!(&lines[2][..26], "x                         ");
        assert_eq!(&lines[2][26..42], "ident           ");
        assert!(lines[3].contains("short_declaration"));
        assert!(lines[4].ends_with("N:1  "));
    }

    #[test]
    fn test_write_reports() {
        let dir = tempfile::tempdir().unwrap();
        let source = "package main;\nimport \"fmt\";\nfunc main() { x := \"é\"; }";
        let lexed = tokenize(source);
        let mut parser = Parser::new(lexed.tokens.clone());
        let program = parser.parse().unwrap();

        write_token_tables(dir.path(), &lexed).unwrap();
        write_parse_artifacts(dir.path(), &program, parser.symbol_table(), parser.imports()).unwrap();

        for file in [
            "result.txt",
            "keywords.txt",
            "operators.txt",
            "names.txt",
            "punctuations.txt",
            "cst.json",
            "symbol_table.json",
            "imports.json",
        ] {
            assert!(dir.path().join(file).exists(), "{file} missing");
        }

        let imports = fs::read_to_string(dir.path().join("imports.json")).unwrap();
        let imports: serde_json::Value = serde_json::from_str(&imports).unwrap();
        assert_eq!(imports[0]["Package"]["Name"], "fmt");

        let symbols = fs::read_to_string(dir.path().join("symbol_table.json")).unwrap();
        assert!(symbols.contains('é'));
        assert!(symbols.contains("\n  \""));
    }
}
