//! # Introduction
//!
//! gofront is a front end for a subset of Go: it tokenizes source text,
//! builds a concrete syntax tree with a symbol table, and writes both out as
//! token tables and JSON. An optional terminal UI built with
//! [ratatui](https://docs.rs/ratatui) steps through the token stream.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Tokens → Parser → CST + Symbols + Imports → Reports / TUI
//! ```
//!
//! 1. [`parser`]: tokenization, lexical diagnostics, recursive descent parsing
//!    into [`parser::ast::Program`] and the [`parser::symbols::SymbolTable`].
//! 2. [`report`]: fixed-width token tables and pretty-printed JSON files.
//! 3. [`config`]: command-line options of the `gofront` binary.
//! 4. [`ui`]: ratatui-based token explorer; not part of the stable library API.
//!
//! Lexing never fails: problems come back as
//! [`parser::diagnostic::LexDiagnostic`] values. Parsing stops at the first
//! structural error with a [`parser::parse::ParseError`].

pub mod config;
pub mod parser;
pub mod report;
pub mod ui;
