//! Go-style source front end
//!
//! This module turns source text into tokens, a concrete syntax tree and a
//! symbol table:
//! - [`token`]: token kinds and the ordered matching catalog
//! - [`lexer`]: tokenization with interning and lexical diagnostics
//! - [`parse`]: the [`parse::Parser`] cursor and its error type
//! - [`ast`]: tree node definitions (serialized as-is to JSON)
//! - [`symbols`]: scopes, struct types and import entries
//!
//! # Supported Subset
//!
//! - Top level: `package`, `import` (single or grouped), `type ... struct`,
//!   functions with optional receivers, short declarations
//! - Statements: `var`, `:=`, `if/else`, `for` (three-clause, condition,
//!   infinite, `range`), `switch`, `return`, `break`, `continue`
//! - Expressions: arithmetic, comparison, logical, calls, field access,
//!   indexing, slicing, struct and array literals
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent that stops at the first structural error.
//! Lexing keeps going after errors and collects diagnostics instead.

pub mod ast;
mod declarations;
pub mod diagnostic;
mod expressions;
pub mod lexer;
pub mod parse;
mod statements;
pub mod suggest;
pub mod symbols;
pub mod token;

#[cfg(test)]
mod lexer_property_tests;
