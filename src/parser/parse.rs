//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including the error type, helper methods, and the main parse entry point.
//!
//! # Parser Architecture
//!
//! The Parser uses a recursive descent approach with the following organization:
//! - This module: Parser struct, helper methods, and coordination
//! - `declarations`: package, import, type and function declarations
//! - `statements`: statements inside function bodies
//! - `expressions`: expressions, one method per precedence tier
//!
//! # State
//!
//! Besides the token cursor the parser owns a node counter. Every consumed
//! token or literal that ends up in the tree is tagged with the next counter
//! value, so ordinals increase in emission order and never rewind. The scope
//! that receives declarations is passed down explicitly as `scope`.
//!
//! Parsing stops at the first structural error.

use crate::parser::ast::*;
use crate::parser::lexer::Lexer;
use crate::parser::symbols::{ImportEntry, SymbolTable, GLOBAL_SCOPE};
use crate::parser::token::{Token, TokenKind};
use thiserror::Error;
use tracing::debug;

/// Parser error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("{location}: unexpected '{found}', expected {expected}")]
    UnexpectedToken {
        expected: String,
        found: String,
        location: SourceLocation,
    },

    #[error("{location}: expected {expected} {context}, found '{found}'")]
    MissingExpectedToken {
        expected: String,
        context: String,
        found: String,
        location: SourceLocation,
    },

    #[error("{location}: multiple 'default' clauses are not allowed")]
    DuplicateDefaultClause { location: SourceLocation },

    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEndOfInput { expected: String },
}

impl ParseError {
    pub fn location(&self) -> Option<SourceLocation> {
        match self {
            ParseError::UnexpectedToken { location, .. }
            | ParseError::MissingExpectedToken { location, .. }
            | ParseError::DuplicateDefaultClause { location } => Some(*location),
            ParseError::UnexpectedEndOfInput { .. } => None,
        }
    }
}

/// Recursive descent parser for the Go-style subset
pub struct Parser {
    pub(crate) tokens: Vec<Token>,
    pub(crate) position: usize,
    pub(crate) next_pos: Pos,
    pub(crate) symbols: SymbolTable,
    pub(crate) imports: Vec<ImportEntry>,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            position: 0,
            next_pos: 0,
            symbols: SymbolTable::new(),
            imports: Vec::new(),
        }
    }

    /// Lex `source` and build a parser over its tokens, dropping diagnostics.
    pub fn from_source(source: &str) -> Self {
        Self::new(Lexer::new(source).tokenize().tokens)
    }

    /// Parse the entire program (top-level declarations)
    pub fn parse(&mut self) -> Result<Program, ParseError> {
        let mut program = Program::new();

        while let Some(token) = self.peek() {
            debug!(kind = %token.kind, text = %token.text, position = self.position, "top-level item");
            let kind = token.kind;
            match kind {
                TokenKind::Package => program.children.push(self.parse_package()?),
                TokenKind::Import => program.children.push(self.parse_import()?),
                TokenKind::Type => program.children.push(self.parse_type_declaration()?),
                TokenKind::Func => program.children.push(self.parse_function()?),
                TokenKind::Ident if self.starts_short_declaration() => {
                    let decl = self.parse_variable_declaration(GLOBAL_SCOPE, true)?;
                    program.children.push(Decl::VariableDeclaration(decl));
                }
                _ => {
                    self.advance();
                }
            }
        }

        Ok(program)
    }

    pub fn symbol_table(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn imports(&self) -> &[ImportEntry] {
        &self.imports
    }

    /// Index of the token the parser stopped at
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn current_token(&self) -> Option<&Token> {
        self.peek()
    }

    // ===== Helper methods =====

    pub(crate) fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    pub(crate) fn peek_ahead(&self, n: usize) -> Option<&Token> {
        self.tokens.get(self.position + n)
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.peek().is_some_and(|t| t.kind == kind)
    }

    pub(crate) fn check_ahead(&self, n: usize, kind: TokenKind) -> bool {
        self.peek_ahead(n).is_some_and(|t| t.kind == kind)
    }

    pub(crate) fn check_text(&self, kind: TokenKind, text: &str) -> bool {
        self.peek().is_some_and(|t| t.kind == kind && t.text == text)
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.position >= self.tokens.len()
    }

    pub(crate) fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.position).cloned();
        if token.is_some() {
            self.position += 1;
        }
        token
    }

    /// Consume a token of `kind` without tagging it, returning its text
    pub(crate) fn advance_if(&mut self, kind: TokenKind) -> Option<String> {
        if self.check(kind) {
            self.advance().map(|t| t.text)
        } else {
            None
        }
    }

    /// Hand out the next node ordinal.
    pub(crate) fn next_pos(&mut self) -> Pos {
        let pos = self.next_pos;
        self.next_pos += 1;
        pos
    }

    /// `ident` followed by `:=` or `,`
    pub(crate) fn starts_short_declaration(&self) -> bool {
        self.check(TokenKind::Ident)
            && (self.check_ahead(1, TokenKind::ShortDeclaration)
                || self.check_ahead(1, TokenKind::Comma))
    }

    /// Consume the current token if it has `kind`, tagged with the next ordinal.
    pub(crate) fn match_token(&mut self, kind: TokenKind) -> Option<Leaf> {
        let token = self.tokens.get(self.position).filter(|t| t.kind == kind)?;
        let leaf = Leaf::new(token.kind.name(), token.text.clone(), self.next_pos);
        self.next_pos += 1;
        self.position += 1;
        Some(leaf)
    }

    pub(crate) fn expect_token(
        &mut self,
        kind: TokenKind,
        expected: &str,
        ctx: &str,
    ) -> Result<Leaf, ParseError> {
        self.match_token(kind)
            .ok_or_else(|| self.missing(expected, ctx))
    }

    pub(crate) fn expect_lparen(&mut self, ctx: &str) -> Result<Leaf, ParseError> {
        self.expect_token(TokenKind::LPar, "'('", ctx)
    }

    pub(crate) fn expect_rparen(&mut self, ctx: &str) -> Result<Leaf, ParseError> {
        self.expect_token(TokenKind::RPar, "')'", ctx)
    }

    pub(crate) fn expect_lbrace(&mut self, ctx: &str) -> Result<Leaf, ParseError> {
        self.expect_token(TokenKind::LBrace, "'{'", ctx)
    }

    pub(crate) fn expect_rbrace(&mut self, ctx: &str) -> Result<Leaf, ParseError> {
        self.expect_token(TokenKind::RBrace, "'}'", ctx)
    }

    pub(crate) fn expect_semicolon(&mut self, ctx: &str) -> Result<Leaf, ParseError> {
        self.expect_token(TokenKind::Semicolon, "';'", ctx)
    }

    pub(crate) fn expect_identifier(&mut self, ctx: &str) -> Result<Leaf, ParseError> {
        self.expect_token(TokenKind::Ident, "identifier", ctx)
    }

    /// A required token is absent at the cursor.
    pub(crate) fn missing(&self, expected: &str, ctx: &str) -> ParseError {
        match self.peek() {
            Some(token) => ParseError::MissingExpectedToken {
                expected: expected.to_string(),
                context: ctx.to_string(),
                found: token.text.clone(),
                location: token.location(),
            },
            None => ParseError::UnexpectedEndOfInput {
                expected: format!("{expected} {ctx}"),
            },
        }
    }

    /// The token at the cursor cannot start the construct being parsed.
    pub(crate) fn unexpected(&self, expected: &str) -> ParseError {
        match self.peek() {
            Some(token) => ParseError::UnexpectedToken {
                expected: expected.to_string(),
                found: token.text.clone(),
                location: token.location(),
            },
            None => ParseError::UnexpectedEndOfInput {
                expected: expected.to_string(),
            },
        }
    }
}
