//! Lexer (tokenizer) for Go-style source code
//!
//! Converts raw source text into a flat [`Token`] stream consumed by the parser.
//! Rules from [`catalog`] are tried in order at the cursor and the first one
//! that matches wins. Keyword and constant rules additionally require that the
//! match is not followed by a word character or `.`, so `iffy` stays one
//! identifier.
//!
//! Every lexeme is interned per class (names, operators, punctuation,
//! keywords) and the token's `id` records its class label and sequence number.
//! Problems are collected as [`LexDiagnostic`]s; the lexer itself never fails.

use super::ast::SourceLocation;
use super::diagnostic::LexDiagnostic;
use super::suggest::closest_match;
use super::token::{catalog, keyword_and_operator_names, Token, TokenClass, TokenKind};
use regex::Regex;
use rustc_hash::FxHashMap;
use std::sync::LazyLock;
use tracing::{debug, trace};

static WORD_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\w+").expect("valid regex"));

/// Everything one lexing pass produces.
///
/// `tokens` is the master list. The four per-class lists hold only the first
/// occurrence of each distinct lexeme.
#[derive(Debug, Clone, Default)]
pub struct LexOutput {
    pub tokens: Vec<Token>,
    pub keywords: Vec<Token>,
    pub operators: Vec<Token>,
    pub names: Vec<Token>,
    pub punctuation: Vec<Token>,
    pub diagnostics: Vec<LexDiagnostic>,
}

impl LexOutput {
    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

/// First-seen numbering of lexemes within one class
#[derive(Debug, Default)]
struct Interner {
    table: FxHashMap<String, usize>,
}

impl Interner {
    /// Returns the lexeme's number and whether this is its first occurrence.
    fn intern(&mut self, text: &str) -> (usize, bool) {
        if let Some(&id) = self.table.get(text) {
            return (id, false);
        }
        let id = self.table.len();
        self.table.insert(text.to_string(), id);
        (id, true)
    }
}

/// Lexer for Go-style source code
pub struct Lexer {
    source: String,
    position: usize,
    line_starts: Vec<usize>,
    names: Interner,
    operators: Interner,
    punctuation: Interner,
    keywords: Interner,
    brackets: Vec<(char, SourceLocation)>,
    output: LexOutput,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(source: &str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self {
            source: source.to_string(),
            position: 0,
            line_starts,
            names: Interner::default(),
            operators: Interner::default(),
            punctuation: Interner::default(),
            keywords: Interner::default(),
            brackets: Vec::new(),
            output: LexOutput::default(),
        }
    }

    /// Tokenize the entire input
    pub fn tokenize(&mut self) -> LexOutput {
        while !self.is_at_end() {
            self.step();
        }

        // Leftover openers are reported innermost first.
        while let Some((bracket, location)) = self.brackets.pop() {
            self.report(LexDiagnostic::UnclosedBracket { bracket, location });
        }

        debug!(
            tokens = self.output.tokens.len(),
            diagnostics = self.output.diagnostics.len(),
            "lexing finished"
        );
        std::mem::take(&mut self.output)
    }

    /// Consume at least one character from the input.
    fn step(&mut self) {
        let rest = &self.source[self.position..];

        if rest.starts_with("/*") {
            match rest.find("*/") {
                Some(end) => self.position += end + 2,
                None => {
                    let location = self.location_of(self.position);
                    self.report(LexDiagnostic::UnterminatedComment { location });
                    self.position = self.source.len();
                }
            }
            return;
        }

        if rest.starts_with("//") {
            self.position += rest.find('\n').map_or(rest.len(), |nl| nl + 1);
            return;
        }

        if let Some((kind, len)) = self.match_rule(rest) {
            self.accept(kind, len);
            return;
        }

        self.skip_unrecognized();
    }

    /// First catalog rule that matches at the cursor, with its length in bytes
    fn match_rule(&self, rest: &str) -> Option<(TokenKind, usize)> {
        catalog().iter().find_map(|rule| {
            let len = rule.match_len(rest).filter(|len| *len > 0)?;
            if rule.class().needs_boundary() && !Self::at_boundary(rest, len) {
                return None;
            }
            Some((rule.kind, len))
        })
    }

    /// True when the match of `len` bytes is not followed by `\w` or `.`
    fn at_boundary(rest: &str, len: usize) -> bool {
        match rest[len..].chars().next() {
            None => true,
            Some(c) => !(c.is_alphanumeric() || c == '_' || c == '.'),
        }
    }

    fn accept(&mut self, kind: TokenKind, len: usize) {
        let start = self.position;
        let text = self.source[start..start + len].to_string();
        self.position += len;

        let class = kind.class();
        let (label, interner) = match class {
            TokenClass::Skip => return,
            TokenClass::Variable | TokenClass::Constant => ('N', &mut self.names),
            TokenClass::Operator => ('O', &mut self.operators),
            TokenClass::Punctuation => ('P', &mut self.punctuation),
            TokenClass::Keyword => ('K', &mut self.keywords),
        };
        let interned = if kind == TokenKind::RawString {
            text.replace('`', "")
        } else {
            text.clone()
        };
        let (sequence, first_seen) = interner.intern(&interned);

        let location = self.location_of(start);
        let token = Token {
            kind,
            text,
            line: location.line,
            column: location.column,
            id: format!("{label}:{sequence}"),
        };
        trace!(kind = %token.kind, text = %token.text, id = %token.id, "token");

        if class == TokenClass::Punctuation {
            self.track_bracket(&token);
        }

        if first_seen {
            let list = match class {
                TokenClass::Keyword => &mut self.output.keywords,
                TokenClass::Operator => &mut self.output.operators,
                TokenClass::Punctuation => &mut self.output.punctuation,
                _ => &mut self.output.names,
            };
            list.push(token.clone());
        }
        self.output.tokens.push(token);
    }

    fn track_bracket(&mut self, token: &Token) {
        let location = token.location();
        let Some(c) = token.text.chars().next() else {
            return;
        };
        match c {
            '(' | '{' | '[' => self.brackets.push((c, location)),
            ')' | '}' | ']' => match self.brackets.pop() {
                None => self.report(LexDiagnostic::ExtraClosingBracket {
                    bracket: c,
                    location,
                }),
                Some((opener, _)) if closer_for(opener) != c => {
                    self.report(LexDiagnostic::MismatchedBracket {
                        opener,
                        closer: c,
                        location,
                    })
                }
                Some(_) => {}
            },
            _ => {}
        }
    }

    /// Nothing in the catalog matched: skip a word run or a single character.
    fn skip_unrecognized(&mut self) {
        let rest = &self.source[self.position..];
        let location = self.location_of(self.position);

        let (text, len, suggestion) = match WORD_RUN.find(rest) {
            Some(word) => {
                let text = word.as_str().to_string();
                let suggestion = closest_match(&text, &keyword_and_operator_names());
                (text, word.end(), suggestion)
            }
            None => {
                let c = rest.chars().next().unwrap_or_default();
                (c.to_string(), c.len_utf8().max(1), None)
            }
        };

        self.position += len;
        self.report(LexDiagnostic::UnrecognizedToken {
            text,
            suggestion,
            location,
        });
    }

    fn report(&mut self, diagnostic: LexDiagnostic) {
        debug!(%diagnostic, "lexical diagnostic");
        self.output.diagnostics.push(diagnostic);
    }

    /// 1-based line and column (in characters) of a byte offset
    fn location_of(&self, offset: usize) -> SourceLocation {
        let line_index = self.line_starts.partition_point(|&start| start <= offset) - 1;
        let line_start = self.line_starts[line_index];
        let column = self.source[line_start..offset].chars().count() + 1;
        SourceLocation::new(line_index + 1, column)
    }

    /// Check if at end of input
    fn is_at_end(&self) -> bool {
        self.position >= self.source.len()
    }
}

fn closer_for(opener: char) -> char {
    match opener {
        '(' => ')',
        '[' => ']',
        _ => '}',
    }
}

/// Lex `source` in one call.
pub fn tokenize(source: &str) -> LexOutput {
    Lexer::new(source).tokenize()
}
