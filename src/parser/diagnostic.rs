//! Lexical diagnostics
//!
//! The lexer never aborts. Every problem it notices becomes a [`LexDiagnostic`]
//! value collected next to the token list, and scanning carries on.

use super::ast::SourceLocation;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexDiagnostic {
    #[error("{location}: unterminated block comment")]
    UnterminatedComment { location: SourceLocation },

    #[error("{location}: unclosed bracket '{bracket}'")]
    UnclosedBracket {
        bracket: char,
        location: SourceLocation,
    },

    #[error("{location}: bracket mismatch, '{opener}' closed by '{closer}'")]
    MismatchedBracket {
        opener: char,
        closer: char,
        location: SourceLocation,
    },

    #[error("{location}: extra closing bracket '{bracket}'")]
    ExtraClosingBracket {
        bracket: char,
        location: SourceLocation,
    },

    #[error("{location}: '{text}' not recognized{}", suggestion_suffix(.suggestion))]
    UnrecognizedToken {
        text: String,
        suggestion: Option<&'static str>,
        location: SourceLocation,
    },
}

fn suggestion_suffix(suggestion: &Option<&'static str>) -> String {
    match suggestion {
        Some(rule) => format!(", did you mean '{rule}'?"),
        None => String::new(),
    }
}

impl LexDiagnostic {
    pub fn location(&self) -> SourceLocation {
        match self {
            LexDiagnostic::UnterminatedComment { location }
            | LexDiagnostic::UnclosedBracket { location, .. }
            | LexDiagnostic::MismatchedBracket { location, .. }
            | LexDiagnostic::ExtraClosingBracket { location, .. }
            | LexDiagnostic::UnrecognizedToken { location, .. } => *location,
        }
    }

    pub fn is_bracket_problem(&self) -> bool {
        matches!(
            self,
            LexDiagnostic::UnclosedBracket { .. }
                | LexDiagnostic::MismatchedBracket { .. }
                | LexDiagnostic::ExtraClosingBracket { .. }
        )
    }
}
