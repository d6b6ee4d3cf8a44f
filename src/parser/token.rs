//! Token model shared by the lexer and the parser
//!
//! A [`TokenKind`] names one rule of the lexer's catalog and fixes its
//! grammatical [`TokenClass`]. The catalog itself ([`catalog`]) pairs every
//! kind with an anchored pattern; its order is the match priority.

use super::ast::SourceLocation;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;

/// Grammatical class of a token rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenClass {
    Keyword,
    Operator,
    Variable,
    Constant,
    Punctuation,
    Skip,
}

impl TokenClass {
    /// Rules of these classes must not be followed by a word character or `.`
    pub fn needs_boundary(self) -> bool {
        matches!(self, TokenClass::Keyword | TokenClass::Constant)
    }
}

/// Every rule the lexer knows, by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    // Keywords
    If,
    Else,
    For,
    Switch,
    Case,
    Default,
    Break,
    Continue,
    Return,
    Func,
    Package,
    Import,
    Var,
    Const,
    Type,
    Struct,
    Interface,
    Go,
    Chan,
    Select,
    Defer,
    Fallthrough,
    Goto,
    Map,
    Range,

    // Operators
    Comparison,
    Assignment,
    ShortDeclaration,
    IncrementDecrement,
    Arithmetic,
    Logical,
    Bitwise,
    Unary,

    // Names
    Ident,

    // Literals
    Integer,
    Float,
    String,
    RawString,
    Boolean,

    // Punctuation
    #[serde(rename = "lpar")]
    LPar,
    #[serde(rename = "rpar")]
    RPar,
    #[serde(rename = "lbrace")]
    LBrace,
    #[serde(rename = "rbrace")]
    RBrace,
    #[serde(rename = "lbracket")]
    LBracket,
    #[serde(rename = "rbracket")]
    RBracket,
    Comma,
    Semicolon,
    Dot,
    Colon,

    // Skipped
    #[serde(rename = "SPACE")]
    Space,
    #[serde(rename = "COMMENT")]
    Comment,
}

impl TokenKind {
    /// Rule name as it appears in reports and diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::For => "for",
            TokenKind::Switch => "switch",
            TokenKind::Case => "case",
            TokenKind::Default => "default",
            TokenKind::Break => "break",
            TokenKind::Continue => "continue",
            TokenKind::Return => "return",
            TokenKind::Func => "func",
            TokenKind::Package => "package",
            TokenKind::Import => "import",
            TokenKind::Var => "var",
            TokenKind::Const => "const",
            TokenKind::Type => "type",
            TokenKind::Struct => "struct",
            TokenKind::Interface => "interface",
            TokenKind::Go => "go",
            TokenKind::Chan => "chan",
            TokenKind::Select => "select",
            TokenKind::Defer => "defer",
            TokenKind::Fallthrough => "fallthrough",
            TokenKind::Goto => "goto",
            TokenKind::Map => "map",
            TokenKind::Range => "range",
            TokenKind::Comparison => "comparison",
            TokenKind::Assignment => "assignment",
            TokenKind::ShortDeclaration => "short_declaration",
            TokenKind::IncrementDecrement => "increment_decrement",
            TokenKind::Arithmetic => "arithmetic",
            TokenKind::Logical => "logical",
            TokenKind::Bitwise => "bitwise",
            TokenKind::Unary => "unary",
            TokenKind::Ident => "ident",
            TokenKind::Integer => "integer",
            TokenKind::Float => "float",
            TokenKind::String => "string",
            TokenKind::RawString => "raw_string",
            TokenKind::Boolean => "boolean",
            TokenKind::LPar => "lpar",
            TokenKind::RPar => "rpar",
            TokenKind::LBrace => "lbrace",
            TokenKind::RBrace => "rbrace",
            TokenKind::LBracket => "lbracket",
            TokenKind::RBracket => "rbracket",
            TokenKind::Comma => "comma",
            TokenKind::Semicolon => "semicolon",
            TokenKind::Dot => "dot",
            TokenKind::Colon => "colon",
            TokenKind::Space => "SPACE",
            TokenKind::Comment => "COMMENT",
        }
    }

    pub fn class(self) -> TokenClass {
        match self {
            TokenKind::If
            | TokenKind::Else
            | TokenKind::For
            | TokenKind::Switch
            | TokenKind::Case
            | TokenKind::Default
            | TokenKind::Break
            | TokenKind::Continue
            | TokenKind::Return
            | TokenKind::Func
            | TokenKind::Package
            | TokenKind::Import
            | TokenKind::Var
            | TokenKind::Const
            | TokenKind::Type
            | TokenKind::Struct
            | TokenKind::Interface
            | TokenKind::Go
            | TokenKind::Chan
            | TokenKind::Select
            | TokenKind::Defer
            | TokenKind::Fallthrough
            | TokenKind::Goto
            | TokenKind::Map
            | TokenKind::Range => TokenClass::Keyword,
            TokenKind::Comparison
            | TokenKind::Assignment
            | TokenKind::ShortDeclaration
            | TokenKind::IncrementDecrement
            | TokenKind::Arithmetic
            | TokenKind::Logical
            | TokenKind::Bitwise
            | TokenKind::Unary => TokenClass::Operator,
            TokenKind::Ident => TokenClass::Variable,
            TokenKind::Integer
            | TokenKind::Float
            | TokenKind::String
            | TokenKind::RawString
            | TokenKind::Boolean => TokenClass::Constant,
            TokenKind::LPar
            | TokenKind::RPar
            | TokenKind::LBrace
            | TokenKind::RBrace
            | TokenKind::LBracket
            | TokenKind::RBracket
            | TokenKind::Comma
            | TokenKind::Semicolon
            | TokenKind::Dot
            | TokenKind::Colon => TokenClass::Punctuation,
            TokenKind::Space | TokenKind::Comment => TokenClass::Skip,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One recognized lexeme occurrence.
///
/// `id` is the interned identity `"<label>:<sequence>"`, e.g. `N:3` for the
/// fourth distinct name or `K:1` for the second distinct keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub line: usize,
    pub column: usize,
    pub id: String,
}

impl Token {
    pub fn location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}'", self.kind, self.text)
    }
}

/// A catalog entry: a token kind and the pattern anchored at the cursor.
pub struct TokenRule {
    pub kind: TokenKind,
    pub pattern: Regex,
}

impl TokenRule {
    fn new(kind: TokenKind, pattern: &str) -> Self {
        Self {
            kind,
            pattern: Regex::new(&format!("^(?:{pattern})")).expect("valid regex"),
        }
    }

    pub fn class(&self) -> TokenClass {
        self.kind.class()
    }

    /// Length in bytes of the match at the start of `input`, if any.
    pub fn match_len(&self, input: &str) -> Option<usize> {
        self.pattern.find(input).map(|m| m.end())
    }
}

static CATALOG: LazyLock<Vec<TokenRule>> = LazyLock::new(build_catalog);

/// The ordered rule catalog. The first rule that matches wins.
pub fn catalog() -> &'static [TokenRule] {
    &CATALOG
}

/// Names of every keyword and operator rule, used for suggestions.
pub fn keyword_and_operator_names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = Vec::new();
    for rule in catalog() {
        let class = rule.class();
        if (class == TokenClass::Keyword || class == TokenClass::Operator)
            && !names.contains(&rule.kind.name())
        {
            names.push(rule.kind.name());
        }
    }
    names
}

fn build_catalog() -> Vec<TokenRule> {
    use TokenKind::*;

    let keywords = [
        If,
        Else,
        For,
        Switch,
        Case,
        Default,
        Break,
        Continue,
        Return,
        Func,
        Package,
        Import,
        Var,
        Const,
        Type,
        Struct,
        Interface,
        Go,
        Chan,
        Select,
        Defer,
        Fallthrough,
        Goto,
        Map,
        Range,
    ];

    let mut rules: Vec<TokenRule> = keywords
        .iter()
        .map(|kind| TokenRule::new(*kind, kind.name()))
        .collect();

    // Two-character comparisons run before assignment so `==` is not `=`,
    // single `<`/`>` run after bitwise so `<<` and `<<=` stay whole.
    rules.extend([
        TokenRule::new(Comparison, r"==|!=|<=|>="),
        TokenRule::new(Assignment, r"<<=|>>=|\+=|-=|\*=|/=|%=|&=|\|=|\^=|="),
        TokenRule::new(ShortDeclaration, r":="),
        TokenRule::new(IncrementDecrement, r"\+\+|--"),
        TokenRule::new(Arithmetic, r"\+|-|\*|/|%"),
        TokenRule::new(Logical, r"&&|\|\|"),
        TokenRule::new(Bitwise, r"<<|>>|&|\||\^"),
        TokenRule::new(Comparison, r"<|>"),
        TokenRule::new(Unary, r"!"),
    ]);

    // `true`/`false` must win over the generic identifier rule.
    rules.push(TokenRule::new(Boolean, r"true|false"));
    rules.push(TokenRule::new(Ident, r"[a-zA-Z_]\w*"));

    rules.extend([
        TokenRule::new(Integer, r"\d+"),
        TokenRule::new(Float, r"\d+\.\d+"),
        TokenRule::new(String, r#""[^"]*""#),
        TokenRule::new(RawString, r"`[^`]*`"),
    ]);

    rules.extend([
        TokenRule::new(LPar, r"\("),
        TokenRule::new(RPar, r"\)"),
        TokenRule::new(LBrace, r"\{"),
        TokenRule::new(RBrace, r"\}"),
        TokenRule::new(LBracket, r"\["),
        TokenRule::new(RBracket, r"\]"),
        TokenRule::new(Comma, r","),
        TokenRule::new(Semicolon, r";"),
        TokenRule::new(Dot, r"\."),
        TokenRule::new(Colon, r":"),
    ]);

    rules.extend([
        TokenRule::new(Space, r"\s"),
        TokenRule::new(Comment, r"//.*|/\*(?s:.*?)\*/"),
    ]);

    rules
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first_match(input: &str) -> Option<(TokenKind, usize)> {
        catalog()
            .iter()
            .find_map(|rule| rule.match_len(input).map(|len| (rule.kind, len)))
    }

    #[test]
    fn test_catalog_order_by_class() {
        let classes: Vec<TokenClass> = catalog().iter().map(|r| r.class()).collect();
        let first_operator = classes.iter().position(|c| *c == TokenClass::Operator).unwrap();
        let last_keyword = classes.iter().rposition(|c| *c == TokenClass::Keyword).unwrap();
        let first_skip = classes.iter().position(|c| *c == TokenClass::Skip).unwrap();
        let last_punct = classes.iter().rposition(|c| *c == TokenClass::Punctuation).unwrap();

        assert!(last_keyword < first_operator);
        assert!(last_punct < first_skip);
    }

    #[test]
    fn test_multi_char_operators_are_single_rules() {
        assert_eq!(first_match("<= 1"), Some((TokenKind::Comparison, 2)));
        assert_eq!(first_match("<<= 1"), Some((TokenKind::Assignment, 3)));
        assert_eq!(first_match("<< 1"), Some((TokenKind::Bitwise, 2)));
        assert_eq!(first_match("< 1"), Some((TokenKind::Comparison, 1)));
        assert_eq!(first_match("== 1"), Some((TokenKind::Comparison, 2)));
        assert_eq!(first_match("= 1"), Some((TokenKind::Assignment, 1)));
        assert_eq!(first_match("++"), Some((TokenKind::IncrementDecrement, 2)));
        assert_eq!(first_match("&& x"), Some((TokenKind::Logical, 2)));
        assert_eq!(first_match("!x"), Some((TokenKind::Unary, 1)));
    }

    #[test]
    fn test_keyword_rule_matches_prefix_of_identifier() {
        // The boundary check lives in the lexer; the bare pattern still matches.
        assert_eq!(first_match("iffy"), Some((TokenKind::If, 2)));
    }

    #[test]
    fn test_boolean_precedes_identifier() {
        assert_eq!(first_match("true"), Some((TokenKind::Boolean, 4)));
        assert_eq!(first_match("x1"), Some((TokenKind::Ident, 2)));
    }

    #[test]
    fn test_suggestion_names_are_unique() {
        let names = keyword_and_operator_names();
        assert!(names.contains(&"func"));
        assert!(names.contains(&"comparison"));
        assert_eq!(names.iter().filter(|n| **n == "comparison").count(), 1);
        assert!(!names.contains(&"ident"));
    }
}
