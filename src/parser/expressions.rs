//! Expression parsing implementation
//!
//! This module handles parsing of expressions with one method per
//! precedence tier and recursive descent for primary forms.
//!
//! # Supported Expressions
//!
//! - Literals: integers, floats, strings, raw strings, booleans
//! - Identifiers with postfix chains: `.field`, `pkg.Func(...)`, `[i]`,
//!   `[i:j]`, `(...)`, `++`, `--`
//! - Binary operators: comparison and logical (one tier), `+ -`, `* /`
//! - Prefix operators: `-`, `!`, `++`, `--`
//! - Assignment with any of `= := += -= *= /= %= &= |= ^= <<= >>=`
//! - Struct literals `T{f: v}` and array literals `[n]T{...}`
//!
//! # Precedence
//!
//! ```text
//! assignment     ::= comparison ( assign_op ( struct_literal | comparison ) ";"? )?
//! comparison     ::= additive ( ( "==" | "!=" | "<" | ">" | "<=" | ">=" | "&&" | "||" ) additive )*
//! additive       ::= multiplicative ( ( "+" | "-" ) multiplicative )*
//! multiplicative ::= primary ( ( "*" | "/" ) primary )*
//! ```
//!
//! `%` is lexed but not accepted by any tier.
//!
//! A bare identifier starts a struct literal only when it already names a
//! declared struct type and is followed by `{`. On the right of an assignment
//! operator, `Name {` and `pkg.Name {` are struct literals regardless.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::parse::{ParseError, Parser};
use crate::parser::token::TokenKind;
use tracing::trace;

/// Builtin whose first argument is a type
const MAKE_BUILTIN: &str = "make";

impl Parser {
    /// Parse expression (top-level entry point)
    pub(crate) fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        if let Some(token) = self.peek() {
            trace!(text = %token.text, kind = %token.kind, position = self.position, "expression");
        }
        let expr = self.parse_assignment()?;
        trace!(node = expr.kind(), "expression parsed");
        Ok(expr)
    }

    /// Parse assignment (non-associative)
    fn parse_assignment(&mut self) -> Result<Expr, ParseError> {
        let left = self.parse_comparison()?;

        let is_assign = self.check(TokenKind::Assignment) || self.check(TokenKind::ShortDeclaration);
        if !is_assign {
            return Ok(left);
        }

        let operator_pos = self.next_pos();
        let Some(operator) = self.advance() else {
            return Ok(left);
        };

        let right = if self.struct_literal_ahead() {
            self.parse_struct_initialization()?
        } else {
            self.parse_comparison()?
        };
        let semicolon = self.match_punctuation();

        Ok(Expr::AssignmentExpression {
            left: Box::new(left),
            operator: Operator {
                value: operator.text,
                pos: operator_pos,
            },
            right: Box::new(right),
            semicolon,
        })
    }

    /// `Name {` or `pkg.Name {` at the cursor
    fn struct_literal_ahead(&self) -> bool {
        if !self.check(TokenKind::Ident) {
            return false;
        }
        self.check_ahead(1, TokenKind::LBrace)
            || (self.check_ahead(1, TokenKind::Dot)
                && self.check_ahead(2, TokenKind::Ident)
                && self.check_ahead(3, TokenKind::LBrace))
    }

    /// Parse comparison and logical operators (shared tier, left-associative)
    fn parse_comparison(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_additive()?;

        while self.check(TokenKind::Comparison) || self.check(TokenKind::Logical) {
            left = self.binary(left, Self::parse_additive)?;
        }

        Ok(left)
    }

    /// Parse `+` and `-`
    fn parse_additive(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_multiplicative()?;

        while self.check_text(TokenKind::Arithmetic, "+") || self.check_text(TokenKind::Arithmetic, "-") {
            left = self.binary(left, Self::parse_multiplicative)?;
        }

        Ok(left)
    }

    /// Parse `*` and `/`
    fn parse_multiplicative(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_primary()?;

        while self.check_text(TokenKind::Arithmetic, "*") || self.check_text(TokenKind::Arithmetic, "/") {
            left = self.binary(left, Self::parse_primary)?;
        }

        Ok(left)
    }

    /// Consume the operator at the cursor and combine `left` with the next operand
    fn binary(
        &mut self,
        left: Expr,
        operand: fn(&mut Self) -> Result<Expr, ParseError>,
    ) -> Result<Expr, ParseError> {
        let operator = self.advance().map(|t| t.text).unwrap_or_default();
        let pos = self.next_pos();
        let right = operand(self)?;
        Ok(Expr::BinaryOperation {
            left: Box::new(left),
            operator: Operator {
                value: operator,
                pos,
            },
            right: Box::new(right),
        })
    }

    /// Parse primary expressions
    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let Some(token) = self.peek().cloned() else {
            return Err(self.unexpected("expression"));
        };
        trace!(text = %token.text, kind = %token.kind, "primary");

        match token.kind {
            TokenKind::Ident => {
                if self.symbols.is_struct_type(&token.text) && self.check_ahead(1, TokenKind::LBrace) {
                    return self.parse_struct_initialization();
                }
                let pos = self.next_pos();
                self.advance();
                self.parse_postfix(Expr::Identifier {
                    value: token.text,
                    pos,
                })
            }
            TokenKind::LBracket => self.parse_array_literal(),
            TokenKind::Arithmetic if token.text == "-" => self.parse_prefix(),
            TokenKind::Unary | TokenKind::IncrementDecrement => self.parse_prefix(),
            TokenKind::Integer | TokenKind::Float => {
                self.advance();
                Ok(Expr::NumberLiteral {
                    value: token.text,
                    pos: self.next_pos(),
                })
            }
            TokenKind::String | TokenKind::RawString => {
                self.advance();
                Ok(Expr::StringLiteral {
                    value: token.text,
                    pos: self.next_pos(),
                })
            }
            TokenKind::Boolean => {
                self.advance();
                Ok(Expr::BooleanLiteral {
                    value: token.text,
                    pos: self.next_pos(),
                })
            }
            TokenKind::LPar => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect_token(TokenKind::RPar, "')'", "after expression")?;
                Ok(expr)
            }
            _ => Err(self.unexpected("expression")),
        }
    }

    /// Prefix `-`, `!`, `++`, `--`
    fn parse_prefix(&mut self) -> Result<Expr, ParseError> {
        let operator = self.advance().map(|t| t.text).unwrap_or_default();
        let operand = self.parse_primary()?;
        Ok(Expr::UnaryOperation {
            operator: Operator {
                value: operator,
                pos: self.next_pos(),
            },
            operand: Box::new(operand),
            is_prefix: true,
        })
    }

    /// Field access, indexing, slicing, calls and postfix `++`/`--`
    fn parse_postfix(&mut self, mut expr: Expr) -> Result<Expr, ParseError> {
        loop {
            let Some(kind) = self.peek().map(|t| t.kind) else {
                return Ok(expr);
            };
            match kind {
                TokenKind::Dot => expr = self.parse_selector(expr)?,
                TokenKind::LBracket => expr = self.parse_index_or_slice(expr)?,
                TokenKind::IncrementDecrement => {
                    let operator = self.advance().map(|t| t.text).unwrap_or_default();
                    return Ok(Expr::UnaryOperation {
                        operator: Operator {
                            value: operator,
                            pos: self.next_pos(),
                        },
                        operand: Box::new(expr),
                        is_prefix: false,
                    });
                }
                TokenKind::LPar => {
                    let name = dotted_name(&expr).ok_or_else(|| self.unexpected("callable name before '('"))?;
                    return self.parse_function_call(None, name);
                }
                _ => return Ok(expr),
            }
        }
    }

    /// `.field` or `.Func(...)` after `object`
    fn parse_selector(&mut self, object: Expr) -> Result<Expr, ParseError> {
        self.advance();
        let Some(name) = self.advance_if(TokenKind::Ident) else {
            return Err(self.missing("field or function name", "after '.'"));
        };

        if self.check(TokenKind::LPar) {
            return self.parse_function_call(dotted_name(&object), name);
        }

        Ok(Expr::FieldAccess {
            object: Box::new(object),
            field: Box::new(Expr::Identifier {
                value: name,
                pos: self.next_pos(),
            }),
        })
    }

    /// `[i]`, `[i:j]`, `[:j]`, `[i:]` or `[:]` after `array`
    fn parse_index_or_slice(&mut self, array: Expr) -> Result<Expr, ParseError> {
        let mut nodes: Vec<CstNode> = vec![self.expect_token(TokenKind::LBracket, "'['", "")?.into()];

        let mut start = None;
        if !self.check(TokenKind::Colon) && !self.check(TokenKind::RBracket) {
            let expr = self.parse_expression()?;
            nodes.push(Fragment::StartExpression(expr.clone()).into());
            start = Some(Box::new(expr));
        }

        let colon = self.match_token(TokenKind::Colon);
        let is_slice = colon.is_some();
        let mut end = None;
        if let Some(colon) = colon {
            nodes.push(colon.into());
            if !self.check(TokenKind::RBracket) {
                let expr = self.parse_expression()?;
                nodes.push(Fragment::EndExpression(expr.clone()).into());
                end = Some(Box::new(expr));
            }
        }

        nodes.push(self.expect_token(TokenKind::RBracket, "']'", "after index or slice")?.into());

        let array = Box::new(array);
        if is_slice {
            Ok(Expr::SliceExpression {
                array,
                start,
                end,
                nodes,
            })
        } else {
            Ok(Expr::IndexExpression {
                array,
                index: start,
                nodes,
            })
        }
    }

    /// Argument list of a call; the callee name has been consumed
    fn parse_function_call(&mut self, package: Option<String>, name: String) -> Result<Expr, ParseError> {
        let mut nodes: Vec<CstNode> = vec![self.expect_lparen("after function name")?.into()];
        let mut args = Vec::new();

        if name == MAKE_BUILTIN {
            let type_arg = self
                .parse_type()?
                .ok_or_else(|| self.missing("type argument", "for 'make'"))?;
            args.push(Expr::Type { value: type_arg });
            match self.match_token(TokenKind::Comma) {
                Some(comma) => nodes.push(comma.into()),
                None => {
                    nodes.push(self.expect_rparen("after function arguments")?.into());
                    return Ok(Expr::FunctionCall {
                        package,
                        name,
                        args,
                        nodes,
                    });
                }
            }
        }

        while !self.check(TokenKind::RPar) && !self.is_at_end() {
            args.push(self.parse_expression()?);
            if let Some(comma) = self.match_token(TokenKind::Comma) {
                nodes.push(comma.into());
            }
        }

        nodes.push(self.expect_rparen("after function arguments")?.into());

        Ok(Expr::FunctionCall {
            package,
            name,
            args,
            nodes,
        })
    }

    /// `Name{f: v, ...}`, `pkg.Name{...}` or an anonymous `{...}` element
    pub(crate) fn parse_struct_initialization(&mut self) -> Result<Expr, ParseError> {
        let mut nodes: Vec<CstNode> = Vec::new();
        let mut struct_name = String::new();

        if let Some(name) = self.match_token(TokenKind::Ident) {
            struct_name = name.text.clone();
            nodes.push(name.into());
            if let Some(dot) = self.match_token(TokenKind::Dot) {
                nodes.push(dot.into());
                let qualified = self.expect_identifier("after '.'")?;
                struct_name = format!("{struct_name}.{}", qualified.text);
                nodes.push(qualified.into());
            }
        }

        nodes.push(self.expect_lbrace("for struct initialization")?.into());

        let mut fields = Vec::new();
        while !self.check(TokenKind::RBrace) && !self.is_at_end() {
            let field = self.expect_identifier("for struct field name")?;
            let name = field.text.clone();
            nodes.push(field.into());
            nodes.push(self.expect_token(TokenKind::Colon, "':'", "after field name")?.into());

            let value = self.parse_expression()?;
            fields.push(FieldInit { name, value });

            if let Some(comma) = self.match_token(TokenKind::Comma) {
                nodes.push(comma.into());
            }
        }

        nodes.push(self.expect_rbrace("to end struct initialization")?.into());

        Ok(Expr::StructInitialization {
            struct_name,
            fields,
            nodes,
        })
    }

    /// `[n]T{...}` literal, or a bare `[n]T` array type
    fn parse_array_literal(&mut self) -> Result<Expr, ParseError> {
        let mut nodes: Vec<CstNode> = vec![self.expect_token(TokenKind::LBracket, "'['", "for array")?.into()];

        let size = self.match_token(TokenKind::Integer).map(|leaf| {
            let text = leaf.text.clone();
            nodes.push(leaf.into());
            text
        });
        nodes.push(self.expect_token(TokenKind::RBracket, "']'", "for array type")?.into());

        let array_type = self
            .parse_type()?
            .ok_or_else(|| self.missing("array element type", "after ']'"))?;
        nodes.push(Leaf::new("ArrayType", array_type.clone(), self.next_pos()).into());

        let Some(lbrace) = self.match_token(TokenKind::LBrace) else {
            return Ok(Expr::ArrayType {
                array_type,
                size,
                nodes,
            });
        };
        nodes.push(lbrace.into());

        let mut elements = Vec::new();
        while !self.check(TokenKind::RBrace) && !self.is_at_end() {
            let element = if self.negative_number_ahead() {
                self.advance();
                let digits = self.advance().map(|t| t.text).unwrap_or_default();
                Expr::NumberLiteral {
                    value: format!("-{digits}"),
                    pos: self.next_pos(),
                }
            } else if self.check(TokenKind::LBrace) {
                self.parse_struct_initialization()?
            } else {
                self.parse_expression()?
            };
            elements.push(element);

            if let Some(comma) = self.match_token(TokenKind::Comma) {
                nodes.push(comma.into());
            }
        }

        nodes.push(self.expect_rbrace("for array initialization")?.into());

        Ok(Expr::ArrayLiteral {
            array_type,
            size,
            elements,
            nodes,
        })
    }

    /// `-` directly followed by an integer or float literal
    fn negative_number_ahead(&self) -> bool {
        self.check_text(TokenKind::Arithmetic, "-")
            && (self.check_ahead(1, TokenKind::Integer) || self.check_ahead(1, TokenKind::Float))
    }
}

/// `a`, `a.b`, `a.b.c` for identifier and field-access chains
fn dotted_name(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Identifier { value, .. } => Some(value.clone()),
        Expr::FieldAccess { object, field } => {
            let object = dotted_name(object)?;
            let field = dotted_name(field)?;
            Some(format!("{object}.{field}"))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::*;
    use crate::parser::parse::{ParseError, Parser};
    use crate::parser::symbols::GLOBAL_SCOPE;

    /// Parse `source` as the right-hand side of `v := ...` inside `main`.
    fn value_of(prelude: &str, source: &str) -> Expr {
        let mut parser = Parser::from_source(&format!("{prelude}\nfunc main() {{ v := {source}; }}"));
        parser.parse().unwrap();
        parser
            .symbol_table()
            .variable("main", "v")
            .and_then(|entry| entry.value.clone())
            .unwrap()
    }

    fn operator_of(expr: &Expr) -> &str {
        match expr {
            Expr::BinaryOperation { operator, .. } => &operator.value,
            _ => panic!("Expected binary operation, got {expr:?}"),
        }
    }

    #[test]
    fn test_precedence() {
        let expr = value_of("", "1 + 1 * 2");
        assert_eq!(operator_of(&expr), "+");
        match expr {
            Expr::BinaryOperation { right, .. } => assert_eq!(operator_of(&right), "*"),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_comparison_and_logical_share_a_tier() {
        // ((a < b) && c) == d
        let expr = value_of("", "a < b && c == d");
        assert_eq!(operator_of(&expr), "==");
        match expr {
            Expr::BinaryOperation { left, .. } => assert_eq!(operator_of(&left), "&&"),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_modulo_is_not_an_expression_operator() {
        let mut parser = Parser::from_source("func main() { v := 5 % 2; }");
        let err = parser.parse().unwrap_err();
        assert!(matches!(err, ParseError::MissingExpectedToken { found, .. } if found == "%"));
    }

    #[test]
    fn test_struct_literal_needs_declared_type() {
        let expr = value_of("type Point struct { X int; Y int; };", "Point{X: 1, Y: 2}");
        match expr {
            Expr::StructInitialization {
                struct_name,
                fields,
                ..
            } => {
                assert_eq!(struct_name, "Point");
                let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
                assert_eq!(names, vec!["X", "Y"]);
            }
            other => panic!("Expected struct initialization, got {other:?}"),
        }

        let mut parser = Parser::from_source("func main() { q := Undefined{X: 1}; }");
        assert!(parser.parse().is_err());
    }

    #[test]
    fn test_struct_literal_after_assignment() {
        let mut parser = Parser::from_source(
            "func f() { s.products[name] = product.Product{Name: name, Price: 1.5}; }",
        );
        let program = parser.parse().unwrap();
        let Decl::Function { body, .. } = &program.children[0] else {
            panic!("Expected function declaration");
        };
        match &body[0] {
            Stmt::Expression {
                expression: Expr::AssignmentExpression { left, right, semicolon, .. },
                ..
            } => {
                assert!(matches!(left.as_ref(), Expr::IndexExpression { .. }));
                assert!(semicolon.is_some());
                match right.as_ref() {
                    Expr::StructInitialization { struct_name, fields, .. } => {
                        assert_eq!(struct_name, "product.Product");
                        assert_eq!(fields.len(), 2);
                    }
                    other => panic!("Expected struct initialization, got {other:?}"),
                }
            }
            other => panic!("Expected assignment statement, got {other:?}"),
        }
    }

    #[test]
    fn test_package_call_and_make() {
        let expr = value_of("", "store.NewStore()");
        assert!(matches!(
            expr,
            Expr::FunctionCall { package: Some(ref p), ref name, .. } if p == "store" && name == "NewStore"
        ));

        let expr = value_of("", "make(map[string]product.Product)");
        match expr {
            Expr::FunctionCall { name, args, package, .. } => {
                assert_eq!(name, "make");
                assert!(package.is_none());
                assert_eq!(
                    args,
                    vec![Expr::Type {
                        value: "map[string]product.Product".to_string()
                    }]
                );
            }
            other => panic!("Expected call, got {other:?}"),
        }
    }

    #[test]
    fn test_slices() {
        for (source, has_start, has_end) in [
            ("users[2:6]", true, true),
            ("users[:4]", false, true),
            ("users[3:]", true, false),
        ] {
            match value_of("", source) {
                Expr::SliceExpression { start, end, .. } => {
                    assert_eq!(start.is_some(), has_start, "{source}");
                    assert_eq!(end.is_some(), has_end, "{source}");
                }
                other => panic!("Expected slice for {source}, got {other:?}"),
            }
        }
        assert!(matches!(value_of("", "users[1]"), Expr::IndexExpression { index: Some(_), .. }));
    }

    #[test]
    fn test_array_literal_elements() {
        match value_of("", "[4]int{1, -2, x, -y}") {
            Expr::ArrayLiteral { size, array_type, elements, .. } => {
                assert_eq!(size.as_deref(), Some("4"));
                assert_eq!(array_type, "int");
                assert!(matches!(&elements[1], Expr::NumberLiteral { value, .. } if value == "-2"));
                assert!(matches!(&elements[3], Expr::UnaryOperation { is_prefix: true, .. }));
            }
            other => panic!("Expected array literal, got {other:?}"),
        }
        match value_of("", "[]Point{{X: 1}, {X: 2}}") {
            Expr::ArrayLiteral { size, elements, .. } => {
                assert!(size.is_none());
                assert!(matches!(&elements[0], Expr::StructInitialization { struct_name, .. } if struct_name.is_empty()));
            }
            other => panic!("Expected array literal, got {other:?}"),
        }
    }

    #[test]
    fn test_prefix_and_postfix_unary() {
        assert!(matches!(value_of("", "!ok"), Expr::UnaryOperation { is_prefix: true, .. }));
        assert!(matches!(value_of("", "-(a + b)"), Expr::UnaryOperation { is_prefix: true, .. }));
        let mut parser = Parser::from_source("func main() { i++ }");
        let program = parser.parse().unwrap();
        let Decl::Function { body, .. } = &program.children[0] else {
            panic!("Expected function declaration");
        };
        assert!(matches!(
            &body[0],
            Stmt::Expression { expression: Expr::UnaryOperation { is_prefix: false, .. }, .. }
        ));
    }

    #[test]
    fn test_literals() {
        assert!(matches!(value_of("", "`raw`"), Expr::StringLiteral { .. }));
        assert!(matches!(value_of("", "1200.50"), Expr::NumberLiteral { value, .. } if value == "1200.50"));
        assert!(matches!(value_of("", "true"), Expr::BooleanLiteral { .. }));
    }

    #[test]
    fn test_method_call_chain() {
        let expr = value_of("", "myStore.AddProduct(\"a\", 1, 10,)");
        match expr {
            Expr::FunctionCall { package, name, args, .. } => {
                assert_eq!(package.as_deref(), Some("myStore"));
                assert_eq!(name, "AddProduct");
                assert_eq!(args.len(), 3);
            }
            other => panic!("Expected call, got {other:?}"),
        }
        let mut parser = Parser::from_source("x := a.b.c;");
        parser.parse().unwrap();
        let value = parser.symbol_table().variable(GLOBAL_SCOPE, "x").unwrap().value.clone();
        assert!(matches!(value, Some(Expr::FieldAccess { .. })));
    }
}
