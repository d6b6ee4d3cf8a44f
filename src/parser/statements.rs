//! Statement parsing implementation
//!
//! This module handles parsing of statements inside function bodies:
//!
//! - Variable declarations: `var x int = 1;`, `a, b := f();`
//! - Control flow: `if`/`else`, `for` (three-clause, condition-only, range),
//!   `switch` with `case`/`default` clauses
//! - Jump statements: `return`, `break`, `continue`
//! - Expression statements: calls, assignments, increments
//!
//! # Grammar
//!
//! ```text
//! statement   ::= var_decl | if_stmt | for_stmt | switch_stmt
//!               | return_stmt | break_stmt | continue_stmt | expr_stmt
//! var_decl    ::= ( "var" idents type? | idents ) ( ( "=" | ":=" ) expression )? ";"
//! if_stmt     ::= "if" expression block ( "else" block )?
//! for_stmt    ::= "for" ( clauses | expression | range_clause )? block
//! clauses     ::= init? ";" expression? ";" expression?
//! range_clause::= idents ":=" "range" expression
//! switch_stmt ::= "switch" expression? "{" ( case_clause | default_clause )* "}"
//! ```
//!
//! Every declaration is recorded in the scope passed in by the caller.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::parse::{ParseError, Parser};
use crate::parser::symbols::{VariableEntry, AUTO_TYPE};
use crate::parser::token::TokenKind;
use tracing::debug;

impl Parser {
    /// Parse block statements (inside braces, excluding the braces themselves)
    pub(crate) fn parse_block_statements(&mut self, scope: &str) -> Result<Vec<Stmt>, ParseError> {
        let mut statements = Vec::new();

        while !self.check(TokenKind::RBrace) && !self.is_at_end() {
            statements.push(self.parse_statement(scope)?);
        }

        Ok(statements)
    }

    /// Parse a statement
    pub(crate) fn parse_statement(&mut self, scope: &str) -> Result<Stmt, ParseError> {
        let Some(token) = self.peek() else {
            return Err(self.unexpected("statement"));
        };
        debug!(kind = %token.kind, text = %token.text, position = self.position, scope, "statement");

        let kind = token.kind;
        match kind {
            TokenKind::For => self.parse_for_statement(scope),
            TokenKind::If => self.parse_if_statement(scope),
            TokenKind::Switch => self.parse_switch_statement(scope),
            TokenKind::Continue => {
                let nodes = vec![self.expect_token(TokenKind::Continue, "'continue'", "")?.into()];
                Ok(Stmt::Continue { nodes })
            }
            TokenKind::Break => {
                let mut nodes: Vec<CstNode> =
                    vec![self.expect_token(TokenKind::Break, "'break'", "")?.into()];
                if let Some(semicolon) = self.match_token(TokenKind::Semicolon) {
                    nodes.push(semicolon.into());
                }
                Ok(Stmt::Break { nodes })
            }
            TokenKind::Return => self.parse_return_statement(),
            TokenKind::Var => Ok(Stmt::VariableDeclaration(
                self.parse_variable_declaration(scope, true)?,
            )),
            TokenKind::Ident if self.starts_short_declaration() => Ok(Stmt::VariableDeclaration(
                self.parse_variable_declaration(scope, true)?,
            )),
            _ => {
                let expression = self.parse_expression()?;
                let semicolon = self.match_punctuation();
                Ok(Stmt::Expression {
                    expression,
                    semicolon,
                })
            }
        }
    }

    /// Consume an optional `;` as an expression-owned punctuation node
    pub(crate) fn match_punctuation(&mut self) -> Option<Punctuation> {
        self.match_token(TokenKind::Semicolon).map(|leaf| Punctuation {
            value: leaf.text,
            pos: leaf.pos,
        })
    }

    /// Parse return statement with optional expression list
    fn parse_return_statement(&mut self) -> Result<Stmt, ParseError> {
        let mut nodes: Vec<CstNode> =
            vec![self.expect_token(TokenKind::Return, "'return'", "")?.into()];

        let mut expressions = Vec::new();
        if !self.check(TokenKind::Semicolon) && !self.check(TokenKind::RBrace) {
            expressions = self.parse_expression_list()?;
            for expr in &expressions {
                nodes.push(Fragment::Expression(expr.clone()).into());
            }
        }
        if let Some(semicolon) = self.match_token(TokenKind::Semicolon) {
            nodes.push(semicolon.into());
        }

        Ok(Stmt::Return { expressions, nodes })
    }

    /// Comma-separated expressions up to `;`, `}` or end of input
    pub(crate) fn parse_expression_list(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut expressions = Vec::new();
        while !self.check(TokenKind::Semicolon) && !self.check(TokenKind::RBrace) && !self.is_at_end() {
            expressions.push(self.parse_expression()?);
            if self.advance_if(TokenKind::Comma).is_none() {
                break;
            }
        }
        Ok(expressions)
    }

    /// Parse `var` or short variable declaration
    pub(crate) fn parse_variable_declaration(
        &mut self,
        scope: &str,
        consume_semicolon: bool,
    ) -> Result<VariableDeclaration, ParseError> {
        let mut nodes: Vec<CstNode> = Vec::new();

        let var_leaf = self.match_token(TokenKind::Var);
        let is_var = var_leaf.is_some();
        if let Some(leaf) = var_leaf {
            nodes.push(leaf.into());
        }

        let mut names = Vec::new();
        loop {
            let name = self.expect_identifier("for variable name")?;
            names.push(name.text.clone());
            nodes.push(name.into());
            match self.match_token(TokenKind::Comma) {
                Some(comma) => nodes.push(comma.into()),
                None => break,
            }
        }

        let mut declared_type = None;
        if is_var && matches!(
            self.peek().map(|t| t.kind),
            Some(TokenKind::Ident | TokenKind::LBracket | TokenKind::Map)
        ) {
            if let Some(type_name) = self.parse_type()? {
                nodes.push(Leaf::new("Type", type_name.clone(), self.next_pos()).into());
                declared_type = Some(type_name);
            }
        }

        let operator = self
            .match_token(TokenKind::Assignment)
            .or_else(|| self.match_token(TokenKind::ShortDeclaration));

        if let Some(operator) = operator {
            nodes.push(operator.into());
            let value = self.parse_expression()?;
            nodes.push(Fragment::Expression(value.clone()).into());

            let type_name = declared_type
                .or_else(|| inferred_array_type(&value))
                .unwrap_or_else(|| AUTO_TYPE.to_string());
            for name in &names {
                let entry = VariableEntry {
                    type_name: type_name.clone(),
                    pos: self.next_pos,
                    value: Some(value.clone()),
                };
                self.symbols.declare_variable(scope, name, entry);
            }
        } else if is_var {
            let type_name = declared_type.unwrap_or_else(|| AUTO_TYPE.to_string());
            for name in &names {
                let entry = VariableEntry {
                    type_name: type_name.clone(),
                    pos: self.next_pos,
                    value: None,
                };
                self.symbols.declare_variable(scope, name, entry);
            }
        } else {
            return Err(self.missing("':=' or '='", "in short variable declaration"));
        }

        if consume_semicolon {
            if let Some(semicolon) = self.match_token(TokenKind::Semicolon) {
                nodes.push(semicolon.into());
            } else if !self.is_at_end() {
                return Err(self.missing("';'", "after variable declaration"));
            }
        }

        Ok(VariableDeclaration { nodes })
    }

    /// Parse if statement with optional else block
    fn parse_if_statement(&mut self, scope: &str) -> Result<Stmt, ParseError> {
        let mut nodes: Vec<CstNode> = vec![self.expect_token(TokenKind::If, "'if'", "")?.into()];

        let condition = self.parse_expression()?;
        nodes.push(Fragment::Condition(condition.clone()).into());

        nodes.push(self.expect_lbrace("after if condition")?.into());
        let then_body = self.parse_block_statements(scope)?;
        nodes.push(self.expect_rbrace("after if block")?.into());

        let mut else_body = Vec::new();
        if let Some(else_leaf) = self.match_token(TokenKind::Else) {
            nodes.push(else_leaf.into());
            nodes.push(self.expect_lbrace("after 'else'")?.into());
            else_body = self.parse_block_statements(scope)?;
            nodes.push(self.expect_rbrace("after else block")?.into());
        }

        Ok(Stmt::If {
            condition,
            then_body,
            else_body: (!else_body.is_empty()).then_some(else_body),
            nodes,
        })
    }

    /// Parse for statement in any of its forms
    fn parse_for_statement(&mut self, scope: &str) -> Result<Stmt, ParseError> {
        let mut nodes: Vec<CstNode> = vec![self.expect_token(TokenKind::For, "'for'", "")?.into()];

        let mut init = None;
        let mut condition = None;
        let mut post = None;

        if self.check(TokenKind::LBrace) {
            // for { }
        } else if let Some(semicolon) = self.match_token(TokenKind::Semicolon) {
            nodes.push(semicolon.into());
            (condition, post) = self.parse_for_tail(&mut nodes)?;
        } else if self.starts_short_declaration() {
            let mut names = Vec::new();
            loop {
                let name = self.expect_identifier("for loop variable")?;
                nodes.push(name.clone().into());
                names.push(name);
                match self.match_token(TokenKind::Comma) {
                    Some(comma) => nodes.push(comma.into()),
                    None => break,
                }
            }

            let define = self.expect_token(TokenKind::ShortDeclaration, "':='", "in for clause")?;
            nodes.push(define.clone().into());

            if let Some(range) = self.match_token(TokenKind::Range) {
                nodes.push(range.into());
                return self.parse_range_tail(scope, names, nodes);
            }

            let value = self.parse_expression()?;
            nodes.push(Fragment::Expression(value.clone()).into());

            let mut decl_nodes: Vec<CstNode> = Vec::new();
            for name in names {
                self.symbols.declare_variable(
                    scope,
                    &name.text,
                    VariableEntry {
                        type_name: AUTO_TYPE.to_string(),
                        pos: self.next_pos,
                        value: Some(value.clone()),
                    },
                );
                decl_nodes.push(name.into());
            }
            decl_nodes.push(define.into());
            decl_nodes.push(Fragment::Expression(value).into());
            init = Some(Box::new(Stmt::VariableDeclaration(VariableDeclaration {
                nodes: decl_nodes,
            })));

            nodes.push(self.expect_semicolon("after for initialization")?.into());
            (condition, post) = self.parse_for_tail(&mut nodes)?;
        } else {
            let first = self.parse_expression()?;
            if self.check(TokenKind::LBrace) {
                nodes.push(Fragment::Condition(first.clone()).into());
                condition = Some(first);
            } else {
                nodes.push(Fragment::Init(first.clone()).into());
                let terminated = matches!(
                    first,
                    Expr::AssignmentExpression {
                        semicolon: Some(_),
                        ..
                    }
                );
                init = Some(Box::new(Stmt::Expression {
                    expression: first,
                    semicolon: None,
                }));
                if !terminated {
                    nodes.push(self.expect_semicolon("after for initialization")?.into());
                }
                (condition, post) = self.parse_for_tail(&mut nodes)?;
            }
        }

        nodes.push(self.expect_lbrace("after for clause")?.into());
        let body = self.parse_block_statements(scope)?;
        nodes.push(self.expect_rbrace("after for body")?.into());

        Ok(Stmt::For {
            init,
            condition,
            post,
            body,
            nodes,
        })
    }

    /// `condition? ; post?` after the init clause and its `;`
    fn parse_for_tail(
        &mut self,
        nodes: &mut Vec<CstNode>,
    ) -> Result<(Option<Expr>, Option<Expr>), ParseError> {
        let mut condition = None;
        if !self.check(TokenKind::Semicolon) {
            let expr = self.parse_expression()?;
            nodes.push(Fragment::Condition(expr.clone()).into());
            condition = Some(expr);
        }
        nodes.push(self.expect_semicolon("after for condition")?.into());

        let mut post = None;
        if !self.check(TokenKind::LBrace) {
            let expr = self.parse_expression()?;
            nodes.push(Fragment::Post(expr.clone()).into());
            post = Some(expr);
        }

        Ok((condition, post))
    }

    /// `range expr { body }` once `vars := range` has been consumed
    fn parse_range_tail(
        &mut self,
        scope: &str,
        names: Vec<Leaf>,
        mut nodes: Vec<CstNode>,
    ) -> Result<Stmt, ParseError> {
        let expression = self.parse_expression()?;
        nodes.push(Fragment::RangeExpression(expression.clone()).into());

        let mut variables = Vec::new();
        for name in names {
            self.symbols.declare_variable(
                scope,
                &name.text,
                VariableEntry {
                    type_name: AUTO_TYPE.to_string(),
                    pos: self.next_pos,
                    value: None,
                },
            );
            variables.push(Expr::Identifier {
                value: name.text,
                pos: name.pos,
            });
        }

        nodes.push(self.expect_lbrace("after range clause")?.into());
        let body = self.parse_block_statements(scope)?;
        nodes.push(self.expect_rbrace("after for body")?.into());

        Ok(Stmt::Range {
            variables,
            expression,
            body,
            nodes,
        })
    }

    /// Parse switch statement with case and default clauses
    fn parse_switch_statement(&mut self, scope: &str) -> Result<Stmt, ParseError> {
        let mut nodes: Vec<CstNode> =
            vec![self.expect_token(TokenKind::Switch, "'switch'", "")?.into()];

        let mut expression = None;
        if !self.check(TokenKind::LBrace) && !self.check(TokenKind::Semicolon) && !self.is_at_end() {
            let expr = self.parse_expression()?;
            nodes.push(Fragment::Expression(expr.clone()).into());
            expression = Some(expr);
        }

        nodes.push(self.expect_lbrace("after switch")?.into());

        let mut cases = Vec::new();
        let mut default = None;
        while !self.check(TokenKind::RBrace) && !self.is_at_end() {
            if let Some(case) = self.match_token(TokenKind::Case) {
                nodes.push(case.into());
                let conditions = self.parse_expression_list()?;
                if conditions.is_empty() {
                    return Err(self.unexpected("condition after 'case'"));
                }
                nodes.push(Fragment::CaseConditions(conditions.clone()).into());
                nodes.push(self.expect_token(TokenKind::Colon, "':'", "after case condition")?.into());
                let body = self.parse_clause_body(scope)?;
                cases.push(CaseClause { conditions, body });
            } else if let Some(token) = self.peek().filter(|t| t.kind == TokenKind::Default) {
                if default.is_some() {
                    return Err(ParseError::DuplicateDefaultClause {
                        location: token.location(),
                    });
                }
                nodes.push(self.expect_token(TokenKind::Default, "'default'", "")?.into());
                nodes.push(self.expect_token(TokenKind::Colon, "':'", "after 'default'")?.into());
                let body = self.parse_clause_body(scope)?;
                default = Some(DefaultClause { body });
            } else {
                return Err(self.unexpected("'case' or 'default'"));
            }
        }

        nodes.push(self.expect_rbrace("after switch cases")?.into());

        Ok(Stmt::Switch {
            expression,
            cases,
            default,
            nodes,
        })
    }

    /// Statements up to the next `case`, `default` or `}`
    fn parse_clause_body(&mut self, scope: &str) -> Result<Vec<Stmt>, ParseError> {
        let mut body = Vec::new();
        while !self.check(TokenKind::Case)
            && !self.check(TokenKind::Default)
            && !self.check(TokenKind::RBrace)
            && !self.is_at_end()
        {
            body.push(self.parse_statement(scope)?);
        }
        Ok(body)
    }
}

/// `[size]elem` for an array literal initializer
fn inferred_array_type(value: &Expr) -> Option<String> {
    match value {
        Expr::ArrayLiteral {
            array_type, size, ..
        } => Some(format!("[{}]{}", size.as_deref().unwrap_or(""), array_type)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::*;
    use crate::parser::parse::{ParseError, Parser};
    use crate::parser::symbols::GLOBAL_SCOPE;

    fn body_of(source: &str) -> (Vec<Stmt>, Parser) {
        let mut parser = Parser::from_source(&format!("func main() {{\n{source}\n}}"));
        let program = parser.parse().unwrap();
        match program.children.into_iter().next() {
            Some(Decl::Function { body, .. }) => (body, parser),
            _ => panic!("Expected function declaration"),
        }
    }

    #[test]
    fn test_range_for() {
        let (body, parser) = body_of("for i, v := range items { }");
        match &body[0] {
            Stmt::Range {
                variables,
                expression,
                ..
            } => {
                assert_eq!(variables.len(), 2);
                assert!(matches!(expression, Expr::Identifier { value, .. } if value == "items"));
            }
            other => panic!("Expected range statement, got {other:?}"),
        }
        let v = parser.symbol_table().variable("main", "v").unwrap();
        assert_eq!(v.type_name, "auto");
        assert!(v.value.is_none());
    }

    #[test]
    fn test_three_clause_for() {
        let (body, parser) = body_of("for i := 0; i < 10; i++ { }");
        match &body[0] {
            Stmt::For {
                init,
                condition,
                post,
                ..
            } => {
                assert!(matches!(init.as_deref(), Some(Stmt::VariableDeclaration(_))));
                assert!(matches!(condition, Some(Expr::BinaryOperation { .. })));
                assert!(matches!(
                    post,
                    Some(Expr::UnaryOperation {
                        is_prefix: false,
                        ..
                    })
                ));
            }
            other => panic!("Expected for statement, got {other:?}"),
        }
        assert!(parser.symbol_table().variable("main", "i").is_some());
    }

    #[test]
    fn test_other_for_forms() {
        let (body, _) = body_of("for { break; }\nfor ; x < 3; { }\nfor x < 3 { }\nfor x = 0; x < 3; x++ { }");
        assert_eq!(body.len(), 4);
        assert!(matches!(&body[0], Stmt::For { init: None, condition: None, post: None, .. }));
        assert!(matches!(&body[1], Stmt::For { init: None, condition: Some(_), post: None, .. }));
        assert!(matches!(&body[2], Stmt::For { init: None, condition: Some(_), post: None, .. }));
        assert!(matches!(&body[3], Stmt::For { init: Some(_), condition: Some(_), post: Some(_), .. }));
    }

    #[test]
    fn test_if_else() {
        let (body, _) = body_of("if ok { x = 1 } else { x = 2 }\nif ok { }");
        match &body[0] {
            Stmt::If {
                then_body,
                else_body,
                ..
            } => {
                assert_eq!(then_body.len(), 1);
                assert_eq!(else_body.as_ref().map(Vec::len), Some(1));
            }
            other => panic!("Expected if statement, got {other:?}"),
        }
        assert!(matches!(&body[1], Stmt::If { else_body: None, .. }));
    }

    #[test]
    fn test_switch_clauses() {
        let (body, _) = body_of(
            "switch {\ncase q < n:\n return 1\ncase q == n, q == 0:\n f()\ndefault:\n q -= n\n}",
        );
        match &body[0] {
            Stmt::Switch {
                expression,
                cases,
                default,
                ..
            } => {
                assert!(expression.is_none());
                assert_eq!(cases.len(), 2);
                assert_eq!(cases[1].conditions.len(), 2);
                assert_eq!(default.as_ref().map(|d| d.body.len()), Some(1));
            }
            other => panic!("Expected switch statement, got {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_default() {
        let mut parser =
            Parser::from_source("func f() { switch x { default: g() default: h() } }");
        assert!(matches!(
            parser.parse(),
            Err(ParseError::DuplicateDefaultClause { .. })
        ));
    }

    #[test]
    fn test_var_declarations_record_types() {
        let (_, parser) = body_of(
            "var a, b int;\nvar s = \"x\";\nvar nums = [3]int{1, -2, 3};\nc, d := f();\nc, d = g();",
        );
        let symbols = parser.symbol_table();
        assert_eq!(symbols.variable("main", "a").unwrap().type_name, "int");
        assert_eq!(symbols.variable("main", "b").unwrap().type_name, "int");
        assert_eq!(symbols.variable("main", "s").unwrap().type_name, "auto");
        assert_eq!(symbols.variable("main", "nums").unwrap().type_name, "[3]int");
        assert!(symbols.variable("main", "d").unwrap().value.is_some());
        assert!(symbols.variable(GLOBAL_SCOPE, "a").is_none());
    }

    #[test]
    fn test_declaration_requires_semicolon() {
        let mut parser = Parser::from_source("func f() { x := 1 y := 2; }");
        let err = parser.parse().unwrap_err();
        assert!(err.to_string().contains("after variable declaration"));
    }

    #[test]
    fn test_return_break_continue() {
        let (body, _) = body_of("return a, b;\nbreak\ncontinue\nreturn");
        assert!(matches!(&body[0], Stmt::Return { expressions, .. } if expressions.len() == 2));
        assert!(matches!(&body[1], Stmt::Break { nodes } if nodes.len() == 1));
        assert!(matches!(&body[2], Stmt::Continue { .. }));
        assert!(matches!(&body[3], Stmt::Return { expressions, .. } if expressions.is_empty()));
    }
}
