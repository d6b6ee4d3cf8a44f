//! Declaration parsing implementation
//!
//! This module handles parsing of top-level declarations:
//!
//! - Package clause: `package name;`
//! - Imports: `import "path";` or `import ( "a"; "b" )`
//! - Struct types: `type Name struct { field T; ... };`
//! - Functions and methods, with parameters grouped by type
//! - Type expressions: names, qualified names, arrays, maps
//!
//! # Grammar
//!
//! ```text
//! package_decl  ::= "package" identifier ";"
//! import_decl   ::= "import" ( string ";" | "(" ( string ";"? )* ")" ) ";"?
//! type_decl     ::= "type" identifier "struct" "{" ( identifier type ";" )* "}" ";"
//! function_decl ::= "func" receiver? identifier "(" params ")" results? "{" statements "}" ";"?
//! receiver      ::= "(" identifier type ")"
//! params        ::= ( identifier ( "," identifier )* type ","? )*
//! results       ::= "(" ( type ","? )* ")" | type
//! type          ::= "[" integer? "]" type | "map" "[" type "]" type
//!                 | identifier ( "." identifier )?
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::parse::{ParseError, Parser};
use crate::parser::symbols::{ImportEntry, VariableEntry};
use crate::parser::token::TokenKind;
use tracing::debug;

impl Parser {
    /// Parse package clause: package name;
    pub(crate) fn parse_package(&mut self) -> Result<Decl, ParseError> {
        let mut nodes: Vec<CstNode> = Vec::new();
        nodes.push(self.expect_token(TokenKind::Package, "'package'", "")?.into());
        nodes.push(self.expect_identifier("after 'package'")?.into());
        nodes.push(self.expect_semicolon("after package declaration")?.into());
        Ok(Decl::Package { nodes })
    }

    /// Parse single or grouped import declaration
    pub(crate) fn parse_import(&mut self) -> Result<Decl, ParseError> {
        let mut nodes: Vec<CstNode> = Vec::new();
        let mut imports = Vec::new();

        nodes.push(self.expect_token(TokenKind::Import, "'import'", "")?.into());

        let lparen = self.match_token(TokenKind::LPar);
        let grouped = lparen.is_some();
        if let Some(leaf) = lparen {
            nodes.push(leaf.into());
        } else if !self.check(TokenKind::String) {
            return Err(self.missing("import path", "after 'import'"));
        }

        while let Some(path) = self.match_token(TokenKind::String) {
            let semicolon = match self.match_token(TokenKind::Semicolon) {
                Some(leaf) => Some(leaf),
                None if grouped && self.check(TokenKind::RPar) => None,
                None => return Err(self.missing("';'", "after import path")),
            };

            let name = path.text.trim_matches('"').to_string();
            debug!(package = %name, "import");
            self.imports.push(ImportEntry::new(name, path.pos));
            imports.push(ImportSpec {
                package: path,
                semicolon,
            });

            if !grouped {
                break;
            }
        }

        if grouped {
            nodes.push(self.expect_rparen("after import list")?.into());
        }
        if let Some(leaf) = self.match_token(TokenKind::Semicolon) {
            nodes.push(leaf.into());
        }

        Ok(Decl::Import { nodes, imports })
    }

    /// Parse struct type declaration: type Name struct { fields };
    pub(crate) fn parse_type_declaration(&mut self) -> Result<Decl, ParseError> {
        let mut nodes: Vec<CstNode> = Vec::new();
        nodes.push(self.expect_token(TokenKind::Type, "'type'", "")?.into());

        let name = self.expect_identifier("for type name after 'type'")?;
        nodes.push(name.clone().into());
        debug!(name = %name.text, "type declaration");

        nodes.push(self.expect_token(TokenKind::Struct, "'struct'", "after type name")?.into());
        nodes.push(self.expect_lbrace("after 'struct'")?.into());

        let mut fields = Vec::new();
        while !self.check(TokenKind::RBrace) && !self.is_at_end() {
            let field_name = self.expect_identifier("for field name")?;
            nodes.push(field_name.clone().into());

            let field_type = self
                .parse_type()?
                .ok_or_else(|| self.missing("field type", "after field name"))?;
            let type_leaf = Leaf::new("Type", field_type.clone(), self.next_pos());
            nodes.push(type_leaf.clone().into());

            let semicolon = self.expect_semicolon("after field declaration")?;
            nodes.push(semicolon.clone().into());

            self.symbols
                .declare_field(&name.text, &field_name.text, &field_type);
            fields.push(FieldDecl {
                field_name,
                field_type: type_leaf,
                semicolon,
            });
        }

        nodes.push(self.expect_rbrace("after struct fields")?.into());
        nodes.push(self.expect_semicolon("after '}'")?.into());

        Ok(Decl::Type {
            name: name.text,
            fields,
            nodes,
        })
    }

    /// Parse a type expression, or return `None` if none starts here
    pub(crate) fn parse_type(&mut self) -> Result<Option<String>, ParseError> {
        let Some(kind) = self.peek().map(|t| t.kind) else {
            return Ok(None);
        };

        match kind {
            TokenKind::LBracket => {
                self.advance();
                let size = self.advance_if(TokenKind::Integer).unwrap_or_default();
                self.expect_token(TokenKind::RBracket, "']'", "after array type")?;
                let element = self
                    .parse_type()?
                    .ok_or_else(|| self.missing("array element type", "after ']'"))?;
                Ok(Some(format!("[{size}]{element}")))
            }
            TokenKind::Map => {
                self.advance();
                self.expect_token(TokenKind::LBracket, "'['", "after 'map'")?;
                let key = self
                    .parse_type()?
                    .ok_or_else(|| self.missing("map key type", "after 'map['"))?;
                self.expect_token(TokenKind::RBracket, "']'", "after map key type")?;
                let value = self
                    .parse_type()?
                    .ok_or_else(|| self.missing("map value type", "after map key"))?;
                Ok(Some(format!("map[{key}]{value}")))
            }
            TokenKind::Ident => {
                let mut name = self.advance_if(TokenKind::Ident).unwrap_or_default();
                if self.check(TokenKind::Dot) {
                    self.advance();
                    let qualified = self
                        .advance_if(TokenKind::Ident)
                        .ok_or_else(|| self.missing("identifier", "after '.'"))?;
                    name = format!("{name}.{qualified}");
                }
                Ok(Some(name))
            }
            _ => Ok(None),
        }
    }

    /// Parse function or method declaration
    pub(crate) fn parse_function(&mut self) -> Result<Decl, ParseError> {
        let mut nodes: Vec<CstNode> = Vec::new();
        nodes.push(self.expect_token(TokenKind::Func, "'func'", "")?.into());

        let mut receiver = None;
        if let Some(lparen) = self.match_token(TokenKind::LPar) {
            nodes.push(lparen.into());
            let receiver_name = self.expect_identifier("for receiver name after '('")?;
            nodes.push(receiver_name.clone().into());
            let receiver_type = self
                .parse_type()?
                .ok_or_else(|| self.missing("receiver type", "after receiver name"))?;
            nodes.push(Leaf::new("Type", receiver_type.clone(), self.next_pos()).into());
            nodes.push(self.expect_rparen("after receiver")?.into());
            receiver = Some(Receiver {
                name: receiver_name.text,
                type_name: receiver_type,
            });
        }

        let name = self.expect_identifier("for function name")?;
        nodes.push(name.clone().into());
        let scope = name.text.clone();
        debug!(function = %scope, "function declaration");

        nodes.push(self.expect_lparen("after function name")?.into());
        let params = self.parse_parameters(&scope)?;
        nodes.push(self.expect_rparen("after parameters")?.into());

        let mut return_types = Vec::new();
        if let Some(lparen) = self.match_token(TokenKind::LPar) {
            nodes.push(lparen.into());
            while !self.check(TokenKind::RPar) && !self.is_at_end() {
                let return_type = self
                    .parse_type()?
                    .ok_or_else(|| self.missing("return type", "in result list"))?;
                return_types.push(return_type);
                self.advance_if(TokenKind::Comma);
            }
            nodes.push(self.expect_rparen("after return types")?.into());
        } else if let Some(return_type) = self.parse_type()? {
            return_types.push(return_type);
        }

        nodes.push(self.expect_lbrace("after function declaration")?.into());
        let body = self.parse_block_statements(&scope)?;
        nodes.push(self.expect_rbrace("after function body")?.into());
        if let Some(semicolon) = self.match_token(TokenKind::Semicolon) {
            nodes.push(semicolon.into());
        }

        debug!(function = %scope, statements = body.len(), "finished function");
        Ok(Decl::Function {
            name: name.text,
            receiver,
            params,
            return_types,
            body,
            nodes,
        })
    }

    /// Parse parameter groups: `a, b int, s string`
    fn parse_parameters(&mut self, scope: &str) -> Result<Vec<Param>, ParseError> {
        let mut params = Vec::new();

        while !self.check(TokenKind::RPar) && !self.is_at_end() {
            let mut names = Vec::new();
            while let Some(name) = self.advance_if(TokenKind::Ident) {
                names.push(name);
                if self.advance_if(TokenKind::Comma).is_none() {
                    break;
                }
            }

            let param_type = self
                .parse_type()?
                .ok_or_else(|| self.missing("parameter type", "in parameter list"))?;

            for name in names {
                let leaf = Leaf::new(TokenKind::Ident.name(), name.clone(), self.next_pos());
                self.symbols.declare_variable(
                    scope,
                    &name,
                    VariableEntry {
                        type_name: param_type.clone(),
                        pos: leaf.pos,
                        value: None,
                    },
                );
                params.push(Param {
                    param_name: leaf,
                    param_type: param_type.clone(),
                });
            }

            self.advance_if(TokenKind::Comma);
        }

        Ok(params)
    }
}
