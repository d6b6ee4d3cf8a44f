// Concrete syntax tree definitions for the Go-style front end

use serde::Serialize;
use std::fmt;

/// Ordinal handed out by the parser's node counter
pub type Pos = usize;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A consumed token as it appears in a `nodes` list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Leaf {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Text")]
    pub text: String,
    #[serde(rename = "Pos")]
    pub pos: Pos,
}

impl Leaf {
    pub fn new(name: impl Into<String>, text: impl Into<String>, pos: Pos) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
            pos,
        }
    }
}

/// Sub-expression embedded in a `nodes` list, labelled by its role
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value")]
pub enum Fragment {
    Expression(Expr),
    Condition(Expr),
    Init(Expr),
    Post(Expr),
    RangeExpression(Expr),
    StartExpression(Expr),
    EndExpression(Expr),
    CaseConditions(Vec<Expr>),
}

/// One entry of a construct's ordered `nodes` list
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CstNode {
    Token(Leaf),
    Fragment(Fragment),
}

impl From<Leaf> for CstNode {
    fn from(leaf: Leaf) -> Self {
        CstNode::Token(leaf)
    }
}

impl From<Fragment> for CstNode {
    fn from(fragment: Fragment) -> Self {
        CstNode::Fragment(fragment)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "Operator")]
pub struct Operator {
    pub value: String,
    #[serde(rename = "Pos")]
    pub pos: Pos,
}

/// Trailing `;` owned by an expression
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "Punctuation")]
pub struct Punctuation {
    pub value: String,
    #[serde(rename = "Pos")]
    pub pos: Pos,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldInit {
    pub name: String,
    pub value: Expr,
}

/// Expressions
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Expr {
    Identifier {
        value: String,
        #[serde(rename = "Pos")]
        pos: Pos,
    },
    NumberLiteral {
        value: String,
        #[serde(rename = "Pos")]
        pos: Pos,
    },
    StringLiteral {
        value: String,
        #[serde(rename = "Pos")]
        pos: Pos,
    },
    BooleanLiteral {
        value: String,
        #[serde(rename = "Pos")]
        pos: Pos,
    },
    BinaryOperation {
        left: Box<Expr>,
        operator: Operator,
        right: Box<Expr>,
    },
    UnaryOperation {
        operator: Operator,
        operand: Box<Expr>,
        is_prefix: bool,
    },
    AssignmentExpression {
        left: Box<Expr>,
        operator: Operator,
        right: Box<Expr>,
        semicolon: Option<Punctuation>,
    },
    FieldAccess {
        object: Box<Expr>,
        field: Box<Expr>,
    },
    FunctionCall {
        package: Option<String>,
        name: String,
        args: Vec<Expr>,
        nodes: Vec<CstNode>,
    },
    IndexExpression {
        array: Box<Expr>,
        index: Option<Box<Expr>>,
        nodes: Vec<CstNode>,
    },
    SliceExpression {
        array: Box<Expr>,
        start: Option<Box<Expr>>,
        end: Option<Box<Expr>>,
        nodes: Vec<CstNode>,
    },
    StructInitialization {
        struct_name: String,
        fields: Vec<FieldInit>,
        nodes: Vec<CstNode>,
    },
    ArrayLiteral {
        array_type: String,
        size: Option<String>,
        elements: Vec<Expr>,
        nodes: Vec<CstNode>,
    },
    /// `[size]T` with no initializer list
    ArrayType {
        array_type: String,
        size: Option<String>,
        nodes: Vec<CstNode>,
    },
    /// Type argument of the `make` builtin
    Type { value: String },
}

impl Expr {
    /// Discriminant as written to JSON
    pub fn kind(&self) -> &'static str {
        match self {
            Expr::Identifier { .. } => "Identifier",
            Expr::NumberLiteral { .. } => "NumberLiteral",
            Expr::StringLiteral { .. } => "StringLiteral",
            Expr::BooleanLiteral { .. } => "BooleanLiteral",
            Expr::BinaryOperation { .. } => "BinaryOperation",
            Expr::UnaryOperation { .. } => "UnaryOperation",
            Expr::AssignmentExpression { .. } => "AssignmentExpression",
            Expr::FieldAccess { .. } => "FieldAccess",
            Expr::FunctionCall { .. } => "FunctionCall",
            Expr::IndexExpression { .. } => "IndexExpression",
            Expr::SliceExpression { .. } => "SliceExpression",
            Expr::StructInitialization { .. } => "StructInitialization",
            Expr::ArrayLiteral { .. } => "ArrayLiteral",
            Expr::ArrayType { .. } => "ArrayType",
            Expr::Type { .. } => "Type",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct CaseClause {
    pub conditions: Vec<Expr>,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct DefaultClause {
    pub body: Vec<Stmt>,
}

/// `var` or short declaration, at top level or inside a body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariableDeclaration {
    pub nodes: Vec<CstNode>,
}

/// Statements inside function bodies
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Stmt {
    VariableDeclaration(VariableDeclaration),
    #[serde(rename = "IfStatement")]
    If {
        condition: Expr,
        #[serde(rename = "then")]
        then_body: Vec<Stmt>,
        #[serde(rename = "else")]
        else_body: Option<Vec<Stmt>>,
        nodes: Vec<CstNode>,
    },
    #[serde(rename = "ForStatement")]
    For {
        init: Option<Box<Stmt>>,
        condition: Option<Expr>,
        post: Option<Expr>,
        body: Vec<Stmt>,
        nodes: Vec<CstNode>,
    },
    #[serde(rename = "RangeStatement")]
    Range {
        variables: Vec<Expr>,
        expression: Expr,
        body: Vec<Stmt>,
        nodes: Vec<CstNode>,
    },
    #[serde(rename = "SwitchStatement")]
    Switch {
        expression: Option<Expr>,
        cases: Vec<CaseClause>,
        default: Option<DefaultClause>,
        nodes: Vec<CstNode>,
    },
    #[serde(rename = "ReturnStatement")]
    Return {
        expressions: Vec<Expr>,
        nodes: Vec<CstNode>,
    },
    #[serde(rename = "BreakStatement")]
    Break { nodes: Vec<CstNode> },
    #[serde(rename = "ContinueStatement")]
    Continue { nodes: Vec<CstNode> },
    #[serde(rename = "ExpressionStatement")]
    Expression {
        expression: Expr,
        semicolon: Option<Punctuation>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportSpec {
    pub package: Leaf,
    pub semicolon: Option<Leaf>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDecl {
    pub field_name: Leaf,
    pub field_type: Leaf,
    pub semicolon: Leaf,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Receiver {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Param {
    pub param_name: Leaf,
    pub param_type: String,
}

/// Top-level declarations
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Decl {
    #[serde(rename = "PackageDeclaration")]
    Package { nodes: Vec<CstNode> },
    #[serde(rename = "ImportDeclaration")]
    Import {
        nodes: Vec<CstNode>,
        imports: Vec<ImportSpec>,
    },
    #[serde(rename = "TypeDeclaration")]
    Type {
        name: String,
        fields: Vec<FieldDecl>,
        nodes: Vec<CstNode>,
    },
    #[serde(rename = "FunctionDeclaration")]
    Function {
        name: String,
        receiver: Option<Receiver>,
        params: Vec<Param>,
        return_types: Vec<String>,
        body: Vec<Stmt>,
        nodes: Vec<CstNode>,
    },
    VariableDeclaration(VariableDeclaration),
}

/// Root of the tree
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct Program {
    pub children: Vec<Decl>,
}

impl Program {
    pub fn new() -> Self {
        Self {
            children: Vec::new(),
        }
    }
}

impl Default for Program {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_leaf_and_fragment_wire_shape() {
        let nodes: Vec<CstNode> = vec![
            Leaf::new("if", "if", 0).into(),
            Fragment::Condition(Expr::Identifier {
                value: "ok".to_string(),
                pos: 1,
            })
            .into(),
        ];
        let value = serde_json::to_value(&nodes).unwrap();
        assert_eq!(
            value,
            json!([
                {"Name": "if", "Text": "if", "Pos": 0},
                {"type": "Condition", "value": {"type": "Identifier", "value": "ok", "Pos": 1}}
            ])
        );
    }

    #[test]
    fn test_statement_tags() {
        let stmt = Stmt::Break { nodes: Vec::new() };
        let value = serde_json::to_value(&stmt).unwrap();
        assert_eq!(value["type"], "BreakStatement");

        let stmt = Stmt::If {
            condition: Expr::BooleanLiteral {
                value: "true".to_string(),
                pos: 0,
            },
            then_body: Vec::new(),
            else_body: None,
            nodes: Vec::new(),
        };
        let value = serde_json::to_value(&stmt).unwrap();
        assert_eq!(value["type"], "IfStatement");
        assert!(value["else"].is_null());
        assert!(value["then"].is_array());
    }

    #[test]
    fn test_program_and_declaration_tags() {
        let mut program = Program::new();
        program.children.push(Decl::VariableDeclaration(VariableDeclaration {
            nodes: Vec::new(),
        }));
        let value = serde_json::to_value(&program).unwrap();
        assert_eq!(value["type"], "Program");
        assert_eq!(value["children"][0]["type"], "VariableDeclaration");
    }

    #[test]
    fn test_operator_carries_type() {
        let op = Operator {
            value: "+".to_string(),
            pos: 4,
        };
        assert_eq!(
            serde_json::to_value(&op).unwrap(),
            json!({"type": "Operator", "value": "+", "Pos": 4})
        );
    }
}
