// File: src/ast.rs
//
// Abstract Syntax Tree (AST) definitions for hlang.
// Defines the structure of parsed hlang programs.
//
// Statements and expressions share one `Node` type: the language only
// distinguishes them by where they appear. Any expression position may be
// empty (`None`) because the parser recovers from malformed input by
// producing nothing rather than failing; empty expressions evaluate to null.

use std::rc::Rc;

/// Root of a parsed program (and of every parsed block).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub body: Vec<Node>,
}

/// One `ya fir <condition> { ... }` clause of an if statement
#[derive(Debug, Clone, PartialEq)]
pub struct ElseIf {
    pub condition: Option<Box<Node>>,
    pub consequent: Vec<Node>,
}

/// Represents a statement or expression in hlang
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// `ye name = value`
    Declaration {
        name: String,
        value: Option<Box<Node>>,
    },
    /// `name = value`, updates an existing binding
    Assignment {
        name: String,
        value: Option<Box<Node>>,
    },
    Identifier(String),
    /// Raw text of a number or string token; its kind is decided at runtime
    Literal(String),
    /// Operator-leading expression: `op left right`
    BinaryExpr {
        op: String,
        left: Option<Box<Node>>,
        right: Option<Box<Node>>,
    },
    FunctionDecl {
        name: String,
        params: Vec<String>,
        /// Parsed from `: type` but never checked
        return_type: Option<String>,
        /// Shared with every function value created from this declaration
        body: Rc<Vec<Node>>,
    },
    FunctionCall {
        name: String,
        args: Vec<Node>,
    },
    If {
        condition: Option<Box<Node>>,
        consequent: Vec<Node>,
        else_ifs: Vec<ElseIf>,
        alternate: Vec<Node>,
    },
    While {
        condition: Option<Box<Node>>,
        body: Vec<Node>,
    },
    /// `dohraye { ... }`, loops until a break or return
    Repeat {
        body: Vec<Node>,
    },
    Break,
    Continue,
    Return(Option<Box<Node>>),
}

impl Node {
    /// Short name of the node variant, used in logs and diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Declaration { .. } => "Declaration",
            Node::Assignment { .. } => "Assignment",
            Node::Identifier(_) => "Identifier",
            Node::Literal(_) => "Literal",
            Node::BinaryExpr { .. } => "BinaryExpression",
            Node::FunctionDecl { .. } => "FunctionDeclaration",
            Node::FunctionCall { .. } => "FunctionCall",
            Node::If { .. } => "IfStatement",
            Node::While { .. } => "WhileLoop",
            Node::Repeat { .. } => "RepeatLoop",
            Node::Break => "BreakStatement",
            Node::Continue => "ContinueStatement",
            Node::Return(_) => "ReturnStatement",
        }
    }

    /// True for nodes that produce a value a user would want echoed (REPL).
    pub fn is_expression(&self) -> bool {
        matches!(
            self,
            Node::Identifier(_) | Node::Literal(_) | Node::BinaryExpr { .. } | Node::FunctionCall { .. }
        )
    }
}
