// File: src/parser.rs
//
// Recursive descent parser for hlang.
// Transforms a sequence of tokens into an Abstract Syntax Tree (AST).
//
// The parser never fails. Tokens that start no statement are skipped one at a
// time and malformed constructs produce no node, so every input yields some
// program. It supports:
// - Variable declarations (ye) and assignments
// - Function declarations (firseKaro) with an optional, unchecked return type
// - Control flow (agar / ya fir / ya, jabtak, dohraye, roko, aage badho, wapas bhejo)
// - Operator-leading binary expressions (`+ a b`) and function calls
//
// Blocks are handled by collecting the tokens between matching braces and
// parsing that window with a fresh parser, so a block body follows exactly the
// same grammar as a whole program.

use crate::ast::{ElseIf, Node, Program};
use crate::lexer::{Token, TokenKind};
use crate::stack::ensure_sufficient_stack;
use std::rc::Rc;

/// Parser maintains position in token stream and provides methods to parse statements and expressions
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    /// Creates a new parser from a vector of tokens
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser { tokens, pos: 0 }
    }

    /// The token under the cursor, if any
    fn current(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek(&self, offset: usize) -> Option<&Token> {
        self.tokens.get(self.pos + offset)
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn check(&self, kind: TokenKind) -> bool {
        matches!(self.current(), Some(t) if t.kind == kind)
    }

    fn check_text(&self, kind: TokenKind, text: &str) -> bool {
        matches!(self.current(), Some(t) if t.is(kind, text))
    }

    /// Takes the current token's text if it has the given kind.
    fn take(&mut self, kind: TokenKind) -> Option<String> {
        let text = self.current().filter(|t| t.kind == kind)?.text.clone();
        self.advance();
        Some(text)
    }

    /// Parse the entire token stream into a program
    pub fn parse(&mut self) -> Program {
        let mut body = Vec::new();

        while let Some(token) = self.current() {
            let node = match token.kind {
                TokenKind::Keyword => match token.text.as_str() {
                    "firseKaro" => self.parse_function_declaration(),
                    "ye" => self.parse_declaration(),
                    "agar" => self.parse_if(),
                    "jabtak" => self.parse_while(),
                    "dohraye" => self.parse_repeat(),
                    "roko" => {
                        self.advance();
                        Some(Node::Break)
                    }
                    "aage badho" => {
                        self.advance();
                        Some(Node::Continue)
                    }
                    "wapas bhejo" => self.parse_return(),
                    _ => {
                        self.advance();
                        continue;
                    }
                },
                TokenKind::Identifier
                    if matches!(self.peek(1), Some(next) if next.is(TokenKind::Operator, "=")) =>
                {
                    self.parse_assignment()
                }
                TokenKind::Identifier => self.parse_expression(),
                _ => {
                    // Stray operators, literals and punctuation are dropped
                    self.advance();
                    continue;
                }
            };

            if let Some(node) = node {
                body.push(node);
            }
        }

        Program { body }
    }

    /// Parses one expression starting at the current token.
    ///
    /// Only the leading token decides the shape: a literal, an identifier (or
    /// a call when followed by `(`), or an operator followed by two operand
    /// expressions. An operand followed by an infix operator is not combined;
    /// the operator is left for the caller. Any other token is consumed and
    /// yields nothing.
    pub fn parse_expression(&mut self) -> Option<Node> {
        ensure_sufficient_stack(|| self.parse_expression_inner())
    }

    fn parse_expression_inner(&mut self) -> Option<Node> {
        let token = self.current()?.clone();
        self.advance();

        match token.kind {
            TokenKind::Number | TokenKind::String => Some(Node::Literal(token.text)),
            TokenKind::Identifier => {
                if self.check(TokenKind::LeftParen) {
                    self.advance();
                    let args = self.parse_arguments();
                    if self.check(TokenKind::RightParen) {
                        self.advance();
                    }
                    Some(Node::FunctionCall { name: token.text, args })
                } else {
                    Some(Node::Identifier(token.text))
                }
            }
            TokenKind::Operator => {
                let left = self.parse_expression().map(Box::new);
                let right = self.parse_expression().map(Box::new);
                Some(Node::BinaryExpr { op: token.text, left, right })
            }
            _ => None,
        }
    }

    fn parse_arguments(&mut self) -> Vec<Node> {
        let mut args = Vec::new();

        while !self.at_end() && !self.check(TokenKind::RightParen) {
            if let Some(arg) = self.parse_expression() {
                args.push(arg);
            }
            if self.check(TokenKind::Comma) {
                self.advance();
            }
        }

        args
    }

    /// Parses `{ ... }` into a statement list. Without an opening brace
    /// nothing is consumed and the block is empty.
    fn parse_block(&mut self) -> Vec<Node> {
        if !self.check(TokenKind::LeftBrace) {
            return Vec::new();
        }
        self.advance();

        let mut window = Vec::new();
        let mut depth = 1usize;

        while let Some(token) = self.current() {
            match token.kind {
                TokenKind::LeftBrace => depth += 1,
                TokenKind::RightBrace => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                _ => {}
            }
            window.push(token.clone());
            self.advance();
        }

        if self.check(TokenKind::RightBrace) {
            self.advance();
        }

        ensure_sufficient_stack(|| Parser::new(window).parse().body)
    }

    fn parse_function_declaration(&mut self) -> Option<Node> {
        self.advance(); // firseKaro
        let name = self.take(TokenKind::Identifier)?;

        let mut params = Vec::new();
        if self.check(TokenKind::LeftParen) {
            self.advance();
            while !self.at_end() && !self.check(TokenKind::RightParen) {
                if let Some(param) = self.take(TokenKind::Identifier) {
                    params.push(param);
                } else if self.check(TokenKind::Comma) {
                    self.advance();
                } else {
                    // Not a parameter name, drop it
                    self.advance();
                }
            }
            if self.check(TokenKind::RightParen) {
                self.advance();
            }
        }

        let mut return_type = None;
        if self.check(TokenKind::Colon) {
            self.advance();
            if let Some(token) = self.current() {
                if matches!(token.kind, TokenKind::Identifier | TokenKind::Keyword) {
                    return_type = Some(token.text.clone());
                    self.advance();
                }
            }
        }

        let body = self.parse_block();
        Some(Node::FunctionDecl { name, params, return_type, body: Rc::new(body) })
    }

    fn parse_declaration(&mut self) -> Option<Node> {
        self.advance(); // ye
        let name = self.take(TokenKind::Identifier)?;
        if !self.check_text(TokenKind::Operator, "=") {
            return None;
        }
        self.advance();

        let value = self.parse_expression().map(Box::new);
        Some(Node::Declaration { name, value })
    }

    fn parse_assignment(&mut self) -> Option<Node> {
        let name = self.take(TokenKind::Identifier)?;
        self.advance(); // =
        let value = self.parse_expression().map(Box::new);
        Some(Node::Assignment { name, value })
    }

    fn parse_if(&mut self) -> Option<Node> {
        self.advance(); // agar
        let condition = self.parse_expression().map(Box::new);
        let consequent = self.parse_block();

        let mut else_ifs = Vec::new();
        let mut alternate = Vec::new();
        loop {
            if self.check_text(TokenKind::Keyword, "ya fir") {
                self.advance();
                let condition = self.parse_expression().map(Box::new);
                let consequent = self.parse_block();
                else_ifs.push(ElseIf { condition, consequent });
            } else if self.check_text(TokenKind::Keyword, "ya") {
                self.advance();
                alternate = self.parse_block();
                break;
            } else {
                break;
            }
        }

        Some(Node::If { condition, consequent, else_ifs, alternate })
    }

    fn parse_while(&mut self) -> Option<Node> {
        self.advance(); // jabtak
        let condition = self.parse_expression().map(Box::new);
        let body = self.parse_block();
        Some(Node::While { condition, body })
    }

    fn parse_repeat(&mut self) -> Option<Node> {
        self.advance(); // dohraye
        let body = self.parse_block();
        Some(Node::Repeat { body })
    }

    fn parse_return(&mut self) -> Option<Node> {
        self.advance(); // wapas bhejo
        let has_value = matches!(
            self.current(),
            Some(t) if t.kind != TokenKind::Semicolon && t.kind != TokenKind::RightBrace
        );
        let value = if has_value { self.parse_expression().map(Box::new) } else { None };
        Some(Node::Return(value))
    }
}

/// Tokenizes and parses `source` in one step.
pub fn parse_source(source: &str) -> Program {
    let tokens = crate::lexer::tokenize(source);
    let program = Parser::new(tokens).parse();
    tracing::trace!(statements = program.body.len(), "parsed program");
    program
}
