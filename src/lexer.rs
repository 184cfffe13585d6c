// File: src/lexer.rs
//
// Lexical analyzer (tokenizer) for hlang.
// Converts source code text into a flat vector of tokens for parsing.
//
// Supports:
// - Keywords: ye, agar, ya, fir, ya fir, firseKaro, jabtak, dohraye, roko,
//   aage, badho, aage badho, wapas, bhejo, wapas bhejo
// - Identifiers and numbers
// - String literals in "double" or 'single' quotes with backslash escapes
// - Operators: = + - * / % < > == != <= >= && ||
// - Punctuation: ( ) { } , : ;
// - Comments starting with //
//
// The lexer never fails. Characters it does not recognize are dropped.

use std::fmt;

/// Words reserved by the language. Compound keywords are stored with a single
/// space between their two halves, exactly as they appear in token text.
const KEYWORDS: &[&str] = &[
    "ye",
    "agar",
    "ya",
    "fir",
    "ya fir",
    "firseKaro",
    "jabtak",
    "dohraye",
    "roko",
    "aage",
    "badho",
    "aage badho",
    "wapas",
    "bhejo",
    "wapas bhejo",
];

/// First words that may absorb a following word into a compound keyword.
const COMPOUND_KEYWORDS: &[(&str, &str)] = &[("ya", "fir"), ("aage", "badho"), ("wapas", "bhejo")];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Keyword,
    Identifier,
    Number,
    String,
    Operator,
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    Comma,
    Colon,
    Semicolon,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            TokenKind::Keyword => "KEYWORD",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::Number => "NUMBER",
            TokenKind::String => "STRING",
            TokenKind::Operator => "OPERATOR",
            TokenKind::LeftParen | TokenKind::RightParen => "PAREN",
            TokenKind::LeftBrace | TokenKind::RightBrace => "BRACE",
            TokenKind::Comma => "COMMA",
            TokenKind::Colon => "COLON",
            TokenKind::Semicolon => "SEMICOLON",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Token { kind, text: text.into() }
    }

    /// True if this token has the given kind and text.
    pub fn is(&self, kind: TokenKind, text: &str) -> bool {
        self.kind == kind && self.text == text
    }
}

/// Returns true if `word` is one of the reserved words.
pub fn is_keyword(word: &str) -> bool {
    KEYWORDS.contains(&word)
}

fn is_letter(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

/// Cursor over the source characters plus the tokens produced so far.
struct Lexer {
    input: Vec<char>,
    pos: usize,
    tokens: Vec<Token>,
}

impl Lexer {
    fn new(source: &str) -> Self {
        Lexer { input: source.chars().collect(), pos: 0, tokens: Vec::new() }
    }

    fn current(&self) -> Option<char> {
        self.input.get(self.pos).copied()
    }

    fn peek(&self, offset: usize) -> Option<char> {
        self.input.get(self.pos + offset).copied()
    }

    fn push(&mut self, kind: TokenKind, text: impl Into<String>) {
        self.tokens.push(Token::new(kind, text));
    }

    fn run(mut self) -> Vec<Token> {
        while let Some(c) = self.current() {
            if is_whitespace(c) {
                self.pos += 1;
            } else if c == '/' && self.peek(1) == Some('/') {
                self.skip_comment();
            } else if c == '"' || c == '\'' {
                self.scan_string(c);
            } else if c.is_ascii_digit() {
                self.scan_number();
            } else if is_letter(c) {
                self.scan_word();
            } else if !self.scan_two_char_operator() && !self.scan_single_char(c) {
                self.pos += 1;
            }
        }
        self.tokens
    }

    fn skip_comment(&mut self) {
        self.pos += 2;
        while let Some(c) = self.current() {
            if c == '\n' {
                break;
            }
            self.pos += 1;
        }
    }

    fn scan_string(&mut self, quote: char) {
        self.pos += 1; // opening quote
        let mut text = String::new();

        while let Some(c) = self.current() {
            if c == '\\' {
                if let Some(escaped) = self.peek(1) {
                    text.push(escaped);
                    self.pos += 2;
                    continue;
                }
            }
            self.pos += 1;
            if c == quote {
                break;
            }
            text.push(c);
        }

        self.push(TokenKind::String, text);
    }

    fn scan_number(&mut self) {
        let start = self.pos;
        while matches!(self.current(), Some(c) if c.is_ascii_digit() || c == '.') {
            self.pos += 1;
        }
        let text: String = self.input[start..self.pos].iter().collect();
        self.push(TokenKind::Number, text);
    }

    /// Reads `[A-Za-z_][A-Za-z0-9_]*` starting at the cursor.
    fn read_word(&mut self) -> String {
        let start = self.pos;
        self.pos += 1;
        while matches!(self.current(), Some(c) if is_letter(c) || c.is_ascii_digit()) {
            self.pos += 1;
        }
        self.input[start..self.pos].iter().collect()
    }

    fn scan_word(&mut self) {
        let mut word = self.read_word();

        if let Some((_, second)) = COMPOUND_KEYWORDS.iter().find(|(first, _)| *first == word) {
            if self.absorb_word(second) {
                word = format!("{} {}", word, second);
            }
        }

        let kind = if is_keyword(&word) { TokenKind::Keyword } else { TokenKind::Identifier };
        self.push(kind, word);
    }

    /// Consumes whitespace and `expected` if the next word is exactly `expected`.
    /// Otherwise the cursor is restored and nothing is consumed.
    fn absorb_word(&mut self, expected: &str) -> bool {
        let saved = self.pos;

        while matches!(self.current(), Some(c) if is_whitespace(c)) {
            self.pos += 1;
        }

        if matches!(self.current(), Some(c) if is_letter(c)) && self.read_word() == expected {
            return true;
        }

        self.pos = saved;
        false
    }

    fn scan_two_char_operator(&mut self) -> bool {
        let (Some(first), Some(second)) = (self.current(), self.peek(1)) else {
            return false;
        };

        match (first, second) {
            ('=', '=') | ('!', '=') | ('<', '=') | ('>', '=') | ('&', '&') | ('|', '|') => {
                self.push(TokenKind::Operator, format!("{}{}", first, second));
                self.pos += 2;
                true
            }
            _ => false,
        }
    }

    fn scan_single_char(&mut self, c: char) -> bool {
        let kind = match c {
            '=' | '+' | '-' | '*' | '/' | '%' | '<' | '>' => TokenKind::Operator,
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            '{' => TokenKind::LeftBrace,
            '}' => TokenKind::RightBrace,
            ',' => TokenKind::Comma,
            ':' => TokenKind::Colon,
            ';' => TokenKind::Semicolon,
            _ => return false,
        };
        self.push(kind, c.to_string());
        self.pos += 1;
        true
    }
}

/// Tokenizes hlang source code into a vector of tokens.
///
/// Tokenizing never fails: whitespace and comments are skipped and any
/// character that starts no token is silently dropped.
///
/// # Arguments
/// * `source` - The hlang source code as a string
///
/// # Returns
/// The tokens in source order. There is no end-of-file marker.
pub fn tokenize(source: &str) -> Vec<Token> {
    let tokens = Lexer::new(source).run();
    tracing::trace!(count = tokens.len(), "tokenized source");
    tokens
}
