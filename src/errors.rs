// File: src/errors.rs
//
// Error handling and reporting for hlang.
// Only the interpreter can fail: the lexer and parser recover from bad input
// by skipping it. Runtime errors carry a kind, a message and optional
// help/suggestion notes, and render as colored diagnostics.

use colored::Colorize;
use std::fmt;

/// Types of errors that can occur while evaluating a program
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    UndefinedVariable,
    NotAFunction,
    DivisionByZero,
    ModuloByZero,
    UnsupportedOperator,
    /// A node variant reached evaluation without an evaluation rule. The
    /// evaluator matches every `Node` variant, so it never raises this today.
    UnhandledNode,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ErrorKind::UndefinedVariable => write!(f, "Undefined Variable"),
            ErrorKind::NotAFunction => write!(f, "Not A Function"),
            ErrorKind::DivisionByZero => write!(f, "Division By Zero"),
            ErrorKind::ModuloByZero => write!(f, "Modulo By Zero"),
            ErrorKind::UnsupportedOperator => write!(f, "Unsupported Operator"),
            ErrorKind::UnhandledNode => write!(f, "Unhandled Node"),
        }
    }
}

/// A runtime error raised by the interpreter
#[derive(Debug, Clone, PartialEq)]
pub struct HlangError {
    pub kind: ErrorKind,
    pub message: String,
    pub suggestion: Option<String>,
    pub help: Option<String>,
}

impl HlangError {
    pub fn new(kind: ErrorKind, message: String) -> Self {
        Self { kind, message, suggestion: None, help: None }
    }

    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestion = Some(suggestion);
        self
    }

    pub fn with_help(mut self, help: String) -> Self {
        self.help = Some(help);
        self
    }

    /// Lookup of a name that is bound nowhere in the environment chain
    pub fn undefined_variable(name: &str) -> Self {
        Self::new(ErrorKind::UndefinedVariable, format!("undefined variable: {}", name))
    }

    /// Assignment to a name that was never declared
    pub fn undefined_assignment(name: &str) -> Self {
        Self::new(
            ErrorKind::UndefinedVariable,
            format!("cannot assign to undefined variable: {}", name),
        )
        .with_help(format!("declare it first with 'ye {} = ...'", name))
    }

    pub fn not_a_function(name: &str) -> Self {
        Self::new(ErrorKind::NotAFunction, format!("{} is not a function", name))
    }

    pub fn division_by_zero() -> Self {
        Self::new(ErrorKind::DivisionByZero, "division by zero".to_string())
    }

    pub fn modulo_by_zero() -> Self {
        Self::new(ErrorKind::ModuloByZero, "modulo by zero".to_string())
    }

    pub fn unsupported_operator(op: &str) -> Self {
        Self::new(ErrorKind::UnsupportedOperator, format!("unsupported operator: {}", op))
    }

    /// Single uncolored line, used in captured test output
    pub fn summary(&self) -> String {
        format!("{}: {}", self.kind, self.message)
    }
}

impl fmt::Display for HlangError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let kind_str = format!("{}", self.kind);
        writeln!(f, "{}: {}", kind_str.red().bold(), self.message.bold())?;

        if let Some(ref help) = self.help {
            writeln!(
                f,
                "   {} {}",
                "=".bright_yellow(),
                format!("help: {}", help).bright_yellow()
            )?;
        }

        if let Some(ref suggestion) = self.suggestion {
            writeln!(
                f,
                "   {} {}",
                "=".bright_green(),
                format!("Did you mean '{}'?", suggestion).bright_green()
            )?;
        }

        Ok(())
    }
}

impl std::error::Error for HlangError {}

/// Computes the Levenshtein distance between two strings
/// Used for "Did you mean?" suggestions
pub fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let a: Vec<char> = s1.chars().collect();
    let b: Vec<char> = s2.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    // Single rolling row instead of the full matrix
    let mut row: Vec<usize> = (0..=b.len()).collect();
    for (i, ca) in a.iter().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let above = row[j + 1];
            let cost = usize::from(ca != cb);
            row[j + 1] = (above + 1).min(row[j] + 1).min(diagonal + cost);
            diagonal = above;
        }
    }

    row[b.len()]
}

/// Find the closest match from a list of candidates using Levenshtein distance
/// Returns None if no good match is found (distance > 3)
pub fn find_closest_match<'a>(target: &str, candidates: &'a [String]) -> Option<&'a str> {
    candidates
        .iter()
        .map(|candidate| (levenshtein_distance(target, candidate), candidate))
        .filter(|(distance, _)| *distance <= 3)
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, candidate)| candidate.as_str())
}
