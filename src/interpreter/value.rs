// File: src/interpreter/value.rs
//
// Runtime value types for hlang.
// Values are immutable once constructed; operators always build new values.

use super::environment::EnvRef;
use crate::ast::Node;
use std::fmt;
use std::rc::Rc;

/// A user-defined function together with the scope it was declared in
pub struct Function {
    pub name: String,
    pub params: Vec<String>,
    /// Shared with the declaring AST node
    pub body: Rc<Vec<Node>>,
    /// Scope active at the declaration site, shared rather than copied.
    /// The declaration also binds the function in this scope, so the two form
    /// an `Rc` cycle that is never freed: a call frame that declares an inner
    /// function outlives the call.
    pub closure: EnvRef,
}

// The closure scope usually contains the function itself, so Debug must not
// descend into it.
impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Function({}({}), {} stmts)", self.name, self.params.join(", "), self.body.len())
    }
}

#[derive(Debug, Clone)]
pub enum Value {
    Number(f64),
    Str(String),
    Bool(bool),
    Null,
    Function(Rc<Function>),
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Null, Value::Null) => true,
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Value {
    /// Truthiness used by conditions: false, 0, "" and null are falsy
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::Null => false,
            Value::Function(_) => true,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Str(_) => "string",
            Value::Bool(_) => "bool",
            Value::Null => "null",
            Value::Function(_) => "function",
        }
    }
}

/// Formats a number the way `bol` prints it: integral values have no
/// fractional part, everything else uses the shortest round-trip form.
pub fn format_number(n: f64) -> String {
    // Beyond i64 the cast saturates, so larger integral values keep the float form
    if n.is_finite() && n.trunc() == n && n.abs() < 9.2e18 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// Display-string coercion used by `bol` and by `+` concatenation
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", format_number(*n)),
            Value::Str(s) => write!(f, "{}", s),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Null => write!(f, "null"),
            Value::Function(_) => write!(f, "<function>"),
        }
    }
}
