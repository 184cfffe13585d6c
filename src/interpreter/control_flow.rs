// File: src/interpreter/control_flow.rs
//
// Control flow signals for loops and early returns.
//
// The interpreter uses ControlFlow to manage roko (break), aage badho
// (continue) and wapas bhejo (return) without unwinding the Rust stack.
// Statements set the signal; blocks stop executing while it is set; the
// nearest loop or function call inspects and clears it.

use super::value::Value;

/// Control flow signal of one interpreter instance
#[derive(Debug, Clone, PartialEq, Default)]
pub(crate) enum ControlFlow {
    /// Normal execution, continue to next statement
    #[default]
    None,
    /// Break statement encountered, exit the innermost loop
    Break,
    /// Continue statement encountered, skip to next loop iteration
    Continue,
    /// Return statement encountered, unwind to the enclosing call with this value
    Return(Value),
}

impl ControlFlow {
    pub(crate) fn is_set(&self) -> bool {
        !matches!(self, ControlFlow::None)
    }
}
