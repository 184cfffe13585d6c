// File: src/interpreter/mod.rs
//
// Tree-walking interpreter for hlang.
// Executes programs by traversing the Abstract Syntax Tree (AST).
//
// The interpreter keeps one active environment (a chain of lexical scopes)
// and one control-flow signal. Both are fields of the instance, so separate
// interpreters never share state. It supports:
// - Variable declaration (shadowing) and assignment (nearest binding)
// - Functions with lexical closures and positional parameters
// - agar / ya fir / ya, jabtak and dohraye with roko / aage badho
// - wapas bhejo from anywhere inside a function body
// - Arithmetic and comparison on numbers, `+` concatenation for everything else
// - The built-in `bol` print call
//
// Every evaluation step returns `Result`; the first error aborts the whole
// program.

mod control_flow;
mod environment;
mod value;

pub use environment::{EnvRef, Environment};
pub use value::{format_number, Function, Value};

use control_flow::ControlFlow;

use crate::ast::{ElseIf, Node, Program};
use crate::errors::{find_closest_match, HlangError};
use crate::stack::ensure_sufficient_stack;
use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

/// Name of the built-in print call
pub const PRINT_BUILTIN: &str = "bol";

pub struct Interpreter {
    globals: EnvRef,
    env: EnvRef,
    control_flow: ControlFlow,
    output: Option<Rc<RefCell<Vec<u8>>>>,
}

impl Interpreter {
    /// Creates a new interpreter with an empty global environment
    pub fn new() -> Self {
        let globals = Environment::new_global();
        Interpreter {
            env: globals.clone(),
            globals,
            control_flow: ControlFlow::None,
            output: None,
        }
    }

    /// Sets the output sink for `bol` (used for testing)
    pub fn set_output(&mut self, output: Rc<RefCell<Vec<u8>>>) {
        self.output = Some(output);
    }

    /// Looks a name up from the active scope
    pub fn get_variable(&self, name: &str) -> Option<Value> {
        self.env.borrow().get(name)
    }

    /// All bindings of the global scope, sorted by name
    pub fn global_bindings(&self) -> Vec<(String, Value)> {
        let globals = self.globals.borrow();
        let bindings = globals
            .local_names()
            .into_iter()
            .filter_map(|name| globals.get(&name).map(|value| (name, value)))
            .collect();
        bindings
    }

    /// Helper to write output to either the output buffer or stdout
    fn write_output(&self, msg: &str) {
        if let Some(out) = &self.output {
            let _ = writeln!(out.borrow_mut(), "{}", msg);
        } else {
            println!("{}", msg);
        }
    }

    /// Runs a whole program and returns the value of the last statement executed.
    ///
    /// A top-level `wapas bhejo` (or a stray `roko` / `aage badho`) stops the
    /// program. The signal is cleared afterwards so the same interpreter can
    /// run further programs.
    pub fn run_program(&mut self, program: &Program) -> Result<Value, HlangError> {
        let result = self.execute_block(&program.body);
        self.control_flow = ControlFlow::None;
        result
    }

    /// Evaluates statements in order until one fails or sets the control-flow signal
    fn execute_block(&mut self, nodes: &[Node]) -> Result<Value, HlangError> {
        let mut last = Value::Null;
        for node in nodes {
            tracing::trace!(node = node.kind_name(), "execute");
            last = self.evaluate(node)?;
            if self.control_flow.is_set() {
                break;
            }
        }
        Ok(last)
    }

    /// Evaluates an optional expression slot; an empty slot is null
    fn evaluate_opt(&mut self, node: Option<&Node>) -> Result<Value, HlangError> {
        match node {
            Some(node) => self.evaluate(node),
            None => Ok(Value::Null),
        }
    }

    /// Evaluates a single node
    pub fn evaluate(&mut self, node: &Node) -> Result<Value, HlangError> {
        ensure_sufficient_stack(|| self.evaluate_inner(node))
    }

    fn evaluate_inner(&mut self, node: &Node) -> Result<Value, HlangError> {
        match node {
            Node::Declaration { name, value } => {
                let value = self.evaluate_opt(value.as_deref())?;
                self.env.borrow_mut().define(name.clone(), value.clone());
                Ok(value)
            }
            Node::Assignment { name, value } => {
                let value = self.evaluate_opt(value.as_deref())?;
                if self.env.borrow_mut().assign(name, value.clone()) {
                    Ok(value)
                } else {
                    Err(self.with_suggestion(HlangError::undefined_assignment(name), name))
                }
            }
            Node::Identifier(name) => self.lookup(name),
            Node::Literal(raw) => Ok(match raw.parse::<f64>() {
                Ok(n) => Value::Number(n),
                Err(_) => Value::Str(raw.clone()),
            }),
            Node::BinaryExpr { op, left, right } => {
                let left = self.evaluate_opt(left.as_deref())?;
                let right = self.evaluate_opt(right.as_deref())?;
                binary_op(op, &left, &right)
            }
            Node::FunctionDecl { name, params, body, .. } => {
                let function = Value::Function(Rc::new(Function {
                    name: name.clone(),
                    params: params.clone(),
                    body: Rc::clone(body),
                    closure: Rc::clone(&self.env),
                }));
                self.env.borrow_mut().define(name.clone(), function.clone());
                Ok(function)
            }
            Node::FunctionCall { name, args } => self.call_function(name, args),
            Node::If { condition, consequent, else_ifs, alternate } => {
                self.eval_if(condition.as_deref(), consequent, else_ifs, alternate)
            }
            Node::While { condition, body } => self.eval_loop(Some(condition.as_deref()), body),
            Node::Repeat { body } => self.eval_loop(None, body),
            Node::Break => {
                self.control_flow = ControlFlow::Break;
                Ok(Value::Null)
            }
            Node::Continue => {
                self.control_flow = ControlFlow::Continue;
                Ok(Value::Null)
            }
            Node::Return(value) => {
                let value = self.evaluate_opt(value.as_deref())?;
                self.control_flow = ControlFlow::Return(value.clone());
                Ok(value)
            }
        }
    }

    fn lookup(&self, name: &str) -> Result<Value, HlangError> {
        self.env
            .borrow()
            .get(name)
            .ok_or_else(|| self.with_suggestion(HlangError::undefined_variable(name), name))
    }

    /// Attaches a "did you mean" hint naming a visible binding close to `name`
    fn with_suggestion(&self, error: HlangError, name: &str) -> HlangError {
        let mut candidates = self.env.borrow().visible_names();
        candidates.push(PRINT_BUILTIN.to_string());
        match find_closest_match(name, &candidates) {
            Some(candidate) if candidate != name => error.with_suggestion(candidate.to_string()),
            _ => error,
        }
    }

    #[tracing::instrument(level = "trace", skip(self, args), fields(arg_count = args.len()))]
    fn call_function(&mut self, name: &str, args: &[Node]) -> Result<Value, HlangError> {
        if name == PRINT_BUILTIN {
            for arg in args {
                let value = self.evaluate(arg)?;
                self.write_output(&value.to_string());
            }
            return Ok(Value::Null);
        }

        let function = match self.lookup(name)? {
            Value::Function(function) => function,
            _ => return Err(HlangError::not_a_function(name)),
        };

        // Arguments are evaluated in the caller's scope, extras only for effect
        let mut values = Vec::with_capacity(args.len());
        for arg in args {
            values.push(self.evaluate(arg)?);
        }

        let frame = Environment::with_parent(Rc::clone(&function.closure));
        {
            let mut frame = frame.borrow_mut();
            let mut values = values.into_iter();
            for param in &function.params {
                frame.define(param.clone(), values.next().unwrap_or(Value::Null));
            }
        }

        let caller_env = std::mem::replace(&mut self.env, frame);
        let caller_flow = std::mem::take(&mut self.control_flow);

        let result = self.execute_block(&function.body);

        self.env = caller_env;
        let flow = std::mem::replace(&mut self.control_flow, caller_flow);

        let last = result?;
        Ok(match flow {
            ControlFlow::Return(value) => value,
            _ => last,
        })
    }

    fn eval_if(
        &mut self,
        condition: Option<&Node>,
        consequent: &[Node],
        else_ifs: &[ElseIf],
        alternate: &[Node],
    ) -> Result<Value, HlangError> {
        if self.evaluate_opt(condition)?.is_truthy() {
            return self.execute_block(consequent);
        }

        for clause in else_ifs {
            if self.evaluate_opt(clause.condition.as_deref())?.is_truthy() {
                return self.execute_block(&clause.consequent);
            }
        }

        if !alternate.is_empty() {
            return self.execute_block(alternate);
        }

        Ok(Value::Null)
    }

    /// Shared loop driver. `condition` is `None` for dohraye (no condition at
    /// all) and `Some(slot)` for jabtak, where an empty slot reads as null.
    fn eval_loop(
        &mut self,
        condition: Option<Option<&Node>>,
        body: &[Node],
    ) -> Result<Value, HlangError> {
        let mut last = Value::Null;

        loop {
            if let Some(condition) = condition {
                if !self.evaluate_opt(condition)?.is_truthy() {
                    break;
                }
            }

            last = self.execute_block(body)?;

            match self.control_flow {
                ControlFlow::Break => {
                    self.control_flow = ControlFlow::None;
                    break;
                }
                ControlFlow::Continue => {
                    self.control_flow = ControlFlow::None;
                }
                ControlFlow::Return(_) => break,
                ControlFlow::None => {}
            }
        }

        Ok(last)
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies a binary operator to two already-evaluated operands
pub fn binary_op(op: &str, left: &Value, right: &Value) -> Result<Value, HlangError> {
    if let (Value::Number(a), Value::Number(b)) = (left, right) {
        let (a, b) = (*a, *b);
        let result = match op {
            "+" => Value::Number(a + b),
            "-" => Value::Number(a - b),
            "*" => Value::Number(a * b),
            "/" => {
                if b == 0.0 {
                    return Err(HlangError::division_by_zero());
                }
                Value::Number(a / b)
            }
            "%" => {
                // Both sides are truncated to integers first; a divisor that
                // truncates to zero has no remainder either
                let (a, b) = (a as i64, b as i64);
                if b == 0 {
                    return Err(HlangError::modulo_by_zero());
                }
                Value::Number(a.wrapping_rem(b) as f64)
            }
            "<" => Value::Bool(a < b),
            ">" => Value::Bool(a > b),
            "<=" => Value::Bool(a <= b),
            ">=" => Value::Bool(a >= b),
            "==" => Value::Bool(a == b),
            "!=" => Value::Bool(a != b),
            _ => return Err(HlangError::unsupported_operator(op)),
        };
        return Ok(result);
    }

    if op == "+" {
        return Ok(Value::Str(format!("{}{}", left, right)));
    }

    Err(HlangError::unsupported_operator(op)
        .with_help(format!("'{}' is not defined for {} and {}", op, left.type_name(), right.type_name())))
}
