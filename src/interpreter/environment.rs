// File: src/interpreter/environment.rs
//
// Lexical scoping environment for variable management in the hlang interpreter.
// Each scope is a map plus a link to its enclosing scope. Scopes are shared
// through `Rc<RefCell<_>>` so that a function value keeps its defining scope
// alive and sees later assignments made to it.

use super::value::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Shared handle to a scope
pub type EnvRef = Rc<RefCell<Environment>>;

/// Variable storage for one lexical scope
///
/// Lookups walk from this scope outward through `parent` links. Declarations
/// always land in this scope (shadowing outer bindings); assignments update
/// the nearest scope that already binds the name.
///
/// # Examples
///
/// ```
/// use hlang::interpreter::{Environment, Value};
///
/// let global = Environment::new_global();
/// global.borrow_mut().define("x".to_string(), Value::Number(10.0));
///
/// let inner = Environment::with_parent(global.clone());
/// inner.borrow_mut().define("x".to_string(), Value::Number(20.0));
/// assert_eq!(inner.borrow().get("x"), Some(Value::Number(20.0)));
/// assert_eq!(global.borrow().get("x"), Some(Value::Number(10.0)));
/// ```
#[derive(Debug, Default)]
pub struct Environment {
    values: HashMap<String, Value>,
    parent: Option<EnvRef>,
}

impl Environment {
    /// Create a new top-level scope with no parent
    pub fn new_global() -> EnvRef {
        Rc::new(RefCell::new(Environment::default()))
    }

    /// Create a new scope nested inside `parent`
    pub fn with_parent(parent: EnvRef) -> EnvRef {
        Rc::new(RefCell::new(Environment { values: HashMap::new(), parent: Some(parent) }))
    }

    /// Bind `name` in this scope, replacing any binding this scope already had
    pub fn define(&mut self, name: String, value: Value) {
        self.values.insert(name, value);
    }

    /// Get a variable, searching from this scope outward
    pub fn get(&self, name: &str) -> Option<Value> {
        match self.values.get(name) {
            Some(value) => Some(value.clone()),
            None => self.parent.as_ref()?.borrow().get(name),
        }
    }

    /// Update the nearest existing binding of `name`.
    /// Returns false, changing nothing, if no scope in the chain binds it.
    pub fn assign(&mut self, name: &str, value: Value) -> bool {
        if let Some(slot) = self.values.get_mut(name) {
            *slot = value;
            return true;
        }
        match &self.parent {
            Some(parent) => parent.borrow_mut().assign(name, value),
            None => false,
        }
    }

    /// Names bound in this scope only, sorted
    pub fn local_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.values.keys().cloned().collect();
        names.sort();
        names
    }

    /// Every name visible from this scope, innermost first, without duplicates
    pub fn visible_names(&self) -> Vec<String> {
        let mut names = self.local_names();
        if let Some(parent) = &self.parent {
            for name in parent.borrow().visible_names() {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        names
    }
}
