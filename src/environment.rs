use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::error::RuntimeError;
use crate::token::Token;
use crate::value::Value;

/// Shared handle to a scope frame. Closures, bound methods and child scopes
/// all hold one, so a frame lives as long as anything still refers to it and
/// mutation through any handle is seen by all of them.
pub type EnvRef = Rc<RefCell<Environment>>;

/// One lexical scope frame.
#[derive(Default)]
pub struct Environment {
    values: HashMap<String, Value>,
    enclosing: Option<EnvRef>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_enclosing(enclosing: EnvRef) -> Self {
        Environment {
            values: HashMap::new(),
            enclosing: Some(enclosing),
        }
    }

    /// Wrap a fresh frame in a shared handle.
    pub fn new_ref(enclosing: Option<EnvRef>) -> EnvRef {
        Rc::new(RefCell::new(Environment {
            values: HashMap::new(),
            enclosing,
        }))
    }

    pub fn enclosing(&self) -> Option<&EnvRef> {
        self.enclosing.as_ref()
    }

    /// Bind `name` in this frame, overwriting any previous binding here.
    pub fn define(&mut self, name: &str, value: Value) {
        self.values.insert(name.to_string(), value);
    }

    /// Look `name` up from this frame outward.
    pub fn get(&self, name: &Token) -> Result<Value, RuntimeError> {
        if let Some(value) = self.values.get(&name.lexeme) {
            Ok(value.clone())
        } else if let Some(enclosing) = &self.enclosing {
            enclosing.borrow().get(name)
        } else {
            Err(RuntimeError::undefined_variable(name))
        }
    }

    /// Overwrite the nearest existing binding of `name`. Never declares.
    pub fn assign(&mut self, name: &Token, value: Value) -> Result<(), RuntimeError> {
        if let Some(slot) = self.values.get_mut(&name.lexeme) {
            *slot = value;
            Ok(())
        } else if let Some(enclosing) = &self.enclosing {
            enclosing.borrow_mut().assign(name, value)
        } else {
            Err(RuntimeError::undefined_variable(name))
        }
    }

    /// Read `name` from this frame only.
    fn get_here(&self, name: &Token) -> Result<Value, RuntimeError> {
        self.values
            .get(&name.lexeme)
            .cloned()
            .ok_or_else(|| RuntimeError::undefined_variable(name))
    }

    fn assign_here(&mut self, name: &Token, value: Value) -> Result<(), RuntimeError> {
        match self.values.get_mut(&name.lexeme) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(RuntimeError::undefined_variable(name)),
        }
    }
}

/// The frame exactly `distance` parent hops above `env`.
pub fn ancestor(env: &EnvRef, distance: usize) -> Option<EnvRef> {
    let mut current = Rc::clone(env);

    for _ in 0..distance {
        let parent = current.borrow().enclosing.clone()?;
        current = parent;
    }

    Some(current)
}

/// `get` in the frame `distance` hops up, without walking any further.
pub fn get_at(env: &EnvRef, distance: usize, name: &Token) -> Result<Value, RuntimeError> {
    let frame = ancestor(env, distance).ok_or_else(|| RuntimeError::undefined_variable(name))?;
    let value = frame.borrow().get_here(name);
    value
}

/// `assign` in the frame `distance` hops up, without walking any further.
pub fn assign_at(
    env: &EnvRef,
    distance: usize,
    name: &Token,
    value: Value,
) -> Result<(), RuntimeError> {
    let frame = ancestor(env, distance).ok_or_else(|| RuntimeError::undefined_variable(name))?;
    let result = frame.borrow_mut().assign_here(name, value);
    result
}

// Values can point back at the frame holding them (a function bound in its
// own closure), so only names are printed.
impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.values.keys().collect();
        names.sort();

        f.debug_struct("Environment")
            .field("names", &names)
            .field("has_enclosing", &self.enclosing.is_some())
            .finish()
    }
}
