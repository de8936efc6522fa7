use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use log::debug;

use crate::callable::{Callable, LoxFunction};
use crate::error::RuntimeError;
use crate::interpreter::Interpreter;
use crate::token::Token;
use crate::value::Value;

const INITIALIZER: &str = "init";

/// A class value: a name and its method table. Calling it constructs an
/// instance.
pub struct LoxClass {
    name: String,
    methods: HashMap<String, LoxFunction>,
}

impl LoxClass {
    pub fn new(name: impl Into<String>, methods: HashMap<String, LoxFunction>) -> Self {
        Self {
            name: name.into(),
            methods,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn find_method(&self, name: &str) -> Option<&LoxFunction> {
        self.methods.get(name)
    }
}

impl Callable for LoxClass {
    fn arity(&self) -> usize {
        self.find_method(INITIALIZER).map_or(0, |init| init.arity())
    }

    fn call(
        self: Rc<Self>,
        interpreter: &mut Interpreter,
        arguments: Vec<Value>,
        paren: &Token,
    ) -> Result<Value, RuntimeError> {
        debug!("Constructing instance of '{}'", self.name);

        let instance = Rc::new(LoxInstance::new(Rc::clone(&self)));

        if let Some(init) = self.find_method(INITIALIZER) {
            Rc::new(init.bind(Rc::clone(&instance))).call(interpreter, arguments, paren)?;
        }

        Ok(Value::Instance(instance))
    }
}

impl fmt::Debug for LoxClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut methods: Vec<&String> = self.methods.keys().collect();
        methods.sort();

        f.debug_struct("LoxClass")
            .field("name", &self.name)
            .field("methods", &methods)
            .finish()
    }
}

/// An object created by calling a class. Fields spring into existence on
/// first assignment.
pub struct LoxInstance {
    class: Rc<LoxClass>,
    fields: RefCell<HashMap<String, Value>>,
}

impl LoxInstance {
    pub fn new(class: Rc<LoxClass>) -> Self {
        Self {
            class,
            fields: RefCell::new(HashMap::new()),
        }
    }

    pub fn class(&self) -> &Rc<LoxClass> {
        &self.class
    }

    /// Fields shadow methods; a method is returned bound to this instance.
    pub fn get(self: &Rc<Self>, name: &Token) -> Result<Value, RuntimeError> {
        if let Some(value) = self.fields.borrow().get(&name.lexeme) {
            return Ok(value.clone());
        }

        match self.class.find_method(&name.lexeme) {
            Some(method) => Ok(Value::Function(Rc::new(method.bind(Rc::clone(self))))),
            None => Err(RuntimeError::UndefinedProperty { name: name.clone() }),
        }
    }

    pub fn set(&self, name: &Token, value: Value) {
        self.fields.borrow_mut().insert(name.lexeme.clone(), value);
    }
}

impl fmt::Debug for LoxInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut fields: Vec<String> = self.fields.borrow().keys().cloned().collect();
        fields.sort();

        f.debug_struct("LoxInstance")
            .field("class", &self.class.name)
            .field("fields", &fields)
            .finish()
    }
}
