//! The call protocol shared by native functions, user functions and classes.

use std::fmt;
use std::rc::Rc;

use log::debug;

use crate::ast::FunctionDecl;
use crate::class::LoxInstance;
use crate::environment::{self, EnvRef, Environment};
use crate::error::RuntimeError;
use crate::interpreter::{Flow, Interpreter};
use crate::token::Token;
use crate::value::Value;

/// Anything that can appear in callee position.
///
/// The interpreter checks `arity()` against the argument count before
/// calling, so implementations may assume `arguments.len() == self.arity()`.
pub trait Callable {
    fn arity(&self) -> usize;

    /// `paren` is the call's closing parenthesis, used to locate errors.
    fn call(
        self: Rc<Self>,
        interpreter: &mut Interpreter,
        arguments: Vec<Value>,
        paren: &Token,
    ) -> Result<Value, RuntimeError>;
}

/// Host function signature for natives.
pub type NativeFn = fn(&[Value]) -> Result<Value, String>;

/// A function implemented by the host and installed into the globals
/// before a program runs.
#[derive(Debug, Clone)]
pub struct NativeFunction {
    pub name: String,
    pub arity: usize,
    pub func: NativeFn,
}

impl Callable for NativeFunction {
    fn arity(&self) -> usize {
        self.arity
    }

    fn call(
        self: Rc<Self>,
        _interpreter: &mut Interpreter,
        arguments: Vec<Value>,
        paren: &Token,
    ) -> Result<Value, RuntimeError> {
        debug!("Calling native function '{}'", self.name);

        (self.func)(&arguments).map_err(|message| RuntimeError::Native {
            paren: paren.clone(),
            message,
        })
    }
}

/// A user-defined function or method together with the environment it
/// closes over.
pub struct LoxFunction {
    declaration: Rc<FunctionDecl>,
    closure: EnvRef,
    is_initializer: bool,
}

impl LoxFunction {
    pub fn new(declaration: Rc<FunctionDecl>, closure: EnvRef, is_initializer: bool) -> Self {
        Self {
            declaration,
            closure,
            is_initializer,
        }
    }

    pub fn name(&self) -> &str {
        &self.declaration.name.lexeme
    }

    /// A copy of this method whose closure gains one frame defining `this`.
    /// The class keeps its unbound original, so binding never mutates it.
    pub fn bind(&self, instance: Rc<LoxInstance>) -> LoxFunction {
        let frame = Environment::new_ref(Some(Rc::clone(&self.closure)));
        frame
            .borrow_mut()
            .define("this", Value::Instance(instance));

        LoxFunction {
            declaration: Rc::clone(&self.declaration),
            closure: frame,
            is_initializer: self.is_initializer,
        }
    }

    fn this_token(&self) -> Token {
        Token::identifier("this", self.declaration.name.line)
    }
}

impl Callable for LoxFunction {
    fn arity(&self) -> usize {
        self.declaration.params.len()
    }

    fn call(
        self: Rc<Self>,
        interpreter: &mut Interpreter,
        arguments: Vec<Value>,
        _paren: &Token,
    ) -> Result<Value, RuntimeError> {
        debug!("Calling user-defined function '{}'", self.name());

        let frame = Environment::new_ref(Some(Rc::clone(&self.closure)));
        {
            let mut frame = frame.borrow_mut();
            for (param, argument) in self.declaration.params.iter().zip(arguments) {
                frame.define(&param.lexeme, argument);
            }
        }

        let flow = interpreter.execute_block(&self.declaration.body, frame)?;

        if self.is_initializer {
            return environment::get_at(&self.closure, 0, &self.this_token());
        }

        Ok(match flow {
            Flow::Return(value) => value,
            Flow::Normal => Value::Nil,
        })
    }
}

impl fmt::Debug for LoxFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoxFunction")
            .field("name", &self.name())
            .field("arity", &self.declaration.params.len())
            .field("is_initializer", &self.is_initializer)
            .finish()
    }
}
