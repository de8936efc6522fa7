//! Tree-walking evaluator.
//!
//! Statements run against `self.environment`, the innermost live scope.
//! Variable, assignment and `this` nodes use the resolver's distance table to
//! jump straight to the frame holding their binding; nodes without an entry
//! are globals. `return` travels up as [`Flow::Return`] rather than as an
//! error, and every scope swap is undone on all exit paths.

use std::collections::HashMap;
use std::io::{self, Write};
use std::mem;
use std::rc::Rc;

use log::{debug, info, warn};

use crate::ast::{Expr, ExprId, LiteralValue, Stmt};
use crate::callable::{LoxFunction, NativeFn, NativeFunction};
use crate::class::LoxClass;
use crate::environment::{self, EnvRef, Environment};
use crate::error::RuntimeError;
use crate::resolver::Locals;
use crate::token::{Token, TokenType};
use crate::value::Value;

/// Convenient alias for interpreter results.
pub type IResult<T> = Result<T, RuntimeError>;

/// Nested calls allowed before a `StackOverflow` error.
pub const MAX_CALL_DEPTH: usize = 1024;

/// If less than this much native stack remains, grow it before recursing.
const RED_ZONE: usize = 100 * 1024;

/// Stack segment allocated on each growth.
const STACK_PER_RECURSION: usize = 1024 * 1024;

#[inline]
fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// How a statement finished.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    Normal,
    /// A `return` is unwinding toward the nearest call.
    Return(Value),
}

pub struct Interpreter {
    globals: EnvRef,
    environment: EnvRef,
    locals: Locals,
    out: Box<dyn Write>,
    call_depth: usize,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    /// An interpreter printing to stdout, with empty globals.
    pub fn new() -> Self {
        Self::with_output(Box::new(io::stdout()))
    }

    /// An interpreter printing to `out`.
    pub fn with_output(out: Box<dyn Write>) -> Self {
        info!("Initializing Interpreter");

        let globals = Environment::new_ref(None);

        Self {
            environment: Rc::clone(&globals),
            globals,
            locals: HashMap::new(),
            out,
            call_depth: 0,
        }
    }

    /// Install a host function into the globals. Call before running code
    /// that uses it.
    pub fn define_native(&mut self, name: &str, arity: usize, func: NativeFn) {
        debug!("Defining native function '{}'", name);

        let native = NativeFunction {
            name: name.to_string(),
            arity,
            func,
        };

        self.globals
            .borrow_mut()
            .define(name, Value::NativeFunction(Rc::new(native)));
    }

    pub fn globals(&self) -> &EnvRef {
        &self.globals
    }

    /// Merge a resolution table produced for statements about to run.
    pub fn resolve(&mut self, locals: Locals) {
        debug!("Adding {} resolved local(s)", locals.len());
        self.locals.extend(locals);
    }

    /// Interprets a list of statements (a "program" or one REPL unit).
    pub fn interpret(&mut self, statements: &[Stmt]) -> IResult<()> {
        debug!("Interpreting {} statements", statements.len());

        for stmt in statements {
            if let Flow::Return(value) = self.execute(stmt)? {
                warn!("Top-level return of {} ignored", value);
            }
        }

        info!("Interpretation completed successfully");
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Statements
    // ─────────────────────────────────────────────────────────────────────────

    pub fn execute(&mut self, stmt: &Stmt) -> IResult<Flow> {
        ensure_sufficient_stack(|| self.execute_stmt(stmt))
    }

    fn execute_stmt(&mut self, stmt: &Stmt) -> IResult<Flow> {
        match stmt {
            Stmt::Expression(expr) => {
                self.evaluate(expr)?;
            }

            Stmt::Print(expr) => {
                let value = self.evaluate(expr)?;
                if let Err(e) = writeln!(self.out, "{}", value) {
                    warn!("Print sink failed: {}", e);
                }
            }

            Stmt::Var { name, initializer } => {
                let value = match initializer {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Nil,
                };
                debug!("Defining variable '{}' = {}", name.lexeme, value);
                self.environment
                    .borrow_mut()
                    .define(&name.lexeme, value);
            }

            Stmt::Block(statements) => {
                let scope = Environment::new_ref(Some(Rc::clone(&self.environment)));
                return self.execute_block(statements, scope);
            }

            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                if self.evaluate(condition)?.is_truthy() {
                    return self.execute(then_branch);
                } else if let Some(else_stmt) = else_branch {
                    return self.execute(else_stmt);
                }
            }

            Stmt::While { condition, body } => {
                while self.evaluate(condition)?.is_truthy() {
                    if let Flow::Return(value) = self.execute(body)? {
                        return Ok(Flow::Return(value));
                    }
                }
            }

            Stmt::Function(decl) => {
                debug!("Defining function '{}'", decl.name.lexeme);
                // Capture the declaring scope, not the caller's.
                let function = LoxFunction::new(Rc::clone(decl), Rc::clone(&self.environment), false);
                self.environment
                    .borrow_mut()
                    .define(&decl.name.lexeme, Value::Function(Rc::new(function)));
            }

            Stmt::Return { value, .. } => {
                let value = match value {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Nil,
                };
                debug!("Returning value: {}", value);
                return Ok(Flow::Return(value));
            }

            Stmt::Class { name, methods } => {
                debug!("Defining class '{}'", name.lexeme);
                // Placeholder first so methods may refer to the class by name.
                self.environment
                    .borrow_mut()
                    .define(&name.lexeme, Value::Nil);

                let methods = methods
                    .iter()
                    .map(|decl| {
                        let is_initializer = decl.name.lexeme == "init";
                        let method = LoxFunction::new(
                            Rc::clone(decl),
                            Rc::clone(&self.environment),
                            is_initializer,
                        );
                        (decl.name.lexeme.clone(), method)
                    })
                    .collect();

                let class = LoxClass::new(name.lexeme.clone(), methods);
                self.environment
                    .borrow_mut()
                    .assign(name, Value::Class(Rc::new(class)))?;
            }
        }

        Ok(Flow::Normal)
    }

    /// Run `statements` with `scope` as the active environment, restoring the
    /// previous one however the block exits.
    pub fn execute_block(&mut self, statements: &[Stmt], scope: EnvRef) -> IResult<Flow> {
        let previous = mem::replace(&mut self.environment, scope);
        let result = self.execute_all(statements);
        self.environment = previous;
        result
    }

    fn execute_all(&mut self, statements: &[Stmt]) -> IResult<Flow> {
        for stmt in statements {
            if let Flow::Return(value) = self.execute(stmt)? {
                return Ok(Flow::Return(value));
            }
        }
        Ok(Flow::Normal)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Expressions
    // ─────────────────────────────────────────────────────────────────────────

    pub fn evaluate(&mut self, expr: &Expr) -> IResult<Value> {
        ensure_sufficient_stack(|| self.evaluate_expr(expr))
    }

    fn evaluate_expr(&mut self, expr: &Expr) -> IResult<Value> {
        match expr {
            Expr::Literal(literal) => Ok(match literal {
                LiteralValue::Number(n) => Value::Number(*n),
                LiteralValue::Str(s) => Value::String(s.clone()),
                LiteralValue::True => Value::Bool(true),
                LiteralValue::False => Value::Bool(false),
                LiteralValue::Nil => Value::Nil,
            }),

            Expr::Grouping(inner) => self.evaluate(inner),

            Expr::Unary { operator, right } => self.evaluate_unary(operator, right),

            Expr::Binary {
                left,
                operator,
                right,
            } => self.evaluate_binary(left, operator, right),

            Expr::Logical {
                left,
                operator,
                right,
            } => {
                let left = self.evaluate(left)?;

                let short_circuit = if operator.token_type == TokenType::OR {
                    left.is_truthy()
                } else {
                    !left.is_truthy()
                };

                if short_circuit {
                    Ok(left)
                } else {
                    self.evaluate(right)
                }
            }

            Expr::Variable { id, name } => self.look_up_variable(*id, name),

            Expr::This { id, keyword } => self.look_up_variable(*id, keyword),

            Expr::Assign { id, name, value } => {
                let value = self.evaluate(value)?;

                match self.locals.get(id) {
                    Some(&distance) => {
                        environment::assign_at(&self.environment, distance, name, value.clone())?
                    }
                    None => self.globals.borrow_mut().assign(name, value.clone())?,
                }

                Ok(value)
            }

            Expr::Call {
                callee,
                paren,
                arguments,
            } => self.evaluate_call(callee, paren, arguments),

            Expr::Get { object, name } => match self.evaluate(object)? {
                Value::Instance(instance) => instance.get(name),
                _ => Err(RuntimeError::NotAnInstance { name: name.clone() }),
            },

            Expr::Set {
                object,
                name,
                value,
            } => {
                let Value::Instance(instance) = self.evaluate(object)? else {
                    return Err(RuntimeError::NotAnInstance { name: name.clone() });
                };

                let value = self.evaluate(value)?;
                instance.set(name, value.clone());
                Ok(value)
            }
        }
    }

    fn look_up_variable(&self, id: ExprId, name: &Token) -> IResult<Value> {
        match self.locals.get(&id) {
            Some(&distance) => environment::get_at(&self.environment, distance, name),
            None => self.globals.borrow().get(name),
        }
    }

    fn evaluate_unary(&mut self, operator: &Token, right: &Expr) -> IResult<Value> {
        let right = self.evaluate(right)?;

        match operator.token_type {
            TokenType::MINUS => match right {
                Value::Number(n) => Ok(Value::Number(-n)),
                _ => Err(RuntimeError::type_error(operator, "Operand must be a number.")),
            },
            TokenType::BANG => Ok(Value::Bool(!right.is_truthy())),
            _ => unreachable!("Invalid unary operator"),
        }
    }

    fn evaluate_binary(&mut self, left: &Expr, operator: &Token, right: &Expr) -> IResult<Value> {
        let left = self.evaluate(left)?;
        let right = self.evaluate(right)?;

        match operator.token_type {
            TokenType::PLUS => match (left, right) {
                (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
                (Value::String(a), Value::String(b)) => Ok(Value::String(a + &b)),
                _ => Err(RuntimeError::type_error(
                    operator,
                    "Operands must be two numbers or two strings.",
                )),
            },

            TokenType::EQUAL_EQUAL => Ok(Value::Bool(left == right)),
            TokenType::BANG_EQUAL => Ok(Value::Bool(left != right)),

            _ => {
                let (a, b) = number_operands(operator, &left, &right)?;

                Ok(match operator.token_type {
                    TokenType::MINUS => Value::Number(a - b),
                    TokenType::STAR => Value::Number(a * b),
                    TokenType::SLASH => {
                        if b == 0.0 {
                            return Err(RuntimeError::DivisionByZero {
                                operator: operator.clone(),
                            });
                        }
                        Value::Number(a / b)
                    }
                    TokenType::GREATER => Value::Bool(a > b),
                    TokenType::GREATER_EQUAL => Value::Bool(a >= b),
                    TokenType::LESS => Value::Bool(a < b),
                    TokenType::LESS_EQUAL => Value::Bool(a <= b),
                    _ => unreachable!("Invalid binary operator"),
                })
            }
        }
    }

    fn evaluate_call(&mut self, callee: &Expr, paren: &Token, arguments: &[Expr]) -> IResult<Value> {
        let callee = self.evaluate(callee)?;

        let mut values = Vec::with_capacity(arguments.len());
        for argument in arguments {
            values.push(self.evaluate(argument)?);
        }

        let Some(callable) = callee.as_callable() else {
            return Err(RuntimeError::NotCallable {
                paren: paren.clone(),
            });
        };

        if values.len() != callable.arity() {
            return Err(RuntimeError::ArityMismatch {
                paren: paren.clone(),
                expected: callable.arity(),
                got: values.len(),
            });
        }

        if self.call_depth >= MAX_CALL_DEPTH {
            return Err(RuntimeError::StackOverflow {
                paren: paren.clone(),
            });
        }

        self.call_depth += 1;
        let result = callable.call(self, values, paren);
        self.call_depth -= 1;

        result
    }
}

fn number_operands(operator: &Token, left: &Value, right: &Value) -> IResult<(f64, f64)> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok((*a, *b)),
        _ => {
            debug!(
                "'{}' applied to {} and {}",
                operator.lexeme,
                left.type_name(),
                right.type_name()
            );
            Err(RuntimeError::type_error(operator, "Operands must be numbers."))
        }
    }
}
