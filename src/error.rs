//! Centralised error hierarchy for the **Rox interpreter**.
//!
//! The scanner, parser, resolver and runtime convert their failure modes into
//! one of the types defined here. Resolver and runtime failures keep a
//! dedicated type each so callers can match on the exact kind, and both fold
//! into [`LoxError`] for uniform reporting.
//!
//! The module **does not** print diagnostics itself; see
//! [`crate::session::DiagnosticSink`].

use thiserror::Error;

use log::info;

use crate::token::{Token, TokenType};

/// Canonical error type used throughout the interpreter.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoxError {
    /// Lexical (scanner) error with source line information.
    #[error("[line {line}] Error: {message}")]
    Lex {
        /// Human‑readable description.
        message: String,

        /// 1‑based line where the error occurred.
        line: usize,
    },

    /// Syntactic (parser) error.
    #[error("[line {line}] Error{location}: {message}")]
    Parse {
        message: String,
        /// `" at 'lexeme'"` or `" at end"`.
        location: String,
        line: usize,
    },

    /// Static‑analysis failure found by the resolver.
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// Runtime evaluation error.
    #[error("{0}\n[line {}]", .0.token().line)]
    Runtime(#[from] RuntimeError),
}

impl LoxError {
    /// Helper constructor for the **scanner**.
    pub fn lex<S: Into<String>>(line: usize, msg: S) -> Self {
        let message: String = msg.into();

        info!("Creating Lex error: line={}, msg={}", line, message);

        LoxError::Lex { message, line }
    }

    /// Helper constructor for the **parser**; the location is derived from
    /// the token the parser stopped at.
    pub fn parse<S: Into<String>>(token: &Token, msg: S) -> Self {
        let message: String = msg.into();

        info!(
            "Creating Parse error: line={}, msg={}",
            token.line, message
        );

        LoxError::Parse {
            message,
            location: location_of(token),
            line: token.line,
        }
    }

    /// Source line the error points at.
    pub fn line(&self) -> usize {
        match self {
            LoxError::Lex { line, .. } | LoxError::Parse { line, .. } => *line,
            LoxError::Resolve(e) => e.token.line,
            LoxError::Runtime(e) => e.token().line,
        }
    }

    /// Location fragment such as `" at 'x'"`, empty when there is none.
    pub fn location(&self) -> String {
        match self {
            LoxError::Parse { location, .. } => location.clone(),
            LoxError::Resolve(e) => location_of(&e.token),
            LoxError::Runtime(e) => location_of(e.token()),
            LoxError::Lex { .. } => String::new(),
        }
    }

    /// The bare message, without line or location decoration.
    pub fn message(&self) -> String {
        match self {
            LoxError::Lex { message, .. } | LoxError::Parse { message, .. } => message.clone(),
            LoxError::Resolve(e) => e.kind.to_string(),
            LoxError::Runtime(e) => e.to_string(),
        }
    }

    /// Static errors prevent a unit from running; runtime errors abort it.
    pub fn is_runtime(&self) -> bool {
        matches!(self, LoxError::Runtime(_))
    }
}

fn location_of(token: &Token) -> String {
    if token.token_type == TokenType::EOF {
        " at end".to_string()
    } else {
        format!(" at '{}'", token.lexeme)
    }
}

/// The static rule a program broke, as detected by the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ResolveErrorKind {
    #[error("Can't read local variable in its own initializer.")]
    UseBeforeDefinition,

    #[error("Already a variable with this name in this scope.")]
    DuplicateDeclarationInScope,

    #[error("Can't return from top-level code.")]
    ReturnOutsideFunction,

    #[error("Can't use 'this' outside of a class.")]
    ThisOutsideClass,

    #[error("Can't return a value from an initializer.")]
    ReturnValueFromInitializer,
}

/// A resolver diagnostic: the broken rule plus the token it was found at.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("[line {}] Error{}: {kind}", .token.line, location_of(.token))]
pub struct ResolveError {
    pub kind: ResolveErrorKind,
    pub token: Token,
}

impl ResolveError {
    pub fn new(kind: ResolveErrorKind, token: &Token) -> Self {
        info!(
            "Creating Resolve error: line={}, kind={:?}",
            token.line, kind
        );

        Self {
            kind,
            token: token.clone(),
        }
    }
}

/// Failures raised while evaluating a program. Every variant carries the
/// token that triggered it so the host can report a line.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuntimeError {
    #[error("Undefined variable '{}'.", .name.lexeme)]
    UndefinedVariable { name: Token },

    #[error("{message}")]
    TypeError { operator: Token, message: String },

    #[error("Division by zero.")]
    DivisionByZero { operator: Token },

    #[error("Can only call functions and classes.")]
    NotCallable { paren: Token },

    #[error("Expected {expected} arguments but got {got}.")]
    ArityMismatch {
        paren: Token,
        expected: usize,
        got: usize,
    },

    #[error("Only instances have properties.")]
    NotAnInstance { name: Token },

    #[error("Undefined property '{}'.", .name.lexeme)]
    UndefinedProperty { name: Token },

    /// A host-provided native function failed.
    #[error("{message}")]
    Native { paren: Token, message: String },

    #[error("Stack overflow.")]
    StackOverflow { paren: Token },
}

impl RuntimeError {
    pub fn token(&self) -> &Token {
        match self {
            RuntimeError::UndefinedVariable { name }
            | RuntimeError::NotAnInstance { name }
            | RuntimeError::UndefinedProperty { name } => name,
            RuntimeError::TypeError { operator, .. } | RuntimeError::DivisionByZero { operator } => {
                operator
            }
            RuntimeError::NotCallable { paren }
            | RuntimeError::ArityMismatch { paren, .. }
            | RuntimeError::Native { paren, .. }
            | RuntimeError::StackOverflow { paren } => paren,
        }
    }

    pub(crate) fn type_error(operator: &Token, message: &str) -> Self {
        RuntimeError::TypeError {
            operator: operator.clone(),
            message: message.to_string(),
        }
    }

    pub(crate) fn undefined_variable(name: &Token) -> Self {
        RuntimeError::UndefinedVariable { name: name.clone() }
    }
}

/// Crate‑wide `Result` alias.
pub type Result<T> = std::result::Result<T, LoxError>;
