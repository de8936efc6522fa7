//! Runs source units through scan → parse → resolve → interpret.
//!
//! A [`Session`] owns one interpreter for its whole life, so globals declared
//! by one unit (a file, or one REPL line) stay visible to the next. Every
//! problem is handed to a [`DiagnosticSink`]; a unit with any static error is
//! never run, and a runtime error ends only the unit that raised it.

use log::{debug, info};

use crate::ast::Stmt;
use crate::error::LoxError;
use crate::interpreter::Interpreter;
use crate::parser::Parser;
use crate::resolver::{Locals, Resolver};
use crate::scanner::Scanner;

/// Receives `(line, location, message)` for static and runtime errors.
pub trait DiagnosticSink {
    fn report(&mut self, line: usize, location: &str, message: &str);

    fn report_error(&mut self, error: &LoxError) {
        self.report(error.line(), &error.location(), &error.message());
    }
}

/// Writes diagnostics to stderr as `[line N] Error at 'x': message`.
#[derive(Debug, Default)]
pub struct StderrSink;

impl DiagnosticSink for StderrSink {
    fn report(&mut self, line: usize, location: &str, message: &str) {
        eprintln!("[line {}] Error{}: {}", line, location, message);
    }
}

/// How a unit ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    StaticError,
    RuntimeError,
}

impl Outcome {
    /// Conventional process exit code (sysexits `EX_DATAERR` / `EX_SOFTWARE`).
    pub fn exit_code(self) -> i32 {
        match self {
            Outcome::Success => 0,
            Outcome::StaticError => 65,
            Outcome::RuntimeError => 70,
        }
    }
}

/// A statically valid unit, ready to run.
#[derive(Debug)]
pub struct Program {
    pub statements: Vec<Stmt>,
    pub locals: Locals,
}

/// Scan, parse and resolve `source`, collecting every static error.
pub fn check(source: &str) -> Result<Program, Vec<LoxError>> {
    let (tokens, mut errors) = Scanner::new(source).scan_all();

    let statements = match Parser::new(tokens).parse() {
        Ok(statements) => statements,
        Err(parse_errors) => {
            errors.extend(parse_errors);
            return Err(errors);
        }
    };

    if !errors.is_empty() {
        return Err(errors);
    }

    match Resolver::new().resolve(&statements) {
        Ok(locals) => Ok(Program { statements, locals }),
        Err(resolve_errors) => Err(resolve_errors.into_iter().map(LoxError::from).collect()),
    }
}

pub struct Session {
    interpreter: Interpreter,
    sink: Box<dyn DiagnosticSink>,
}

impl Session {
    pub fn new(interpreter: Interpreter, sink: Box<dyn DiagnosticSink>) -> Self {
        Self { interpreter, sink }
    }

    pub fn interpreter(&mut self) -> &mut Interpreter {
        &mut self.interpreter
    }

    /// Run one unit of source.
    pub fn run(&mut self, source: &str) -> Outcome {
        let program = match check(source) {
            Ok(program) => program,
            Err(errors) => {
                info!("Unit rejected with {} static error(s)", errors.len());
                for error in &errors {
                    self.sink.report_error(error);
                }
                return Outcome::StaticError;
            }
        };

        debug!("Running unit of {} statement(s)", program.statements.len());

        self.interpreter.resolve(program.locals);

        match self.interpreter.interpret(&program.statements) {
            Ok(()) => Outcome::Success,
            Err(e) => {
                self.sink.report_error(&LoxError::from(e));
                Outcome::RuntimeError
            }
        }
    }
}
