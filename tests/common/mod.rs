#![allow(dead_code)]

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use rox::error::{LoxError, RuntimeError};
use rox::interpreter::Interpreter;
use rox::session::{self, DiagnosticSink};

/// A print sink the test can read back after handing a clone to the
/// interpreter.
#[derive(Clone, Default)]
pub struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Diagnostic sink recording `(line, location, message)` triples.
#[derive(Clone, Default)]
pub struct CollectingSink(Rc<RefCell<Vec<(usize, String, String)>>>);

impl CollectingSink {
    pub fn reports(&self) -> Vec<(usize, String, String)> {
        self.0.borrow().clone()
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&mut self, line: usize, location: &str, message: &str) {
        self.0
            .borrow_mut()
            .push((line, location.to_string(), message.to_string()));
    }
}

pub fn interpreter() -> (Interpreter, SharedBuffer) {
    let out = SharedBuffer::default();
    let interpreter = Interpreter::with_output(Box::new(out.clone()));
    (interpreter, out)
}

/// Runs `source` through the whole pipeline and returns the printed lines
/// alongside the runtime result.
pub fn execute(source: &str) -> (Vec<String>, Result<(), RuntimeError>) {
    let program = match session::check(source) {
        Ok(program) => program,
        Err(errors) => panic!("unexpected static errors: {:?}", errors),
    };

    let (mut interpreter, out) = interpreter();
    interpreter.resolve(program.locals);
    let result = interpreter.interpret(&program.statements);

    (out.lines(), result)
}

/// Printed lines of a program expected to run cleanly.
pub fn run_ok(source: &str) -> Vec<String> {
    let (lines, result) = execute(source);

    if let Err(e) = result {
        panic!("unexpected runtime error: {} (output so far: {:?})", e, lines);
    }

    lines
}

/// The runtime error of a program expected to fail, with what it printed first.
pub fn run_err(source: &str) -> (Vec<String>, RuntimeError) {
    match execute(source) {
        (lines, Err(e)) => (lines, e),
        (lines, Ok(())) => panic!("expected a runtime error, program printed {:?}", lines),
    }
}

/// Static errors of a program expected to be rejected before running.
pub fn static_errors(source: &str) -> Vec<LoxError> {
    match session::check(source) {
        Ok(_) => panic!("expected static errors for {:?}", source),
        Err(errors) => errors,
    }
}
