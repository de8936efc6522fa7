mod common;

#[cfg(test)]
mod runtime_error_tests {
    use rox::error::{LoxError, RuntimeError};
    use rox::interpreter::MAX_CALL_DEPTH;

    use super::common::{interpreter, run_err};

    #[test]
    fn test_arity_mismatch() {
        let (_, err) = run_err("fun f(a, b) {} f(1);");

        assert!(matches!(
            err,
            RuntimeError::ArityMismatch {
                expected: 2,
                got: 1,
                ..
            }
        ));
        assert_eq!(err.to_string(), "Expected 2 arguments but got 1.");
    }

    #[test]
    fn test_not_callable() {
        let (_, err) = run_err("var x = \"str\"; x();");

        assert!(matches!(err, RuntimeError::NotCallable { ref paren } if paren.lexeme == ")"));
        assert_eq!(err.to_string(), "Can only call functions and classes.");
    }

    #[test]
    fn test_undefined_variable() {
        let (_, err) = run_err("print nope;");
        assert_eq!(err.to_string(), "Undefined variable 'nope'.");

        let (_, err) = run_err("nope = 1;");
        assert!(matches!(err, RuntimeError::UndefinedVariable { .. }));
    }

    #[test]
    fn test_runtime_error_reports_its_line() {
        let (lines, err) = run_err("print 1;\nprint 2;\nprint -nil;");

        assert_eq!(lines, vec!["1", "2"]);

        let err = LoxError::from(err);
        assert_eq!(err.line(), 3);
        assert!(err.is_runtime());
        assert_eq!(err.to_string(), "Operand must be a number.\n[line 3]");
    }

    #[test]
    fn test_unbounded_recursion_is_a_stack_overflow() {
        let (_, err) = run_err("fun f(n) { return f(n + 1); } f(0);");
        assert!(matches!(err, RuntimeError::StackOverflow { .. }));
    }

    #[test]
    fn test_deep_but_bounded_recursion_succeeds() {
        let source = format!(
            "fun down(n) {{ if (n == 0) return 0; return down(n - 1); }} print down({});",
            MAX_CALL_DEPTH - 1
        );
        let (lines, result) = super::common::execute(&source);

        assert!(result.is_ok(), "{:?}", result);
        assert_eq!(lines, vec!["0"]);
    }

    #[test]
    fn test_interpreter_recovers_after_an_error() {
        let (mut interp, out) = interpreter();

        let failing = rox::session::check("var a = 1; fun f() { var a = 2; return nope; } f();")
            .unwrap();
        interp.resolve(failing.locals);
        assert!(interp.interpret(&failing.statements).is_err());

        let next = rox::session::check("print a;").unwrap();
        interp.resolve(next.locals);
        interp.interpret(&next.statements).unwrap();

        assert_eq!(out.lines(), vec!["1"]);
    }

    #[test]
    fn test_native_failure() {
        let (mut interp, _) = interpreter();
        interp.define_native("fail", 1, |args| Err(format!("bad input: {}", args[0])));

        let program = rox::session::check("fail(42);").unwrap();
        interp.resolve(program.locals);
        let err = interp.interpret(&program.statements).unwrap_err();

        assert!(matches!(err, RuntimeError::Native { .. }));
        assert_eq!(err.to_string(), "bad input: 42");
    }
}
