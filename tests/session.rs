mod common;

#[cfg(test)]
mod session_tests {
    use rox::natives;
    use rox::session::{Outcome, Session};

    use super::common::{interpreter, CollectingSink, SharedBuffer};

    fn session() -> (Session, SharedBuffer, CollectingSink) {
        let (mut interp, out) = interpreter();
        natives::register_defaults(&mut interp);

        let sink = CollectingSink::default();
        (Session::new(interp, Box::new(sink.clone())), out, sink)
    }

    #[test]
    fn test_declarations_persist_between_units() {
        let (mut session, out, sink) = session();

        assert_eq!(session.run("var a = 1;"), Outcome::Success);
        assert_eq!(
            session.run("fun make() { var n = a; fun inc() { n = n + 1; return n; } return inc; }"),
            Outcome::Success
        );
        assert_eq!(session.run("var c = make();"), Outcome::Success);
        assert_eq!(session.run("print c(); print c();"), Outcome::Success);

        assert_eq!(out.lines(), vec!["2", "3"]);
        assert!(sink.reports().is_empty());
    }

    #[test]
    fn test_runtime_error_ends_only_its_unit() {
        let (mut session, out, sink) = session();

        session.run("var a = 1;");
        assert_eq!(session.run("print a; print nope; print a;"), Outcome::RuntimeError);
        assert_eq!(session.run("print a + 1;"), Outcome::Success);

        assert_eq!(out.lines(), vec!["1", "2"]);
        assert_eq!(
            sink.reports(),
            vec![(
                1,
                " at 'nope'".to_string(),
                "Undefined variable 'nope'.".to_string()
            )]
        );
    }

    #[test]
    fn test_scope_is_restored_after_error_inside_function_block() {
        let (mut session, out, _) = session();

        assert_eq!(
            session.run("fun f() { var a = 1; { nope; } } f();"),
            Outcome::RuntimeError
        );
        assert_eq!(session.run("var b = 2; print b;"), Outcome::Success);

        assert_eq!(out.lines(), vec!["2"]);
    }

    #[test]
    fn test_scope_is_restored_after_error_in_nested_blocks() {
        let (mut session, out, _) = session();

        assert_eq!(
            session.run("{ var x = 1; { var y = 2; print y + nil; } }"),
            Outcome::RuntimeError
        );
        assert_eq!(session.run("var x = \"top\"; print x;"), Outcome::Success);
        assert_eq!(session.run("fun g() { return x; } print g();"), Outcome::Success);

        assert_eq!(out.lines(), vec!["top", "top"]);
    }

    #[test]
    fn test_static_error_prevents_execution() {
        let (mut session, out, sink) = session();

        assert_eq!(
            session.run("print \"side effect\";\n{ var a = a; }"),
            Outcome::StaticError
        );

        assert!(out.contents().is_empty());
        assert_eq!(
            sink.reports(),
            vec![(
                2,
                " at 'a'".to_string(),
                "Can't read local variable in its own initializer.".to_string()
            )]
        );
    }

    #[test]
    fn test_lex_and_parse_errors_are_all_reported() {
        let (mut session, _, sink) = session();

        assert_eq!(session.run("var x = @;\nprint ;"), Outcome::StaticError);

        let reports = sink.reports();
        assert_eq!(reports.len(), 3);
        assert_eq!(reports[0].2, "Unexpected character: @");
        assert_eq!(reports[2].0, 2);
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(Outcome::Success.exit_code(), 0);
        assert_eq!(Outcome::StaticError.exit_code(), 65);
        assert_eq!(Outcome::RuntimeError.exit_code(), 70);
    }

    #[test]
    fn test_clock_is_registered() {
        let (mut session, out, _) = session();

        assert_eq!(
            session.run("var t = clock(); print t > 0; print clock;"),
            Outcome::Success
        );
        assert_eq!(out.lines(), vec!["true", "<native fn>"]);
    }

    #[test]
    fn test_natives_are_opt_in() {
        let (interp, _) = interpreter();
        let sink = CollectingSink::default();
        let mut session = Session::new(interp, Box::new(sink.clone()));

        assert_eq!(session.run("clock();"), Outcome::RuntimeError);
        assert_eq!(sink.reports()[0].2, "Undefined variable 'clock'.");

        natives::register_defaults(session.interpreter());
        assert_eq!(session.run("clock();"), Outcome::Success);
    }

    #[test]
    fn test_globals_are_reachable_from_the_host() {
        let (mut session, _, _) = session();

        session.run("var answer = 42;");

        let globals = session.interpreter().globals().clone();
        let value = globals
            .borrow()
            .get(&rox::token::Token::identifier("answer", 1))
            .unwrap();
        assert_eq!(value.to_string(), "42");
    }
}
