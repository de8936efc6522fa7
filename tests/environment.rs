#[cfg(test)]
mod environment_tests {
    use std::rc::Rc;

    use rox::environment::*;
    use rox::error::RuntimeError;
    use rox::token::Token;
    use rox::value::Value;

    fn name(s: &str) -> Token {
        Token::identifier(s, 1)
    }

    #[test]
    fn test_define_then_get() {
        let mut env = Environment::new();
        env.define("a", Value::Number(1.0));

        assert_eq!(env.get(&name("a")).unwrap(), Value::Number(1.0));
    }

    #[test]
    fn test_redefine_replaces() {
        let mut env = Environment::new();
        env.define("a", Value::Number(1.0));
        env.define("a", Value::from("two"));

        assert_eq!(env.get(&name("a")).unwrap(), Value::from("two"));
    }

    #[test]
    fn test_get_undefined() {
        let env = Environment::new();

        assert!(matches!(
            env.get(&name("missing")),
            Err(RuntimeError::UndefinedVariable { name }) if name.lexeme == "missing"
        ));
    }

    #[test]
    fn test_get_and_assign_walk_the_chain() {
        let globals = Environment::new_ref(None);
        globals.borrow_mut().define("a", Value::Number(1.0));

        let mut inner = Environment::with_enclosing(Rc::clone(&globals));
        assert_eq!(inner.get(&name("a")).unwrap(), Value::Number(1.0));

        inner.assign(&name("a"), Value::Number(2.0)).unwrap();
        assert_eq!(globals.borrow().get(&name("a")).unwrap(), Value::Number(2.0));
    }

    #[test]
    fn test_assign_never_creates() {
        let mut env = Environment::new();

        assert!(env.assign(&name("a"), Value::Nil).is_err());
        assert!(env.get(&name("a")).is_err());
    }

    #[test]
    fn test_ancestor() {
        let outer = Environment::new_ref(None);
        let middle = Environment::new_ref(Some(Rc::clone(&outer)));
        let inner = Environment::new_ref(Some(Rc::clone(&middle)));

        assert!(Rc::ptr_eq(&ancestor(&inner, 0).unwrap(), &inner));
        assert!(Rc::ptr_eq(&ancestor(&inner, 2).unwrap(), &outer));
        assert!(ancestor(&inner, 3).is_none());
        assert!(inner.borrow().enclosing().is_some());
        assert!(outer.borrow().enclosing().is_none());
    }

    #[test]
    fn test_get_at_ignores_shadowing() {
        let outer = Environment::new_ref(None);
        outer.borrow_mut().define("a", Value::from("outer"));

        let inner = Environment::new_ref(Some(Rc::clone(&outer)));
        inner.borrow_mut().define("a", Value::from("inner"));

        assert_eq!(get_at(&inner, 0, &name("a")).unwrap(), Value::from("inner"));
        assert_eq!(get_at(&inner, 1, &name("a")).unwrap(), Value::from("outer"));
    }

    #[test]
    fn test_get_at_does_not_walk_past_the_frame() {
        let outer = Environment::new_ref(None);
        outer.borrow_mut().define("a", Value::Nil);
        let inner = Environment::new_ref(Some(Rc::clone(&outer)));

        assert!(matches!(
            get_at(&inner, 0, &name("a")),
            Err(RuntimeError::UndefinedVariable { .. })
        ));
        assert!(get_at(&inner, 5, &name("a")).is_err());
    }

    #[test]
    fn test_assign_at_targets_one_frame() {
        let outer = Environment::new_ref(None);
        outer.borrow_mut().define("a", Value::Number(1.0));

        let inner = Environment::new_ref(Some(Rc::clone(&outer)));
        inner.borrow_mut().define("a", Value::Number(10.0));

        assign_at(&inner, 1, &name("a"), Value::Number(2.0)).unwrap();

        assert_eq!(get_at(&inner, 0, &name("a")).unwrap(), Value::Number(10.0));
        assert_eq!(get_at(&inner, 1, &name("a")).unwrap(), Value::Number(2.0));
        assert!(assign_at(&inner, 0, &name("b"), Value::Nil).is_err());
    }
}
