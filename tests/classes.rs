mod common;

#[cfg(test)]
mod class_tests {
    use rox::error::RuntimeError;

    use super::common::{run_err, run_ok};

    const POINT: &str = "
        class Point {
          init(x, y) { this.x = x; this.y = y; }
          sum() { return this.x + this.y; }
        }
        var p = Point(3, 4);
    ";

    fn with_point(source: &str) -> Vec<String> {
        run_ok(&format!("{}{}", POINT, source))
    }

    #[test]
    fn test_point_round_trip() {
        assert_eq!(
            with_point("print p.sum(); p.x = 10; print p.sum();"),
            vec!["7", "14"]
        );
    }

    #[test]
    fn test_class_and_instance_printing() {
        assert_eq!(
            with_point("print Point; print p; print p.sum;"),
            vec!["<class Point>", "<instance Point>", "<fn sum>"]
        );
    }

    #[test]
    fn test_bound_method_keeps_its_receiver() {
        assert_eq!(
            with_point("var m = p.sum; p.x = 1; print m(); var q = Point(0, 0); print m();"),
            vec!["5", "5"]
        );
    }

    #[test]
    fn test_fields_shadow_methods() {
        assert_eq!(
            with_point("p.sum = \"field\"; print p.sum; print Point(1, 1).sum();"),
            vec!["field", "2"]
        );
    }

    #[test]
    fn test_calling_init_directly_returns_the_instance() {
        assert_eq!(
            with_point("var q = p.init(1, 1); print q == p; print p.sum();"),
            vec!["true", "2"]
        );
    }

    #[test]
    fn test_bare_return_in_initializer() {
        assert_eq!(
            run_ok(
                "class A {
                   init(x) { this.x = x; if (x > 0) return; this.x = -1; }
                 }
                 print A(5).x;
                 print A(0).x;"
            ),
            vec!["5", "-1"]
        );
    }

    #[test]
    fn test_class_without_init_takes_no_arguments() {
        assert_eq!(run_ok("class E {} print E();"), vec!["<instance E>"]);

        let (_, err) = run_err("class E {} E(1);");
        assert!(matches!(
            err,
            RuntimeError::ArityMismatch {
                expected: 0,
                got: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_instances_compare_by_identity() {
        assert_eq!(
            run_ok("class E {} var a = E(); var b = E(); var c = a; print a == b; print a == c;"),
            vec!["false", "true"]
        );
    }

    #[test]
    fn test_method_chaining_through_this() {
        assert_eq!(
            run_ok(
                "class Counter {
                   init() { this.n = 0; }
                   inc() { this.n = this.n + 1; return this; }
                 }
                 print Counter().inc().inc().n;"
            ),
            vec!["2"]
        );
    }

    #[test]
    fn test_method_can_name_its_class() {
        assert_eq!(
            run_ok("class Node { make() { return Node(); } } print Node().make();"),
            vec!["<instance Node>"]
        );
    }

    #[test]
    fn test_this_inside_a_closure_in_a_method() {
        assert_eq!(
            run_ok(
                "class Greeter {
                   init(n) { this.n = n; }
                   make() { fun f() { return this.n; } return f; }
                 }
                 print Greeter(\"hi\").make()();"
            ),
            vec!["hi"]
        );
    }

    #[test]
    fn test_classes_in_local_scope() {
        assert_eq!(
            run_ok(
                "{
                   class Box { init(v) { this.v = v; } get() { return this.v; } }
                   var b = Box(9);
                   print b.get();
                 }"
            ),
            vec!["9"]
        );
    }

    #[test]
    fn test_property_access_on_non_instance() {
        let (_, err) = run_err("var x = 1; print x.y;");
        assert!(matches!(err, RuntimeError::NotAnInstance { ref name } if name.lexeme == "y"));
        assert_eq!(err.to_string(), "Only instances have properties.");

        let (_, err) = run_err("\"s\".len = 3;");
        assert!(matches!(err, RuntimeError::NotAnInstance { .. }));
    }

    #[test]
    fn test_undefined_property() {
        let (lines, err) = with_point_err("print p.x; print p.z;");

        assert_eq!(lines, vec!["3"]);
        assert_eq!(err.to_string(), "Undefined property 'z'.");
    }

    fn with_point_err(source: &str) -> (Vec<String>, RuntimeError) {
        run_err(&format!("{}{}", POINT, source))
    }
}
