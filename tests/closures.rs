mod common;

#[cfg(test)]
mod closure_tests {
    use super::common::run_ok;

    #[test]
    fn test_counter_outlives_its_maker() {
        assert_eq!(
            run_ok(
                "fun makeCounter() { var i = 0; fun inc() { i = i + 1; print i; } return inc; }
                 var c = makeCounter();
                 c();
                 c();"
            ),
            vec!["1", "2"]
        );
    }

    #[test]
    fn test_each_call_captures_a_fresh_frame() {
        assert_eq!(
            run_ok(
                "fun makeCounter() { var i = 0; fun inc() { i = i + 1; return i; } return inc; }
                 var a = makeCounter();
                 var b = makeCounter();
                 a(); a();
                 print a();
                 print b();"
            ),
            vec!["3", "1"]
        );
    }

    #[test]
    fn test_closures_share_captured_variable() {
        assert_eq!(
            run_ok(
                "var inc; var get;
                 {
                   var n = 0;
                   fun i() { n = n + 1; }
                   fun g() { return n; }
                   inc = i;
                   get = g;
                 }
                 inc();
                 inc();
                 print get();"
            ),
            vec!["2"]
        );
    }

    #[test]
    fn test_outer_mutation_is_visible_to_closure() {
        assert_eq!(
            run_ok(
                "fun outer() {
                   var x = \"before\";
                   fun show() { print x; }
                   show();
                   x = \"after\";
                   show();
                 }
                 outer();"
            ),
            vec!["before", "after"]
        );
    }

    #[test]
    fn test_nested_closures_reach_every_level() {
        assert_eq!(
            run_ok(
                "fun a(x) {
                   fun b(y) {
                     fun c(z) { return x + y + z; }
                     return c;
                   }
                   return b;
                 }
                 print a(1)(2)(3);"
            ),
            vec!["6"]
        );
    }

    #[test]
    fn test_local_recursive_function() {
        assert_eq!(
            run_ok(
                "{
                   fun count(n) { if (n > 0) { print n; count(n - 1); } }
                   count(3);
                 }"
            ),
            vec!["3", "2", "1"]
        );
    }
}
