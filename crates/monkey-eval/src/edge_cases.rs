//! Edge case tests for monkey-eval

#[cfg(test)]
mod tests {
    use crate::{EvalError, Evaluator, Object};

    fn eval_source(source: &str) -> Result<Object, EvalError> {
        let program = monkey_par::parse(source).expect("test source must parse");
        Evaluator::new().evaluate(&program)
    }

    // ==================== EDGE CASES ====================

    #[test]
    fn test_edge_empty_program_is_null() {
        assert_eq!(eval_source(""), Ok(Object::Null));
    }

    #[test]
    fn test_edge_empty_consequence_block() {
        assert_eq!(eval_source("if (true) { }"), Ok(Object::Null));
    }

    #[test]
    fn test_edge_let_of_missing_else_result() {
        assert_eq!(eval_source("let x = if (false) { 1 }; x"), Ok(Object::Null));
    }

    #[test]
    fn test_edge_division_truncates_toward_zero() {
        assert_eq!(eval_source("9 / 2"), Ok(Object::Integer(4)));
        assert_eq!(eval_source("-9 / 2"), Ok(Object::Integer(-4)));
        assert_eq!(eval_source("9 / -2"), Ok(Object::Integer(-4)));
        assert_eq!(eval_source("-9 / -2"), Ok(Object::Integer(4)));
    }

    #[test]
    fn test_edge_negation_at_i64_boundary() {
        assert_eq!(
            eval_source("-9223372036854775807"),
            Ok(Object::Integer(-i64::MAX))
        );
    }

    #[test]
    fn test_edge_deep_environment_chain() {
        let source = "let f = fn(x) { fn(y) { fn(z) { x + y + z } } }; f(1)(2)(3)";
        assert_eq!(eval_source(source), Ok(Object::Integer(6)));
    }

    #[test]
    fn test_edge_function_as_argument() {
        let source = "let apply = fn(f, x) { f(x) }; apply(fn(n) { n * 2 }, 21)";
        assert_eq!(eval_source(source), Ok(Object::Integer(42)));
    }

    #[test]
    fn test_edge_function_body_sees_later_top_level_bindings() {
        // Bodies resolve names at call time, not definition time.
        let source = "let f = fn() { g() }; let g = fn() { 7 }; f()";
        assert_eq!(eval_source(source), Ok(Object::Integer(7)));
    }

    #[test]
    fn test_edge_calling_unbound_name() {
        // An unbound name is Null, and Null is not callable.
        assert_eq!(eval_source("missing()"), Err(EvalError::NotAFunction));
    }

    #[test]
    fn test_edge_return_of_closure() {
        let source = "let f = fn() { return fn() { 3 }; }; f()()";
        assert_eq!(eval_source(source), Ok(Object::Integer(3)));
    }

    #[test]
    fn test_edge_return_inside_argument_function_does_not_escape_caller() {
        // The `return` belongs to the inner literal, not to the program.
        let source = "let call = fn(f) { f() }; call(fn() { return 1; }) + 1";
        assert_eq!(eval_source(source), Ok(Object::Integer(2)));
    }

    #[test]
    fn test_edge_error_in_argument_aborts_call() {
        let source = "let f = fn(x) { x }; f(-true)";
        assert_eq!(eval_source(source), Err(EvalError::UnknownOperator));
    }

    #[test]
    fn test_edge_condition_error_propagates() {
        assert_eq!(
            eval_source("if (1 + true) { 1 } else { 2 }"),
            Err(EvalError::TypeMismatch)
        );
    }

    #[test]
    fn test_edge_heap_stays_bounded_under_reuse() {
        // Freed slots must be reused, not appended forever.
        let mut evaluator = Evaluator::new();
        for _ in 0..10 {
            let program = monkey_par::parse("fn(x) { x }(1)").unwrap();
            evaluator.evaluate(&program).unwrap();
        }
        assert_eq!(evaluator.live_environments(), 1);
        assert_eq!(evaluator.live_functions(), 0);
        assert!(evaluator.gc_stats().collections >= 10);
    }
}
