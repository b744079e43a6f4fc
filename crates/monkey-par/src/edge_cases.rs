//! Edge case tests for monkey-par

#[cfg(test)]
mod tests {
    use crate::{parse, Expression, ParseError, Statement};

    // ==================== EDGE CASES ====================

    #[test]
    fn test_edge_empty_source_is_empty_program() {
        let program = parse("").unwrap();
        assert!(program.statements.is_empty());
    }

    #[test]
    fn test_edge_lone_semicolon_is_error() {
        // A semicolon is a statement terminator, not a statement.
        assert_eq!(parse(";"), Err(ParseError::NotAnExpression));
    }

    #[test]
    fn test_edge_deeply_nested_groups() {
        let source = format!("{}5{}", "(".repeat(64), ")".repeat(64));
        let program = parse(&source).unwrap();
        assert_eq!(program.statements.len(), 1);
        assert!(matches!(
            program.statements[0],
            Statement::Expr(Expression::IntegerLiteral(5))
        ));
    }

    #[test]
    fn test_edge_long_operator_chain_left_associates() {
        let source = "1".to_string() + &" + 1".repeat(200);
        let program = parse(&source).unwrap();
        // The printed form must start with 200 opening parens.
        let printed = program.to_string();
        assert!(printed.starts_with(&"(".repeat(200)));
    }

    #[test]
    fn test_edge_nested_function_literals() {
        let program = parse("fn(a) { fn(b) { fn(c) { a + b + c } } }").unwrap();
        assert_eq!(program.statements.len(), 1);
    }

    #[test]
    fn test_edge_call_on_if_result() {
        // `if` is an expression; calling its result is grammatically fine.
        let program = parse("if (x) { f } else { g }(1)").unwrap();
        assert_eq!(program.statements.len(), 1);
    }

    #[test]
    fn test_edge_unmatched_close_paren() {
        assert_eq!(parse("(1"), Err(ParseError::UnexpectedToken));
    }

    #[test]
    fn test_edge_empty_group_is_error() {
        assert_eq!(parse("()"), Err(ParseError::NotAnExpression));
    }

    #[test]
    fn test_edge_if_requires_parenthesized_condition() {
        assert_eq!(parse("if x { 1 }"), Err(ParseError::UnexpectedToken));
    }

    #[test]
    fn test_edge_fn_requires_param_list() {
        assert_eq!(parse("fn { 1 }"), Err(ParseError::UnexpectedToken));
    }

    #[test]
    fn test_edge_trailing_comma_in_params_is_error() {
        assert_eq!(parse("fn(a,) { a }"), Err(ParseError::UnexpectedToken));
    }

    #[test]
    fn test_edge_illegal_token_is_not_an_expression() {
        assert_eq!(parse("let x = @;"), Err(ParseError::NotAnExpression));
    }

    #[test]
    fn test_edge_eof_after_let_keyword() {
        assert_eq!(parse("let"), Err(ParseError::UnexpectedToken));
    }

    #[test]
    fn test_edge_semicolon_stops_expression_climb() {
        // The climb must not read past a semicolon even mid-precedence.
        let program = parse("1 + 2; 3").unwrap();
        assert_eq!(program.statements.len(), 2);
    }
}
